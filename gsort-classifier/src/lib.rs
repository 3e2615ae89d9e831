//! gsort-classifier library interface
//!
//! Multi-source genre evidence fusion: extractors score a normalized evidence
//! bag, the aggregator merges their partial maps, the ranker decides.

pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod evidence;
pub mod extractors;
pub mod fusion;
pub mod taxonomy;
pub mod types;

pub use crate::batch::{BatchClassifier, TrackInput};
pub use crate::classifier::GenreClassifier;
pub use crate::config::ClassifierConfig;
pub use crate::error::{ClassifierError, Result};
pub use crate::evidence::{EvidenceBag, ProviderHealth, ProviderOpinion, ProviderResponse, TrackMetadata};
pub use crate::fusion::{genre_statistics, GenreStatistics};
pub use crate::taxonomy::Taxonomy;
pub use crate::types::{ClassificationResult, EvidenceExtractor, ScoreMap};
