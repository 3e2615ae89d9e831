//! Evidence Extractors
//!
//! Seven independent scorers, each a pure function of the evidence bag and the
//! taxonomy. Each implements [`EvidenceExtractor`].
//!
//! # Extractors (execution order)
//! 1. **tag_match** - genre strings vs. taxonomy aliases and the alias resolver
//! 2. **keyword_match** - taxonomy keywords in free text
//! 3. **bpm_match** - tempo range proximity
//! 4. **audio_features** - provider audio-feature threshold rules
//! 5. **local_audio** - local analysis block
//! 6. **ai_fusion** - AI analysis and provider opinions
//! 7. **filename_heuristics** - filename and path patterns
//!
//! Execution order is also the ranking tie-break: the genre scored first wins
//! a tie. Reordering the list changes output.

pub mod ai_fusion;
pub mod audio_features;
pub mod bpm_match;
pub mod filename_heuristics;
pub mod keyword_match;
pub mod local_audio;
pub mod tag_match;

pub use ai_fusion::AiFusionExtractor;
pub use audio_features::AudioFeatureExtractor;
pub use bpm_match::BpmExtractor;
pub use filename_heuristics::FilenameExtractor;
pub use keyword_match::KeywordExtractor;
pub use local_audio::LocalAudioExtractor;
pub use tag_match::GenreTagExtractor;

use crate::config::ScoringConfig;
use crate::types::EvidenceExtractor;
use std::sync::Arc;

/// The standard extractor pipeline in execution order
pub fn default_extractors(scoring: &ScoringConfig) -> Vec<Arc<dyn EvidenceExtractor>> {
    vec![
        Arc::new(GenreTagExtractor::new(scoring.tags.clone())),
        Arc::new(KeywordExtractor::new(scoring.keywords.clone())),
        Arc::new(BpmExtractor::new(scoring.bpm.clone())),
        Arc::new(AudioFeatureExtractor),
        Arc::new(LocalAudioExtractor),
        Arc::new(AiFusionExtractor::new(scoring.ai.clone())),
        Arc::new(FilenameExtractor::new(scoring.filename.clone())),
    ]
}
