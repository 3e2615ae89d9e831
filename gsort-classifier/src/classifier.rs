//! Genre Classifier
//!
//! Runs the extractor pipeline over one track's evidence, merges the partial
//! scores and ranks the result. Classification is pure and deterministic:
//! identical input always yields identical output, and malformed input only
//! ever shrinks the evidence.

use crate::config::{ClassifierConfig, RankingConfig, ScoringConfig};
use crate::evidence::{EvidenceBag, ProviderResponse, TrackMetadata};
use crate::extractors::default_extractors;
use crate::fusion::{DecisionRanker, ScoreAggregator};
use crate::taxonomy::Taxonomy;
use crate::types::{ClassificationResult, EvidenceExtractor};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct GenreClassifier {
    taxonomy: Arc<Taxonomy>,
    extractors: Vec<Arc<dyn EvidenceExtractor>>,
    ranker: DecisionRanker,
}

impl GenreClassifier {
    pub fn new(taxonomy: Arc<Taxonomy>, scoring: &ScoringConfig, ranking: RankingConfig) -> Self {
        Self::with_extractors(taxonomy, default_extractors(scoring), ranking)
    }

    pub fn from_config(taxonomy: Arc<Taxonomy>, config: &ClassifierConfig) -> Self {
        Self::new(taxonomy, &config.scoring, config.ranking.clone())
    }

    /// Classifier over a custom extractor pipeline (run in the given order)
    pub fn with_extractors(
        taxonomy: Arc<Taxonomy>,
        extractors: Vec<Arc<dyn EvidenceExtractor>>,
        ranking: RankingConfig,
    ) -> Self {
        Self {
            taxonomy,
            extractors,
            ranker: DecisionRanker::new(ranking),
        }
    }

    /// Built-in taxonomy with default weights
    pub fn builtin() -> Self {
        Self::new(
            Taxonomy::builtin(),
            &ScoringConfig::default(),
            RankingConfig::default(),
        )
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub fn classify(
        &self,
        metadata: &TrackMetadata,
        provider: Option<&ProviderResponse>,
    ) -> ClassificationResult {
        let bag = EvidenceBag::from_sources(metadata, provider);
        self.classify_bag(&bag)
    }

    pub fn classify_bag(&self, bag: &EvidenceBag) -> ClassificationResult {
        let mut aggregator = ScoreAggregator::new();

        for extractor in &self.extractors {
            let name = extractor.name();
            if !extractor.is_available(bag) {
                trace!(extractor = name, "No evidence for extractor, skipping");
                continue;
            }

            let scores = extractor.extract(bag, &self.taxonomy);
            debug!(
                extractor = name,
                genres = scores.len(),
                "Extractor scored"
            );
            aggregator.merge(name, scores);
        }

        self.ranker.rank(aggregator.into_scores(), &self.taxonomy)
    }
}

impl Default for GenreClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}
