//! Score Aggregator
//!
//! Merges each extractor's partial score map into one running total per
//! genre, keeping per-extractor attribution.
//!
//! Genres keep the position at which they were first scored. The ranker's
//! tie-break depends on that order, so `merge` must be called in extractor
//! execution order.

use crate::types::{AggregatedScore, OrderedMap, ScoreMap};
use tracing::trace;

#[derive(Debug, Default)]
pub struct ScoreAggregator {
    scores: OrderedMap<AggregatedScore>,
}

impl ScoreAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one extractor's output into the running totals
    pub fn merge(&mut self, extractor: &str, partial: ScoreMap) {
        for (genre, entry) in partial {
            trace!(extractor = %extractor, genre = %genre, score = entry.score, "Merging score");
            let aggregated = self.scores.entry_or_default(&genre);
            aggregated.total_score += entry.score;
            aggregated.sources.extend(entry.sources);
            aggregated.breakdown.insert(extractor, entry.score);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn get(&self, genre: &str) -> Option<&AggregatedScore> {
        self.scores.get(genre)
    }

    /// Aggregated scores in first-scored order
    pub fn into_scores(self) -> OrderedMap<AggregatedScore> {
        self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partial(entries: &[(&str, f64, &str)]) -> ScoreMap {
        let mut map = ScoreMap::new();
        for (genre, score, source) in entries {
            map.add(genre, *score, *source);
        }
        map
    }

    #[test]
    fn test_merge_sums_and_attributes() {
        let mut aggregator = ScoreAggregator::new();
        aggregator.merge("genre_tags", partial(&[("techno", 0.9, "direct_match_metadata:Techno")]));
        aggregator.merge("bpm", partial(&[("house", 0.24, "bpm:128.0"), ("techno", 0.32, "bpm:128.0")]));

        let techno = aggregator.get("techno").unwrap();
        assert!((techno.total_score - 1.22).abs() < 1e-9);
        assert_eq!(techno.sources, vec!["direct_match_metadata:Techno", "bpm:128.0"]);
        assert_eq!(techno.breakdown.get("genre_tags"), Some(&0.9));
        assert_eq!(techno.breakdown.get("bpm"), Some(&0.32));
        assert_eq!(techno.breakdown.keys().collect::<Vec<_>>(), vec!["genre_tags", "bpm"]);
    }

    #[test]
    fn test_first_scored_order_is_kept() {
        let mut aggregator = ScoreAggregator::new();
        aggregator.merge("keywords", partial(&[("ambient", 0.3, "keywords:calm")]));
        aggregator.merge("filename", partial(&[("techno", 2.0, "x"), ("ambient", 0.1, "y")]));

        let scores = aggregator.into_scores();
        assert_eq!(scores.keys().collect::<Vec<_>>(), vec!["ambient", "techno"]);
    }

    #[test]
    fn test_empty_partials_leave_nothing() {
        let mut aggregator = ScoreAggregator::new();
        aggregator.merge("bpm", ScoreMap::new());
        assert!(aggregator.is_empty());
        assert_eq!(aggregator.len(), 0);
    }
}
