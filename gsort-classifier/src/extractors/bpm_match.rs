//! BPM Match Extractor
//!
//! Scores every tempo range containing the track's BPM by its proximity to the
//! range midpoint: `(1 - |bpm - centre| / half_width) × weight`. Ranges
//! overlap, so one BPM can vote for several genres.

use crate::config::BpmScoring;
use crate::evidence::EvidenceBag;
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreMap};

pub struct BpmExtractor {
    scoring: BpmScoring,
}

impl BpmExtractor {
    pub fn new(scoring: BpmScoring) -> Self {
        Self { scoring }
    }
}

impl Default for BpmExtractor {
    fn default() -> Self {
        Self::new(BpmScoring::default())
    }
}

impl EvidenceExtractor for BpmExtractor {
    fn name(&self) -> &'static str {
        "bpm"
    }

    fn is_available(&self, bag: &EvidenceBag) -> bool {
        !bag.bpm.is_empty()
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();
        let Some(bpm) = bag.bpm_value().filter(|bpm| *bpm > 0.0) else {
            return scores;
        };

        for range in taxonomy.tempo_ranges().iter().filter(|r| r.contains(bpm)) {
            let score = range.proximity(bpm) * self.scoring.weight;
            if score > 0.0 {
                scores.add(&range.genre, score, format!("bpm:{:?}", bpm));
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(bpm: &str) -> EvidenceBag {
        EvidenceBag {
            bpm: bpm.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_proximity_scoring() {
        let taxonomy = Taxonomy::builder().tempo_range("techno", 120.0, 140.0).build();
        let scores = BpmExtractor::default().extract(&bag("128"), &taxonomy);
        assert!((scores.score("techno") - 0.48).abs() < 1e-9);
        assert_eq!(scores.get("techno").unwrap().sources, vec!["bpm:128.0"]);
    }

    #[test]
    fn test_centre_scores_full_weight() {
        let taxonomy = Taxonomy::builder().tempo_range("trance", 130.0, 140.0).build();
        let scores = BpmExtractor::default().extract(&bag("135"), &taxonomy);
        assert!((scores.score("trance") - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_overlapping_builtin_ranges_all_score() {
        let taxonomy = Taxonomy::builtin();
        let scores = BpmExtractor::default().extract(&bag("128"), &taxonomy);
        let keys: Vec<&str> = scores.keys().collect();
        assert_eq!(keys, vec!["house", "techno"]);
        // house 120-130: (1 - 3/5) * 0.6
        assert!((scores.score("house") - 0.24).abs() < 1e-9);
        // techno 120-150: (1 - 7/15) * 0.6
        assert!((scores.score("techno") - 0.32).abs() < 1e-9);
    }

    #[test]
    fn test_edge_bpm_records_nothing() {
        let taxonomy = Taxonomy::builder().tempo_range("techno", 120.0, 140.0).build();
        assert!(BpmExtractor::default().extract(&bag("140"), &taxonomy).is_empty());
    }

    #[test]
    fn test_malformed_bpm_fails_soft() {
        let taxonomy = Taxonomy::builtin();
        let extractor = BpmExtractor::default();
        for raw in ["", "fast", "0", "-128", "NaN", "inf"] {
            assert!(extractor.extract(&bag(raw), &taxonomy).is_empty(), "bpm {:?}", raw);
        }
    }

    #[test]
    fn test_out_of_range_bpm() {
        let taxonomy = Taxonomy::builtin();
        assert!(BpmExtractor::default().extract(&bag("110"), &taxonomy).is_empty());
    }
}
