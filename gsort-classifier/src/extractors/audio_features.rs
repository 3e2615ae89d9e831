//! Audio-Feature Heuristics Extractor
//!
//! Applies the taxonomy's threshold rules to provider audio features. Rules
//! are independent: several can fire for one track, and none suppresses
//! another.
//!
//! A record with any unparseable feature is void: no rule fires for it.

use crate::evidence::EvidenceBag;
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreMap};
use tracing::debug;

pub struct AudioFeatureExtractor;

impl EvidenceExtractor for AudioFeatureExtractor {
    fn name(&self) -> &'static str {
        "audio_features"
    }

    fn is_available(&self, bag: &EvidenceBag) -> bool {
        !bag.features.is_empty()
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();
        if bag.features.malformed {
            debug!("Malformed audio features, skipping feature rules");
            return scores;
        }

        for rule in taxonomy.feature_rules() {
            if rule.matches(&bag.features) {
                scores.add(&rule.genre, rule.score, rule.label.as_str());
            }
        }
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::AudioFeatures;

    fn bag(features: AudioFeatures) -> EvidenceBag {
        EvidenceBag {
            features,
            ..Default::default()
        }
    }

    #[test]
    fn test_high_energy_track_fires_three_rules() {
        let features = AudioFeatures {
            energy: Some(0.9),
            danceability: Some(0.85),
            valence: Some(0.5),
            acousticness: Some(0.05),
            malformed: false,
        };
        let scores = AudioFeatureExtractor.extract(&bag(features), &Taxonomy::builtin());

        let keys: Vec<&str> = scores.keys().collect();
        assert_eq!(keys, vec!["techno", "house", "electronic"]);
        assert_eq!(scores.score("techno"), 0.5);
        assert_eq!(scores.score("house"), 0.4);
        assert_eq!(scores.score("electronic"), 0.3);
        assert_eq!(scores.get("techno").unwrap().sources, vec!["high_energy_dance"]);
    }

    #[test]
    fn test_calm_track_scores_ambient() {
        let features = AudioFeatures {
            energy: Some(0.1),
            valence: Some(0.2),
            ..Default::default()
        };
        let scores = AudioFeatureExtractor.extract(&bag(features), &Taxonomy::builtin());
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.score("ambient"), 0.6);
    }

    #[test]
    fn test_missing_features_fire_nothing() {
        // Treating absent values as 0.0 would satisfy the "below" thresholds
        let scores = AudioFeatureExtractor.extract(&EvidenceBag::default(), &Taxonomy::builtin());
        assert!(scores.is_empty());
        assert!(!AudioFeatureExtractor.is_available(&EvidenceBag::default()));
    }

    #[test]
    fn test_malformed_feature_voids_every_rule() {
        // energy and acousticness alone would satisfy electronic_features
        let features = AudioFeatures {
            energy: Some(0.9),
            acousticness: Some(0.05),
            malformed: true,
            ..Default::default()
        };
        let bag = bag(features);
        assert!(AudioFeatureExtractor.is_available(&bag));
        assert!(AudioFeatureExtractor.extract(&bag, &Taxonomy::builtin()).is_empty());
    }

    #[test]
    fn test_thresholds_are_strict() {
        let features = AudioFeatures {
            energy: Some(0.8),
            danceability: Some(0.7),
            ..Default::default()
        };
        let scores = AudioFeatureExtractor.extract(&bag(features), &Taxonomy::builtin());
        assert!(!scores.contains_key("techno"));
    }
}
