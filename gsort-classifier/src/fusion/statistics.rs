//! Batch statistics over classification results

use crate::config::StatisticsConfig;
use crate::types::{ClassificationResult, OrderedMap};
use serde::{Deserialize, Serialize};

/// Summary of a classified batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenreStatistics {
    pub total_tracks: usize,
    /// Primary genre → track count, in first-seen order
    pub genre_distribution: OrderedMap<usize>,
    /// Plain mean of confidence scores; 0.0 for an empty batch
    pub average_confidence: f64,
    /// Tracks scoring strictly above the high threshold
    pub high_confidence_tracks: usize,
    /// Tracks scoring strictly below the low threshold
    pub low_confidence_tracks: usize,
}

pub fn genre_statistics(results: &[ClassificationResult], config: &StatisticsConfig) -> GenreStatistics {
    let mut stats = GenreStatistics {
        total_tracks: results.len(),
        ..Default::default()
    };
    if results.is_empty() {
        return stats;
    }

    let mut total = 0.0;
    for result in results {
        *stats.genre_distribution.entry_or_default(&result.primary_genre) += 1;
        total += result.confidence_score;
        if result.confidence_score > config.high_confidence {
            stats.high_confidence_tracks += 1;
        }
        if result.confidence_score < config.low_confidence {
            stats.low_confidence_tracks += 1;
        }
    }
    stats.average_confidence = total / results.len() as f64;

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(genre: &str, confidence: f64) -> ClassificationResult {
        ClassificationResult {
            primary_genre: genre.to_string(),
            confidence_score: confidence,
            ..ClassificationResult::unknown()
        }
    }

    #[test]
    fn test_ten_track_batch() {
        let confidences = [0.9, 0.8, 0.75, 0.6, 0.5, 0.4, 0.35, 0.2, 0.1, 0.05];
        let results: Vec<_> = confidences.iter().map(|c| result("techno", *c)).collect();

        let stats = genre_statistics(&results, &StatisticsConfig::default());
        assert_eq!(stats.total_tracks, 10);
        assert_eq!(stats.high_confidence_tracks, 3);
        assert_eq!(stats.low_confidence_tracks, 3);
        assert!((stats.average_confidence - 0.465).abs() < 1e-9);
        assert_eq!(stats.genre_distribution.get("techno"), Some(&10));
    }

    #[test]
    fn test_distribution_in_first_seen_order() {
        let results = vec![
            result("house", 1.0),
            result("ambient", 0.5),
            result("house", 0.8),
            ClassificationResult::unknown(),
        ];
        let stats = genre_statistics(&results, &StatisticsConfig::default());
        let keys: Vec<&str> = stats.genre_distribution.keys().collect();
        assert_eq!(keys, vec!["house", "ambient", "unknown"]);
        assert_eq!(stats.genre_distribution.get("house"), Some(&2));
    }

    #[test]
    fn test_empty_batch() {
        let stats = genre_statistics(&[], &StatisticsConfig::default());
        assert_eq!(stats, GenreStatistics::default());
    }

    #[test]
    fn test_threshold_boundaries_are_exclusive() {
        let results = vec![result("a", 0.7), result("b", 0.3)];
        let stats = genre_statistics(&results, &StatisticsConfig::default());
        assert_eq!(stats.high_confidence_tracks, 0);
        assert_eq!(stats.low_confidence_tracks, 0);
    }
}
