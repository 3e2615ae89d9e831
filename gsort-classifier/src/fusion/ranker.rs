//! Decision Ranker
//!
//! Turns aggregated scores into a [`ClassificationResult`].
//!
//! # Policy
//! - Sort by total score, descending. The sort is stable, so ties keep
//!   first-scored order (extractor execution order).
//! - Primary = rank 0; confidence = its total score.
//! - Secondary = ranks 1..=max_secondary, kept only above `secondary_min_score`.
//! - Folder = taxonomy folder name of the primary genre.
//! - No scored genre at all → the `unknown` result.

use crate::config::RankingConfig;
use crate::taxonomy::Taxonomy;
use crate::types::{AggregatedScore, AnalysisDetails, ClassificationResult, OrderedMap};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct DecisionRanker {
    config: RankingConfig,
}

impl DecisionRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn rank(&self, scores: OrderedMap<AggregatedScore>, taxonomy: &Taxonomy) -> ClassificationResult {
        let mut ranked: Vec<(String, AggregatedScore)> = scores.into_iter().collect();
        if ranked.is_empty() {
            debug!("No evidence for track, classifying as unknown");
            return ClassificationResult::unknown();
        }

        ranked.sort_by(|a, b| b.1.total_score.total_cmp(&a.1.total_score));

        let secondary_genres: Vec<String> = ranked
            .iter()
            .skip(1)
            .take(self.config.max_secondary)
            .filter(|(_, score)| score.total_score > self.config.secondary_min_score)
            .map(|(genre, _)| genre.clone())
            .collect();

        let (primary_genre, primary) = &ranked[0];
        let primary_genre = primary_genre.clone();
        let confidence_score = primary.total_score;
        let classification_sources = primary.sources.clone();
        let suggested_folder = taxonomy.folder_name(&primary_genre);

        debug!(
            primary = %primary_genre,
            confidence = confidence_score,
            secondary = ?secondary_genres,
            scored = ranked.len(),
            "Track ranked"
        );

        let all_scores = ranked
            .iter()
            .map(|(genre, score)| (genre.as_str(), score.total_score))
            .collect();

        ClassificationResult {
            primary_genre,
            secondary_genres,
            confidence_score,
            classification_sources,
            suggested_folder,
            analysis_details: AnalysisDetails {
                all_scores,
                score_breakdown: ranked.into_iter().collect(),
            },
        }
    }
}
