//! Classifier configuration
//!
//! Every scoring weight is a tunable constant. The defaults are the
//! production weights; change them only with labelled data to validate
//! against.
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [scoring.keywords]
//! per_hit = 0.3
//! max_score = 1.0
//!
//! [ranking]
//! secondary_min_score = 0.3
//!
//! [batch]
//! max_parallel = 8
//! ```

use crate::error::{ClassifierError, Result};
use gsort_common::config::{load_config, ConfigResolver, ConfigSource, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Application name used for config discovery
pub const APP_NAME: &str = "gsort";

/// Top-level classifier configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub logging: LoggingConfig,
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub statistics: StatisticsConfig,
    pub batch: BatchConfig,
}

/// Per-extractor scoring weights
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub tags: TagScoring,
    pub keywords: KeywordScoring,
    pub bpm: BpmScoring,
    pub ai: AiScoring,
    pub filename: FilenameScoring,
}

/// Tag/alias match weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagScoring {
    /// Genre tags read from the file
    pub metadata_weight: f64,
    /// Aggregate provider genre list
    pub provider_weight: f64,
    /// Named provider → weight
    pub named_provider_weights: BTreeMap<String, f64>,
    /// Weight for named providers missing from `named_provider_weights`
    pub default_provider_weight: f64,
    /// Multiplier applied to alias-resolved matches
    pub alias_factor: f64,
}

impl Default for TagScoring {
    fn default() -> Self {
        let named_provider_weights = [("spotify", 0.8), ("lastfm", 0.6), ("web", 0.5)]
            .into_iter()
            .map(|(name, weight)| (name.to_string(), weight))
            .collect();
        Self {
            metadata_weight: 0.9,
            provider_weight: 0.7,
            named_provider_weights,
            default_provider_weight: 0.5,
            alias_factor: 0.8,
        }
    }
}

impl TagScoring {
    pub fn weight_for(&self, provider: &str) -> f64 {
        self.named_provider_weights
            .get(provider)
            .copied()
            .unwrap_or(self.default_provider_weight)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordScoring {
    pub per_hit: f64,
    pub max_score: f64,
}

impl Default for KeywordScoring {
    fn default() -> Self {
        Self {
            per_hit: 0.3,
            max_score: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BpmScoring {
    /// Score at the exact centre of a tempo range
    pub weight: f64,
}

impl Default for BpmScoring {
    fn default() -> Self {
        Self { weight: 0.6 }
    }
}

/// AI and provider-opinion fusion weights
///
/// Defaults keep the trust order AI > provider primary > provider secondary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiScoring {
    /// AI confidence must exceed this to count
    pub min_confidence: f64,
    /// Multiplier applied to AI confidence
    pub boost: f64,
    /// Flat score per alias-resolved AI tag
    pub tag_score: f64,
    /// Flat score for the remix style of a remix
    pub remix_score: f64,
    /// Provider primary confidence must exceed this to count
    pub provider_min_confidence: f64,
    /// Flat score for the provider secondary genre
    pub secondary_score: f64,
}

impl Default for AiScoring {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            boost: 1.2,
            tag_score: 0.3,
            remix_score: 0.8,
            provider_min_confidence: 0.4,
            secondary_score: 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameScoring {
    /// Genre id found literally in the path or filename
    pub path_score: f64,
    /// Per family-pattern hit
    pub family_score: f64,
    /// Per structural-pattern hit
    pub structure_score: f64,
    /// Stems shorter than this count as short
    pub short_stem_len: usize,
    pub short_stem_score: f64,
    /// Underscore count at which a name counts as heavily segmented
    pub separator_min: usize,
    pub separator_score: f64,
}

impl Default for FilenameScoring {
    fn default() -> Self {
        Self {
            path_score: 0.4,
            family_score: 0.15,
            structure_score: 0.1,
            short_stem_len: 10,
            short_stem_score: 0.05,
            separator_min: 3,
            separator_score: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Runner-ups must score strictly above this to be listed
    pub secondary_min_score: f64,
    pub max_secondary: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            secondary_min_score: 0.3,
            max_secondary: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Scores strictly above count as high confidence
    pub high_confidence: f64,
    /// Scores strictly below count as low confidence
    pub low_confidence: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            high_confidence: 0.7,
            low_confidence: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Tracks classified concurrently
    pub max_parallel: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        let max_parallel = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self { max_parallel }
    }
}

impl ClassifierConfig {
    /// Resolve and load the config file, then validate it
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let source = ConfigResolver::new(APP_NAME).resolve(cli_path);
        Self::load_from(&source)
    }

    pub fn load_from(source: &ConfigSource) -> Result<Self> {
        let config: ClassifierConfig = load_config(source)?;
        config.validate()?;
        debug!(source = ?source, "Classifier configuration ready");
        Ok(config)
    }

    /// Reject weights and thresholds that would make scoring meaningless
    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let mut weights = vec![
            ("scoring.tags.metadata_weight", scoring.tags.metadata_weight),
            ("scoring.tags.provider_weight", scoring.tags.provider_weight),
            ("scoring.tags.default_provider_weight", scoring.tags.default_provider_weight),
            ("scoring.tags.alias_factor", scoring.tags.alias_factor),
            ("scoring.keywords.per_hit", scoring.keywords.per_hit),
            ("scoring.keywords.max_score", scoring.keywords.max_score),
            ("scoring.bpm.weight", scoring.bpm.weight),
            ("scoring.ai.boost", scoring.ai.boost),
            ("scoring.ai.tag_score", scoring.ai.tag_score),
            ("scoring.ai.remix_score", scoring.ai.remix_score),
            ("scoring.ai.secondary_score", scoring.ai.secondary_score),
            ("scoring.filename.path_score", scoring.filename.path_score),
            ("scoring.filename.family_score", scoring.filename.family_score),
            ("scoring.filename.structure_score", scoring.filename.structure_score),
            ("scoring.filename.short_stem_score", scoring.filename.short_stem_score),
            ("scoring.filename.separator_score", scoring.filename.separator_score),
        ];
        for weight in scoring.tags.named_provider_weights.values() {
            weights.push(("scoring.tags.named_provider_weights", *weight));
        }

        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ClassifierError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.statistics.low_confidence > self.statistics.high_confidence {
            return Err(ClassifierError::Config(format!(
                "statistics.low_confidence ({}) exceeds statistics.high_confidence ({})",
                self.statistics.low_confidence, self.statistics.high_confidence
            )));
        }

        if self.batch.max_parallel == 0 {
            return Err(ClassifierError::Config(
                "batch.max_parallel must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
