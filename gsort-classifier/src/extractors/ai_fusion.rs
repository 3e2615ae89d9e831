//! AI/Provider-Opinion Fusion Extractor
//!
//! Folds externally computed genre opinions into the score map.
//!
//! # Trust hierarchy
//! 1. AI analysis: `confidence × boost` (1.2) when confidence > 0.3
//! 2. Remix style of a remix: flat 0.8, so remixes follow the remix's style
//!    rather than the source track's genre
//! 3. Provider primary genre: raw confidence when confidence > 0.4
//! 4. Provider secondary genre: flat 0.4, ungated
//!
//! AI tags that resolve through the alias table add a flat 0.3 each.
//!
//! An unavailable or silent AI provider contributes nothing; that state is
//! read from the bag, never inferred from a missing field.

use crate::config::AiScoring;
use crate::evidence::{AiOpinion, EvidenceBag, ProviderOpinion};
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreMap};
use tracing::debug;

pub struct AiFusionExtractor {
    scoring: AiScoring,
}

impl AiFusionExtractor {
    pub fn new(scoring: AiScoring) -> Self {
        Self { scoring }
    }

    fn score_ai(&self, ai: &AiOpinion, taxonomy: &Taxonomy, scores: &mut ScoreMap) {
        if !ai.genre.is_empty() && ai.confidence > self.scoring.min_confidence {
            scores.add(
                &ai.genre,
                ai.confidence * self.scoring.boost,
                format!("ai_primary:{:.2}", ai.confidence),
            );

            for tag in &ai.tags {
                if let Some(mapped) = taxonomy.aliases().resolve(tag) {
                    scores.add(mapped, self.scoring.tag_score, format!("ai_tag:{}", tag));
                }
            }
        }

        if ai.is_remix {
            if let Some(style) = ai.remix_style.as_deref() {
                let target = taxonomy.aliases().resolve(style).unwrap_or(style);
                scores.add(target, self.scoring.remix_score, "ai_remix_style");
            }
        }
    }
}

impl Default for AiFusionExtractor {
    fn default() -> Self {
        Self::new(AiScoring::default())
    }
}

impl EvidenceExtractor for AiFusionExtractor {
    fn name(&self) -> &'static str {
        "ai_analysis"
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();

        match &bag.ai {
            ProviderOpinion::Found(ai) => self.score_ai(ai, taxonomy, &mut scores),
            ProviderOpinion::NoMatch => {}
            ProviderOpinion::Unavailable(reason) => {
                debug!(reason = %reason, "AI analysis unavailable, skipping");
            }
        }

        if let Some(primary) = &bag.provider_primary {
            if primary.confidence > self.scoring.provider_min_confidence {
                scores.add(
                    &primary.genre,
                    primary.confidence,
                    format!("web_primary:{:.2}", primary.confidence),
                );
            }
        }

        if let Some(secondary) = &bag.provider_secondary {
            scores.add(secondary, self.scoring.secondary_score, "web_secondary");
        }

        scores
    }
}
