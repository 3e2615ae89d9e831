//! Tag/Alias Match Extractor
//!
//! Scores genre strings gathered from the file's tags and from providers.
//!
//! For each raw genre string, two independent checks run and both may fire:
//! - **direct match:** the lowercased string equals an alias of a taxonomy
//!   genre → `+weight` to that genre
//! - **alias resolution:** the resolver maps the string to a genre →
//!   `+weight × alias_factor` to the mapped genre
//!
//! # Source weights
//! - metadata tags: 0.9 (highest, read from the file itself)
//! - aggregate provider list `web`: 0.7
//! - named providers: `spotify` 0.8, `lastfm` 0.6, `web` 0.5, others 0.5

use crate::config::TagScoring;
use crate::evidence::EvidenceBag;
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreMap};
use tracing::trace;

/// Source label for the file's own genre tags
const METADATA_SOURCE: &str = "metadata";

/// Source label for the aggregate provider genre list
const PROVIDER_SOURCE: &str = "web";

pub struct GenreTagExtractor {
    scoring: TagScoring,
}

impl GenreTagExtractor {
    pub fn new(scoring: TagScoring) -> Self {
        Self { scoring }
    }

    /// (raw genre, source label, weight) in scoring order
    fn candidates<'a>(&self, bag: &'a EvidenceBag) -> Vec<(&'a str, &'a str, f64)> {
        let mut candidates = Vec::new();
        candidates.extend(
            bag.genres
                .iter()
                .map(|g| (g.as_str(), METADATA_SOURCE, self.scoring.metadata_weight)),
        );
        candidates.extend(
            bag.provider_genres
                .iter()
                .map(|g| (g.as_str(), PROVIDER_SOURCE, self.scoring.provider_weight)),
        );
        for provider in &bag.named_providers {
            let weight = self.scoring.weight_for(&provider.provider);
            candidates.extend(
                provider
                    .genres
                    .iter()
                    .map(|g| (g.as_str(), provider.provider.as_str(), weight)),
            );
        }
        candidates
    }
}

impl Default for GenreTagExtractor {
    fn default() -> Self {
        Self::new(TagScoring::default())
    }
}

impl EvidenceExtractor for GenreTagExtractor {
    fn name(&self) -> &'static str {
        "genre_tags"
    }

    fn is_available(&self, bag: &EvidenceBag) -> bool {
        !bag.genres.is_empty()
            || !bag.provider_genres.is_empty()
            || bag.named_providers.iter().any(|p| !p.genres.is_empty())
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();

        for (raw, source, weight) in self.candidates(bag) {
            if raw.trim().is_empty() {
                continue;
            }
            let lowered = raw.to_lowercase();

            for genre in taxonomy.genres().iter().filter(|g| g.has_alias(&lowered)) {
                scores.add(&genre.id, weight, format!("direct_match_{}:{}", source, raw));
            }

            if let Some(mapped) = taxonomy.aliases().resolve(&lowered) {
                trace!(raw = %raw, mapped = %mapped, source = %source, "Genre tag mapped");
                scores.add(
                    mapped,
                    weight * self.scoring.alias_factor,
                    format!("mapped_{}:{}", source, raw),
                );
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::NamedProviderGenres;

    fn bag_with_genres(genres: &[&str]) -> EvidenceBag {
        EvidenceBag {
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_direct_and_mapped_fire_on_different_genres() {
        let taxonomy = Taxonomy::builtin();
        let scores = GenreTagExtractor::default().extract(&bag_with_genres(&["Deep House"]), &taxonomy);

        let deep = scores.get("deep_house").unwrap();
        assert!((deep.score - 0.9).abs() < 1e-9);
        assert_eq!(deep.sources, vec!["direct_match_metadata:Deep House"]);

        let house = scores.get("house").unwrap();
        assert!((house.score - 0.72).abs() < 1e-9);
        assert_eq!(house.sources, vec!["mapped_metadata:Deep House"]);
    }

    #[test]
    fn test_direct_and_mapped_accumulate_on_same_genre() {
        let taxonomy = Taxonomy::builtin();
        let bag = EvidenceBag {
            named_providers: vec![NamedProviderGenres {
                provider: "spotify".into(),
                genres: vec!["dnb".into()],
                tags: vec![],
            }],
            ..Default::default()
        };
        let scores = GenreTagExtractor::default().extract(&bag, &taxonomy);

        let dnb = scores.get("drum_and_bass").unwrap();
        // 0.8 direct + 0.8 * 0.8 mapped
        assert!((dnb.score - 1.44).abs() < 1e-9);
        assert_eq!(dnb.sources, vec!["direct_match_spotify:dnb", "mapped_spotify:dnb"]);
    }

    #[test]
    fn test_provider_weights() {
        let taxonomy = Taxonomy::builtin();
        let bag = EvidenceBag {
            provider_genres: vec!["classic trance".into()],
            named_providers: vec![
                NamedProviderGenres {
                    provider: "lastfm".into(),
                    genres: vec!["Synthwave".into()],
                    tags: vec![],
                },
                NamedProviderGenres {
                    provider: "discogs".into(),
                    genres: vec!["gabber".into()],
                    tags: vec![],
                },
            ],
            ..Default::default()
        };
        let scores = GenreTagExtractor::default().extract(&bag, &taxonomy);
        assert!((scores.score("trance") - 0.7).abs() < 1e-9);
        assert!((scores.score("synthwave") - 0.6).abs() < 1e-9);
        assert!((scores.score("hardcore") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unmatched_and_blank_genres_score_nothing() {
        let taxonomy = Taxonomy::builtin();
        let extractor = GenreTagExtractor::default();
        let bag = bag_with_genres(&["Polka", "   "]);
        assert!(extractor.extract(&bag, &taxonomy).is_empty());
        assert!(!extractor.is_available(&EvidenceBag::default()));
    }

    #[test]
    fn test_custom_alias_factor() {
        let taxonomy = Taxonomy::builtin();
        let extractor = GenreTagExtractor::new(TagScoring {
            alias_factor: 0.5,
            ..Default::default()
        });
        let scores = extractor.extract(&bag_with_genres(&["brostep"]), &taxonomy);
        assert!((scores.score("dubstep") - 0.45).abs() < 1e-9);
    }
}
