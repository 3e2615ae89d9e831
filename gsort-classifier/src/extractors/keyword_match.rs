//! Keyword Match Extractor
//!
//! Looks for every taxonomy keyword as a substring of one lowercased search
//! text built from the track's free-text fields. Each hit adds `per_hit`; the
//! per-genre total is capped at `max_score` so keyword-heavy genres cannot
//! dominate. Genres without hits are omitted.

use crate::config::KeywordScoring;
use crate::evidence::EvidenceBag;
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreEntry, ScoreMap};

pub struct KeywordExtractor {
    scoring: KeywordScoring,
}

impl KeywordExtractor {
    pub fn new(scoring: KeywordScoring) -> Self {
        Self { scoring }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(KeywordScoring::default())
    }
}

/// Title, artist, album, genre tags, comment, metadata tags and provider tags
fn search_text(bag: &EvidenceBag) -> String {
    let mut parts: Vec<&str> = vec![bag.title.as_str(), bag.artist.as_str(), bag.album.as_str()];
    parts.extend(bag.genres.iter().map(String::as_str));
    parts.push(bag.comment.as_str());
    parts.extend(bag.tags.iter().map(String::as_str));
    parts.extend(bag.all_provider_tags());

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl EvidenceExtractor for KeywordExtractor {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();
        let text = search_text(bag);
        if text.is_empty() {
            return scores;
        }

        for genre in taxonomy.genres() {
            let found: Vec<&str> = genre
                .keywords
                .iter()
                .map(String::as_str)
                .filter(|k| !k.is_empty() && text.contains(*k))
                .collect();
            if found.is_empty() {
                continue;
            }

            let raw = found.len() as f64 * self.scoring.per_hit;
            scores.insert(
                genre.id.as_str(),
                ScoreEntry {
                    score: raw.min(self.scoring.max_score),
                    sources: vec![format!("keywords:{}", found.join(","))],
                },
            );
        }

        scores
    }
}
