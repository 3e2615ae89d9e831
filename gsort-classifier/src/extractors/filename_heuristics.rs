//! Filename/Path Heuristics Extractor
//!
//! Three cumulative passes over the lowercased filename and path:
//! 1. a taxonomy genre id appearing literally in the path or filename
//! 2. family vocabulary regexes against the filename
//! 3. structural regexes against the filename stem, plus two shape priors:
//!    short stems lean minimal/experimental, heavily underscored stems lean
//!    experimental. A prior only names itself as a source when it introduces
//!    the genre.

use crate::config::FilenameScoring;
use crate::evidence::EvidenceBag;
use crate::taxonomy::{PatternKind, Taxonomy};
use crate::types::{EvidenceExtractor, ScoreMap};
use std::path::Path;

const SHORT_STEM_GENRES: &[&str] = &["minimal", "experimental"];
const SEPARATOR_GENRE: &str = "experimental";

pub struct FilenameExtractor {
    scoring: FilenameScoring,
}

impl FilenameExtractor {
    pub fn new(scoring: FilenameScoring) -> Self {
        Self { scoring }
    }
}

impl Default for FilenameExtractor {
    fn default() -> Self {
        Self::new(FilenameScoring::default())
    }
}

/// Filename without its extension
fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

impl EvidenceExtractor for FilenameExtractor {
    fn name(&self) -> &'static str {
        "filename"
    }

    fn is_available(&self, bag: &EvidenceBag) -> bool {
        !bag.filename.is_empty() || !bag.file_path.is_empty()
    }

    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap {
        let mut scores = ScoreMap::new();
        let filename = bag.filename.to_lowercase();
        let file_path = bag.file_path.to_lowercase();

        for genre in taxonomy.genres() {
            if file_path.contains(&genre.id) || filename.contains(&genre.id) {
                scores.add(
                    &genre.id,
                    self.scoring.path_score,
                    format!("path_contains:{}", genre.id),
                );
            }
        }

        if filename.is_empty() {
            return scores;
        }

        for pattern in taxonomy.filename_patterns() {
            let (subject, score, label) = match pattern.kind {
                PatternKind::Family => (filename.as_str(), self.scoring.family_score, "filename_pattern"),
                PatternKind::Structure => (stem(&filename), self.scoring.structure_score, "structure_pattern"),
            };
            if pattern.regex.is_match(subject) {
                scores.add(
                    &pattern.genre,
                    score,
                    format!("{}:{}", label, pattern.regex.as_str()),
                );
            }
        }

        let base = stem(&filename);
        if !base.is_empty() && base.chars().count() < self.scoring.short_stem_len {
            for genre in SHORT_STEM_GENRES {
                scores.add_bonus(genre, self.scoring.short_stem_score, "short_filename");
            }
        }

        if base.matches('_').count() >= self.scoring.separator_min {
            scores.add_bonus(SEPARATOR_GENRE, self.scoring.separator_score, "many_separators");
        }

        scores
    }
}
