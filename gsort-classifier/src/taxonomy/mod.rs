//! Genre Taxonomy
//!
//! Immutable, data-driven tables consulted by every extractor:
//! - genres with alias and keyword sets (ordered)
//! - tempo ranges (ordered, overlapping on purpose)
//! - filename pattern tables
//! - audio-feature threshold rules
//! - folder names
//!
//! The built-in taxonomy is built once per process and shared read-only.
//! Custom taxonomies for tests are assembled with [`TaxonomyBuilder`].

pub mod alias_resolver;
mod builtin;

pub use alias_resolver::AliasResolver;

use crate::evidence::AudioFeatures;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<Taxonomy>> = Lazy::new(|| Arc::new(builtin::build()));

/// Canonical genre entry
#[derive(Debug, Clone, PartialEq)]
pub struct GenreDef {
    /// Canonical identifier (e.g. "drum_and_bass")
    pub id: String,
    /// Lowercased alias / subgenre strings, in registration order
    pub aliases: Vec<String>,
    /// Lowercased descriptive keywords
    pub keywords: Vec<String>,
}

impl GenreDef {
    /// Case-insensitive exact alias match (`lowered` must already be lowercase)
    pub fn has_alias(&self, lowered: &str) -> bool {
        self.aliases.iter().any(|a| a == lowered)
    }
}

/// Inclusive tempo interval for a genre bucket
#[derive(Debug, Clone, PartialEq)]
pub struct TempoRange {
    pub genre: String,
    pub min_bpm: f64,
    pub max_bpm: f64,
}

impl TempoRange {
    pub fn contains(&self, bpm: f64) -> bool {
        self.min_bpm <= bpm && bpm <= self.max_bpm
    }

    /// 1.0 at the midpoint, falling linearly to 0.0 at either edge.
    ///
    /// Callers check [`TempoRange::contains`] first. A degenerate range
    /// (min == max) is a single point and scores 1.0 there.
    pub fn proximity(&self, bpm: f64) -> f64 {
        let half_width = (self.max_bpm - self.min_bpm) / 2.0;
        if half_width <= 0.0 {
            return 1.0;
        }
        let center = (self.min_bpm + self.max_bpm) / 2.0;
        1.0 - ((bpm - center).abs() / half_width)
    }
}

/// Which filename pass a pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Coarse genre-family vocabulary, matched against the filename
    Family,
    /// Structural shape (numeric, segmented), matched against the filename stem
    Structure,
}

/// One filename regex and the genre it votes for
#[derive(Debug, Clone)]
pub struct FilenamePattern {
    pub genre: String,
    pub regex: Regex,
    pub kind: PatternKind,
}

/// Provider audio feature referenced by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFeature {
    Energy,
    Danceability,
    Valence,
    Acousticness,
}

/// Threshold direction (strict)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureCondition {
    pub feature: AudioFeature,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl FeatureCondition {
    /// A missing feature never satisfies a threshold
    pub fn holds(&self, features: &AudioFeatures) -> bool {
        match features.get(self.feature) {
            Some(value) => match self.comparison {
                Comparison::Above => value > self.threshold,
                Comparison::Below => value < self.threshold,
            },
            None => false,
        }
    }
}

/// All-of threshold rule contributing a flat score to one genre
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRule {
    pub genre: String,
    pub label: String,
    pub score: f64,
    pub conditions: Vec<FeatureCondition>,
}

impl FeatureRule {
    pub fn matches(&self, features: &AudioFeatures) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.holds(features))
    }
}

/// Read-only genre taxonomy
#[derive(Debug, Clone)]
pub struct Taxonomy {
    genres: Vec<GenreDef>,
    tempo_ranges: Vec<TempoRange>,
    filename_patterns: Vec<FilenamePattern>,
    feature_rules: Vec<FeatureRule>,
    aliases: AliasResolver,
    folders: HashMap<String, String>,
}

impl Taxonomy {
    /// Shared built-in electronic-music taxonomy
    pub fn builtin() -> Arc<Taxonomy> {
        Arc::clone(&BUILTIN)
    }

    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    pub fn genres(&self) -> &[GenreDef] {
        &self.genres
    }

    pub fn genre(&self, id: &str) -> Option<&GenreDef> {
        self.genres.iter().find(|g| g.id == id)
    }

    pub fn tempo_ranges(&self) -> &[TempoRange] {
        &self.tempo_ranges
    }

    pub fn filename_patterns(&self) -> &[FilenamePattern] {
        &self.filename_patterns
    }

    pub fn feature_rules(&self) -> &[FeatureRule] {
        &self.feature_rules
    }

    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    /// Output folder for a genre: mapped name, else the id title-cased
    pub fn folder_name(&self, genre: &str) -> String {
        if genre.is_empty() {
            return "Unknown".to_string();
        }
        match self.folders.get(&genre.to_lowercase()) {
            Some(folder) => folder.clone(),
            None => title_case(genre),
        }
    }
}

/// Word-wise title case: a letter is upper-cased when it follows a non-letter
/// (`drum_and_bass` → `Drum_And_Bass`, `80s` → `80S`).
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Builder for custom taxonomies
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    genres: Vec<GenreDef>,
    tempo_ranges: Vec<TempoRange>,
    filename_patterns: Vec<FilenamePattern>,
    feature_rules: Vec<FeatureRule>,
    aliases: Vec<(String, String)>,
    folders: HashMap<String, String>,
}

impl TaxonomyBuilder {
    /// Register a genre. Re-registering an id replaces its sets in place.
    pub fn genre(mut self, id: &str, aliases: &[&str], keywords: &[&str]) -> Self {
        let def = GenreDef {
            id: id.to_string(),
            aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        };
        match self.genres.iter_mut().find(|g| g.id == id) {
            Some(existing) => *existing = def,
            None => self.genres.push(def),
        }
        self
    }

    pub fn tempo_range(mut self, genre: &str, min_bpm: f64, max_bpm: f64) -> Self {
        self.tempo_ranges.push(TempoRange {
            genre: genre.to_string(),
            min_bpm,
            max_bpm,
        });
        self
    }

    /// Register an alias for the resolver, in order
    pub fn alias(mut self, alias: &str, genre: &str) -> Self {
        self.aliases.push((alias.to_lowercase(), genre.to_string()));
        self
    }

    pub fn filename_pattern(
        mut self,
        genre: &str,
        pattern: &str,
        kind: PatternKind,
    ) -> Result<Self, regex::Error> {
        self.filename_patterns.push(FilenamePattern {
            genre: genre.to_string(),
            regex: Regex::new(pattern)?,
            kind,
        });
        Ok(self)
    }

    pub fn feature_rule(mut self, rule: FeatureRule) -> Self {
        self.feature_rules.push(rule);
        self
    }

    pub fn folder(mut self, genre: &str, folder: &str) -> Self {
        self.folders.insert(genre.to_lowercase(), folder.to_string());
        self
    }

    pub fn build(self) -> Taxonomy {
        Taxonomy {
            genres: self.genres,
            tempo_ranges: self.tempo_ranges,
            filename_patterns: self.filename_patterns,
            feature_rules: self.feature_rules,
            aliases: AliasResolver::new(self.aliases),
            folders: self.folders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_shared() {
        let a = Taxonomy::builtin();
        let b = Taxonomy::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_builtin_genre_order_starts_with_ambient_family() {
        let taxonomy = Taxonomy::builtin();
        let ids: Vec<&str> = taxonomy.genres().iter().take(3).map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["ambient", "dark_ambient", "space_ambient"]);
    }

    #[test]
    fn test_duplicate_definitions_keep_first_position_and_last_sets() {
        let taxonomy = Taxonomy::builtin();
        let ids: Vec<&str> = taxonomy.genres().iter().map(|g| g.id.as_str()).collect();
        let psydub = ids.iter().position(|id| *id == "psydub").unwrap();
        let chill_dub = ids.iter().position(|id| *id == "chill_dub").unwrap();
        assert!(psydub < chill_dub, "psydub sits in the dub family block");
        assert_eq!(ids.iter().filter(|id| **id == "psydub").count(), 1);

        let def = taxonomy.genre("psydub").unwrap();
        assert!(def.has_alias("bass music"));
        assert!(def.keywords.contains(&"trippy".to_string()));
    }

    #[test]
    fn test_tempo_proximity() {
        let range = TempoRange {
            genre: "techno".into(),
            min_bpm: 120.0,
            max_bpm: 140.0,
        };
        assert!((range.proximity(130.0) - 1.0).abs() < 1e-9);
        assert!((range.proximity(128.0) - 0.8).abs() < 1e-9);
        assert!(range.proximity(140.0).abs() < 1e-9);
        assert!(range.contains(120.0) && range.contains(140.0));
        assert!(!range.contains(140.5));
    }

    #[test]
    fn test_folder_names() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.folder_name("drum_and_bass"), "Drum And Bass");
        assert_eq!(taxonomy.folder_name("IDM"), "IDM");
        assert_eq!(taxonomy.folder_name("electronic"), "Electronic");
        assert_eq!(taxonomy.folder_name("hard_dance"), "Hard_Dance");
        assert_eq!(taxonomy.folder_name(""), "Unknown");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("drum_and_bass"), "Drum_And_Bass");
        assert_eq!(title_case("DEEP house"), "Deep House");
        assert_eq!(title_case("80s"), "80S");
    }

    #[test]
    fn test_feature_rule_requires_all_features_present() {
        let rule = FeatureRule {
            genre: "ambient".into(),
            label: "low_energy_valence".into(),
            score: 0.6,
            conditions: vec![
                FeatureCondition {
                    feature: AudioFeature::Energy,
                    comparison: Comparison::Below,
                    threshold: 0.3,
                },
                FeatureCondition {
                    feature: AudioFeature::Valence,
                    comparison: Comparison::Below,
                    threshold: 0.4,
                },
            ],
        };

        let missing_valence = AudioFeatures {
            energy: Some(0.1),
            ..Default::default()
        };
        assert!(!rule.matches(&missing_valence));

        let both = AudioFeatures {
            energy: Some(0.1),
            valence: Some(0.2),
            ..Default::default()
        };
        assert!(rule.matches(&both));
    }

    #[test]
    fn test_builder_rejects_bad_pattern() {
        let result = Taxonomy::builder().filename_pattern("x", "(unclosed", PatternKind::Family);
        assert!(result.is_err());
    }
}
