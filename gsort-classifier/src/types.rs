//! Core Types and Trait Definitions for gsort-classifier
//!
//! Defines the scoring currency shared by every stage of the fusion engine:
//! - **Extractors:** `EvidenceExtractor` produces a `ScoreMap` per track
//! - **Aggregation:** `AggregatedScore` per genre with per-extractor breakdown
//! - **Decision:** `ClassificationResult`
//!
//! All score maps are insertion-ordered. Ranking ties are broken by the order in
//! which genres were first scored, so iteration order is part of the contract.

use crate::evidence::EvidenceBag;
use crate::taxonomy::Taxonomy;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Genre id used when no extractor produced any evidence
pub const UNKNOWN_GENRE: &str = "unknown";

/// Folder suggested for the unknown genre
pub const UNKNOWN_FOLDER: &str = "Other";

// ============================================================================
// Ordered map
// ============================================================================

/// String-keyed map that preserves insertion order.
///
/// Serialises as a JSON object in insertion order. Lookups are linear; maps
/// here hold at most a few dozen genres.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace. A replaced value keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Value for `key`, appending a default entry if it is absent
    pub fn entry_or_default(&mut self, key: &str) -> &mut V
    where
        V: Default,
    {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map with string keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ============================================================================
// Extractor output
// ============================================================================

/// One extractor's opinion about one genre
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Score contribution (unbounded, typically 0.0-1.2)
    pub score: f64,
    /// Human-readable provenance ("why this score")
    pub sources: Vec<String>,
}

/// Partial score map produced by a single extractor call
pub type ScoreMap = OrderedMap<ScoreEntry>;

impl OrderedMap<ScoreEntry> {
    /// Add `score` to `genre` and record where it came from.
    ///
    /// Contributions accumulate; an existing entry is never overwritten.
    pub fn add(&mut self, genre: &str, score: f64, source: impl Into<String>) {
        let entry = self.entry_or_default(genre);
        entry.score += score;
        entry.sources.push(source.into());
    }

    /// Add `score` to `genre`; `source` is recorded only if this creates the entry
    pub fn add_bonus(&mut self, genre: &str, score: f64, source: impl Into<String>) {
        if self.contains_key(genre) {
            self.entry_or_default(genre).score += score;
        } else {
            self.add(genre, score, source);
        }
    }

    /// Score for `genre`, 0.0 when absent
    pub fn score(&self, genre: &str) -> f64 {
        self.get(genre).map(|e| e.score).unwrap_or(0.0)
    }
}

/// Evidence extractor trait
///
/// Every extractor is a pure function of the evidence bag and the read-only
/// taxonomy. Malformed evidence yields an empty map; extractors never fail.
///
/// # Extractors (execution order)
/// 1. `genre_tags` - Tag/alias match
/// 2. `keywords` - Free-text keyword match
/// 3. `bpm` - Tempo range proximity
/// 4. `audio_features` - Provider audio-feature thresholds
/// 5. `local_audio` - Local analysis block (only when present)
/// 6. `ai_analysis` - AI / provider opinion fusion
/// 7. `filename` - Filename and path heuristics
pub trait EvidenceExtractor: Send + Sync {
    /// Extractor name recorded in the per-genre breakdown
    fn name(&self) -> &'static str;

    /// Whether this extractor has anything to look at for this track
    fn is_available(&self, _bag: &EvidenceBag) -> bool {
        true
    }

    /// Score the evidence bag
    fn extract(&self, bag: &EvidenceBag, taxonomy: &Taxonomy) -> ScoreMap;
}

// ============================================================================
// Aggregation and decision output
// ============================================================================

/// Running total for one genre across all extractors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedScore {
    /// Sum of every extractor's contribution
    pub total_score: f64,
    /// Provenance strings from every contributing extractor, in merge order
    pub sources: Vec<String>,
    /// Extractor name → that extractor's contribution
    pub breakdown: OrderedMap<f64>,
}

/// Audit trail attached to every classification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    /// Genre → total score, ranked
    pub all_scores: OrderedMap<f64>,
    /// Genre → full aggregated score, ranked
    pub score_breakdown: OrderedMap<AggregatedScore>,
}

/// Final decision for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Best-scoring genre, or `"unknown"`
    pub primary_genre: String,
    /// Up to two runner-up genres above the secondary threshold
    pub secondary_genres: Vec<String>,
    /// Total score of the primary genre.
    ///
    /// A relative ranking score, not a probability; not normalised to [0, 1].
    pub confidence_score: f64,
    /// Provenance strings behind the primary genre
    pub classification_sources: Vec<String>,
    /// Output bucket name for the primary genre
    pub suggested_folder: String,
    #[serde(default)]
    pub analysis_details: AnalysisDetails,
}

impl ClassificationResult {
    /// Result for a track with no evidence at all
    pub fn unknown() -> Self {
        Self {
            primary_genre: UNKNOWN_GENRE.to_string(),
            secondary_genres: Vec::new(),
            confidence_score: 0.0,
            classification_sources: Vec::new(),
            suggested_folder: UNKNOWN_FOLDER.to_string(),
            analysis_details: AnalysisDetails::default(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.primary_genre == UNKNOWN_GENRE
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_preserves_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("trance", 1);
        map.insert("ambient", 2);
        map.insert("house", 3);
        map.insert("ambient", 9);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["trance", "ambient", "house"]);
        assert_eq!(map.get("ambient"), Some(&9), "Replaced value keeps its slot");
    }

    #[test]
    fn test_score_map_accumulates() {
        let mut scores = ScoreMap::new();
        scores.add("techno", 0.3, "first");
        scores.add("house", 0.2, "other");
        scores.add("techno", 0.4, "second");

        let techno = scores.get("techno").unwrap();
        assert!((techno.score - 0.7).abs() < 1e-9);
        assert_eq!(techno.sources, vec!["first", "second"]);
        assert_eq!(scores.score("missing"), 0.0);
    }

    #[test]
    fn test_ordered_map_json_round_trip_keeps_order() {
        let map: OrderedMap<f64> = vec![("zeta", 0.5), ("alpha", 0.25)].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":0.5,"alpha":0.25}"#);

        let back: OrderedMap<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_unknown_result() {
        let result = ClassificationResult::unknown();
        assert!(result.is_unknown());
        assert_eq!(result.confidence_score, 0.0);
        assert!(result.secondary_genres.is_empty());
        assert_eq!(result.suggested_folder, "Other");
    }
}
