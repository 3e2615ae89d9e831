//! Evidence Normalization
//!
//! Collapses raw track metadata and an optional provider response into the
//! single [`EvidenceBag`] every extractor reads.
//!
//! # Input leniency
//! Input records come from tag readers and third-party lookups, so every field
//! is optional and accepts loosely-typed JSON: numbers where strings are
//! expected (and the reverse), a single string where a list is expected, and
//! `null` anywhere. Unusable values become empty / `None`; deserialisation of a
//! well-formed JSON object never fails because of a field's shape.
//!
//! # BPM priority
//! metadata > provider > AI analysis (first non-blank value wins)

use crate::taxonomy::AudioFeature;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Provider-status key for the AI analysis block
pub const AI_PROVIDER: &str = "ai_analysis";

/// Named providers with a fixed position; any others follow alphabetically
const PROVIDER_ORDER: &[&str] = &["spotify", "lastfm", "web"];

// ============================================================================
// Lenient field decoding
// ============================================================================

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn de_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text).unwrap_or_default())
}

fn de_string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(other) => scalar_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn de_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_number))
}

fn de_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(de_opt_f64(deserializer)?.unwrap_or(0.0))
}

fn de_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        _ => false,
    })
}

/// Nested block; anything but a decodable object is treated as absent
pub(crate) fn de_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

/// Nested block that falls back to its default when absent or unusable
pub(crate) fn de_block_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(de_block(deserializer)?.unwrap_or_default())
}

/// Status map; undecodable entries are dropped
fn de_status_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, ProviderHealth>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(entries)) = value else {
        return Ok(BTreeMap::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|(name, health)| serde_json::from_value(health).ok().map(|h| (name, h)))
        .collect())
}

/// One provider audio feature as received.
///
/// `null`, a missing key and a blank string are all `Absent`. Anything else
/// that does not parse as a finite number is `Malformed`, which is kept apart
/// from `Absent` so the audio-feature rules can refuse a corrupt record.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FeatureValue {
    #[default]
    Absent,
    Number(f64),
    Malformed,
}

impl FeatureValue {
    pub fn number(self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FeatureValue::Absent)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, FeatureValue::Malformed)
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureValue::Number(v) => serializer.serialize_f64(*v),
            FeatureValue::Absent | FeatureValue::Malformed => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FeatureValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(Value::Null) => FeatureValue::Absent,
            Some(Value::String(s)) if s.trim().is_empty() => FeatureValue::Absent,
            Some(other) => scalar_number(&other).map_or(FeatureValue::Malformed, FeatureValue::Number),
        })
    }
}

/// Trim every entry and drop the blank ones
fn clean_list(items: &[String]) -> Vec<String> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// ============================================================================
// Input records
// ============================================================================

/// Per-track metadata as read from the file's tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTrackMetadata")]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Genre tag(s)
    pub genre: Vec<String>,
    pub bpm: String,
    pub year: String,
    pub filename: String,
    pub file_path: String,
    pub comment: String,
    pub tags: Vec<String>,
}

/// Wire form of [`TrackMetadata`]; tag readers write `genre`, `genres` or both
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawTrackMetadata {
    #[serde(deserialize_with = "de_string")]
    title: String,
    #[serde(deserialize_with = "de_string")]
    artist: String,
    #[serde(deserialize_with = "de_string")]
    album: String,
    #[serde(deserialize_with = "de_string_list")]
    genre: Vec<String>,
    #[serde(deserialize_with = "de_string_list")]
    genres: Vec<String>,
    #[serde(deserialize_with = "de_string")]
    bpm: String,
    #[serde(deserialize_with = "de_string")]
    year: String,
    #[serde(deserialize_with = "de_string")]
    filename: String,
    #[serde(deserialize_with = "de_string")]
    file_path: String,
    #[serde(deserialize_with = "de_string")]
    comment: String,
    #[serde(deserialize_with = "de_string_list")]
    tags: Vec<String>,
}

impl From<RawTrackMetadata> for TrackMetadata {
    fn from(raw: RawTrackMetadata) -> Self {
        let mut genre = raw.genre;
        for extra in raw.genres {
            if !genre.contains(&extra) {
                genre.push(extra);
            }
        }
        Self {
            title: raw.title,
            artist: raw.artist,
            album: raw.album,
            genre,
            bpm: raw.bpm,
            year: raw.year,
            filename: raw.filename,
            file_path: raw.file_path,
            comment: raw.comment,
            tags: raw.tags,
        }
    }
}

/// Availability of one external provider for this track
///
/// Replaces inferring "provider absent" from a missing block: a provider that
/// was never reachable (quota exhausted, disabled) is distinguishable from
/// one that answered with nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProviderHealth {
    Available,
    NoMatch,
    Unavailable {
        #[serde(default)]
        reason: String,
    },
}

/// AI analysis block from the provider response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiAnalysis {
    #[serde(deserialize_with = "de_string")]
    pub primary_genre: String,
    #[serde(deserialize_with = "de_f64")]
    pub confidence: f64,
    #[serde(deserialize_with = "de_string_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "de_string")]
    pub reasoning: String,
    #[serde(deserialize_with = "de_string")]
    pub bpm: String,
    #[serde(deserialize_with = "de_bool")]
    pub is_remix: bool,
    #[serde(deserialize_with = "de_string")]
    pub remix_style: String,
}

/// Locally computed audio descriptors
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAudioAnalysis {
    /// Estimated tempo in BPM
    #[serde(deserialize_with = "de_opt_f64")]
    pub tempo: Option<f64>,
    /// Mean spectral centroid in Hz
    #[serde(deserialize_with = "de_opt_f64")]
    pub spectral_centroid: Option<f64>,
    #[serde(deserialize_with = "de_opt_f64")]
    pub zero_crossing_rate: Option<f64>,
}

/// Genre and tag lists reported by one named provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderTags {
    #[serde(deserialize_with = "de_string_list")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "de_string_list")]
    pub tags: Vec<String>,
}

/// `additional_info` block of a provider response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditionalInfo {
    #[serde(deserialize_with = "de_block", skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
    #[serde(deserialize_with = "de_block", skip_serializing_if = "Option::is_none")]
    pub local_audio: Option<LocalAudioAnalysis>,
    /// Remaining keys, one block per named provider
    #[serde(flatten)]
    pub providers: BTreeMap<String, Value>,
}

impl AdditionalInfo {
    /// Decode one named provider block; non-object values yield `None`
    pub fn provider(&self, name: &str) -> Option<ProviderTags> {
        let value = self.providers.get(name)?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Provider names in scoring order
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = PROVIDER_ORDER
            .iter()
            .copied()
            .filter(|name| self.providers.contains_key(*name))
            .collect();
        // BTreeMap keys already iterate in lexicographic order
        names.extend(
            self.providers
                .keys()
                .map(String::as_str)
                .filter(|name| !PROVIDER_ORDER.contains(name)),
        );
        names
    }
}

/// Structured hints returned by the external lookup layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderResponse {
    #[serde(deserialize_with = "de_string")]
    pub primary_genre: String,
    #[serde(deserialize_with = "de_f64")]
    pub confidence: f64,
    #[serde(deserialize_with = "de_string")]
    pub secondary_genre: String,
    #[serde(deserialize_with = "de_string_list")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "de_string_list")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "FeatureValue::is_absent")]
    pub energy: FeatureValue,
    #[serde(skip_serializing_if = "FeatureValue::is_absent")]
    pub danceability: FeatureValue,
    #[serde(skip_serializing_if = "FeatureValue::is_absent")]
    pub valence: FeatureValue,
    #[serde(skip_serializing_if = "FeatureValue::is_absent")]
    pub acousticness: FeatureValue,
    #[serde(deserialize_with = "de_string")]
    pub bpm: String,
    #[serde(deserialize_with = "de_block_or_default")]
    pub additional_info: AdditionalInfo,
    /// Provider name → health; absent providers are assumed available
    #[serde(deserialize_with = "de_status_map")]
    pub provider_status: BTreeMap<String, ProviderHealth>,
}

// ============================================================================
// Normalized evidence
// ============================================================================

/// Outcome of consulting one provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOpinion<T> {
    /// The provider answered
    Found(T),
    /// The provider was consulted and had nothing to say
    NoMatch,
    /// The provider could not be consulted
    Unavailable(String),
}

impl<T> Default for ProviderOpinion<T> {
    fn default() -> Self {
        ProviderOpinion::NoMatch
    }
}

impl<T> ProviderOpinion<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            ProviderOpinion::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderOpinion::Unavailable(_))
    }
}

/// Normalized AI analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiOpinion {
    /// Trimmed, lowercased; may be empty when only remix info is known
    pub genre: String,
    pub confidence: f64,
    pub tags: Vec<String>,
    pub reasoning: String,
    pub is_remix: bool,
    /// Lowercased with spaces replaced by underscores
    pub remix_style: Option<String>,
}

/// A provider genre with its reported confidence
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGenre {
    pub genre: String,
    pub confidence: f64,
}

/// Genre/tag lists from one named provider
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProviderGenres {
    pub provider: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
}

/// Provider audio features; `None` when absent or unusable
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioFeatures {
    pub energy: Option<f64>,
    pub danceability: Option<f64>,
    pub valence: Option<f64>,
    pub acousticness: Option<f64>,
    /// At least one feature was present but not a number
    pub malformed: bool,
}

impl AudioFeatures {
    /// Build from (energy, danceability, valence, acousticness)
    pub fn from_values(values: [FeatureValue; 4]) -> Self {
        let [energy, danceability, valence, acousticness] = values;
        Self {
            energy: energy.number(),
            danceability: danceability.number(),
            valence: valence.number(),
            acousticness: acousticness.number(),
            malformed: values.iter().any(FeatureValue::is_malformed),
        }
    }

    pub fn get(&self, feature: AudioFeature) -> Option<f64> {
        match feature {
            AudioFeature::Energy => self.energy,
            AudioFeature::Danceability => self.danceability,
            AudioFeature::Valence => self.valence,
            AudioFeature::Acousticness => self.acousticness,
        }
    }

    /// No feature was supplied at all
    pub fn is_empty(&self) -> bool {
        !self.malformed
            && self.energy.is_none()
            && self.danceability.is_none()
            && self.valence.is_none()
            && self.acousticness.is_none()
    }
}

/// Read-only per-track evidence consumed by every extractor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvidenceBag {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Genre tags from the file's metadata
    pub genres: Vec<String>,
    pub comment: String,
    /// Free-text tags from the file's metadata
    pub tags: Vec<String>,
    pub filename: String,
    pub file_path: String,
    /// Effective BPM string after applying the source priority
    pub bpm: String,
    /// Aggregate provider genre list
    pub provider_genres: Vec<String>,
    /// Aggregate provider tag list
    pub provider_tags: Vec<String>,
    /// Per-provider lists in scoring order
    pub named_providers: Vec<NamedProviderGenres>,
    pub features: AudioFeatures,
    pub local_audio: Option<LocalAudioAnalysis>,
    pub ai: ProviderOpinion<AiOpinion>,
    /// Provider primary genre (never "unknown")
    pub provider_primary: Option<WeightedGenre>,
    pub provider_secondary: Option<String>,
}

impl EvidenceBag {
    /// Build the bag for one track. Never fails.
    pub fn from_sources(metadata: &TrackMetadata, provider: Option<&ProviderResponse>) -> Self {
        let mut bag = EvidenceBag {
            title: metadata.title.trim().to_string(),
            artist: metadata.artist.trim().to_string(),
            album: metadata.album.trim().to_string(),
            genres: clean_list(&metadata.genre),
            comment: metadata.comment.trim().to_string(),
            tags: clean_list(&metadata.tags),
            filename: metadata.filename.trim().to_string(),
            file_path: metadata.file_path.trim().to_string(),
            bpm: metadata.bpm.trim().to_string(),
            ..Default::default()
        };

        let Some(response) = provider else {
            return bag;
        };

        bag.provider_genres = clean_list(&response.genres);
        bag.provider_tags = clean_list(&response.tags);
        bag.features = AudioFeatures::from_values([
            response.energy,
            response.danceability,
            response.valence,
            response.acousticness,
        ]);
        bag.local_audio = response.additional_info.local_audio;

        bag.provider_primary = non_blank(&response.primary_genre)
            .map(str::to_lowercase)
            .filter(|genre| genre != crate::types::UNKNOWN_GENRE)
            .map(|genre| WeightedGenre {
                genre,
                confidence: response.confidence,
            });
        bag.provider_secondary = non_blank(&response.secondary_genre).map(str::to_lowercase);

        bag.named_providers = named_providers(response);
        bag.ai = ai_opinion(response);

        if bag.bpm.is_empty() {
            if let Some(bpm) = non_blank(&response.bpm) {
                bag.bpm = bpm.to_string();
            } else if let ProviderOpinion::Found(_) = bag.ai {
                if let Some(bpm) = response
                    .additional_info
                    .ai_analysis
                    .as_ref()
                    .and_then(|ai| non_blank(&ai.bpm))
                {
                    bag.bpm = bpm.to_string();
                }
            }
        }

        bag
    }

    /// Effective BPM as a number; `None` when blank or non-numeric
    pub fn bpm_value(&self) -> Option<f64> {
        self.bpm.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Provider tags from the aggregate list and every named provider
    pub fn all_provider_tags(&self) -> impl Iterator<Item = &str> {
        self.provider_tags
            .iter()
            .chain(self.named_providers.iter().flat_map(|p| p.tags.iter()))
            .map(String::as_str)
    }
}

fn named_providers(response: &ProviderResponse) -> Vec<NamedProviderGenres> {
    let info = &response.additional_info;
    info.provider_names()
        .into_iter()
        .filter(|name| match response.provider_status.get(*name) {
            Some(ProviderHealth::Available) | None => true,
            Some(health) => {
                debug!(provider = %name, health = ?health, "Skipping provider block");
                false
            }
        })
        .filter_map(|name| {
            let block = info.provider(name)?;
            let genres = clean_list(&block.genres);
            let tags = clean_list(&block.tags);
            if genres.is_empty() && tags.is_empty() {
                return None;
            }
            Some(NamedProviderGenres {
                provider: name.to_string(),
                genres,
                tags,
            })
        })
        .collect()
}

fn ai_opinion(response: &ProviderResponse) -> ProviderOpinion<AiOpinion> {
    match response.provider_status.get(AI_PROVIDER) {
        Some(ProviderHealth::Unavailable { reason }) => {
            return ProviderOpinion::Unavailable(reason.clone());
        }
        Some(ProviderHealth::NoMatch) => return ProviderOpinion::NoMatch,
        Some(ProviderHealth::Available) | None => {}
    }

    let Some(ai) = response.additional_info.ai_analysis.as_ref() else {
        return ProviderOpinion::NoMatch;
    };

    ProviderOpinion::Found(AiOpinion {
        genre: ai.primary_genre.trim().to_lowercase(),
        confidence: ai.confidence,
        tags: clean_list(&ai.tags),
        reasoning: ai.reasoning.trim().to_string(),
        is_remix: ai.is_remix,
        remix_style: non_blank(&ai.remix_style).map(|s| s.to_lowercase().replace(' ', "_")),
    })
}
