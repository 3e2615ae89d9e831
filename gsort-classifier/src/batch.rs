//! Batch Classification
//!
//! Classifies many tracks concurrently. Each track runs on a blocking worker
//! task; at most `max_parallel` run at once. Output order matches input order.
//!
//! # Error isolation
//! A worker that panics yields the `unknown` result for its track and a
//! warning; the rest of the batch is unaffected.

use crate::classifier::GenreClassifier;
use crate::error::{ClassifierError, Result};
use crate::evidence::{de_block, de_block_or_default, ProviderResponse, TrackMetadata};
use crate::types::ClassificationResult;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// One track in a batch file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTrackInput")]
pub struct TrackInput {
    pub metadata: TrackMetadata,
    /// Provider response, if a lookup was performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderResponse>,
}

/// Wire form of [`TrackInput`]; older files carry the response as `web_info`
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawTrackInput {
    #[serde(deserialize_with = "de_block_or_default")]
    metadata: TrackMetadata,
    #[serde(deserialize_with = "de_block")]
    provider: Option<ProviderResponse>,
    #[serde(deserialize_with = "de_block")]
    web_info: Option<ProviderResponse>,
}

impl From<RawTrackInput> for TrackInput {
    fn from(raw: RawTrackInput) -> Self {
        Self {
            metadata: raw.metadata,
            provider: raw.provider.or(raw.web_info),
        }
    }
}

impl TrackInput {
    pub fn new(metadata: TrackMetadata, provider: Option<ProviderResponse>) -> Self {
        Self { metadata, provider }
    }
}

pub struct BatchClassifier {
    classifier: Arc<GenreClassifier>,
    max_parallel: usize,
}

impl BatchClassifier {
    pub fn new(classifier: Arc<GenreClassifier>, max_parallel: usize) -> Self {
        Self {
            classifier,
            max_parallel: max_parallel.max(1),
        }
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Classify every track, preserving input order
    pub async fn classify_all(&self, tracks: Vec<TrackInput>) -> Vec<ClassificationResult> {
        let total = tracks.len();
        let started = Instant::now();
        info!(tracks = total, max_parallel = self.max_parallel, "Classifying batch");

        let semaphore = Arc::new(Semaphore::new(self.max_parallel));
        let futures = tracks.into_iter().enumerate().map(|(index, track)| {
            let classifier = Arc::clone(&self.classifier);
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        warn!(index, error = %e, "Worker pool closed, track left unclassified");
                        return ClassificationResult::unknown();
                    }
                };

                let handle = tokio::task::spawn_blocking(move || {
                    classifier.classify(&track.metadata, track.provider.as_ref())
                });

                match handle.await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!(
                            index,
                            error = %e,
                            "Track classification failed, recording as unknown"
                        );
                        ClassificationResult::unknown()
                    }
                }
            }
        });

        let results = join_all(futures).await;

        let unknown = results.iter().filter(|r| r.is_unknown()).count();
        info!(
            tracks = total,
            unknown,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch classified"
        );
        results
    }
}

/// Read a JSON array of [`TrackInput`]
///
/// The file must be an array. An element that is not a track record becomes
/// an empty track (classified `unknown`) and is logged.
pub fn load_tracks(path: &Path) -> Result<Vec<TrackInput>> {
    let records: Vec<Value> = read_json(path)?;
    let tracks = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).unwrap_or_else(|e| {
                warn!(
                    path = %path.display(),
                    index,
                    error = %e,
                    "Unreadable track record, classifying as unknown"
                );
                TrackInput::default()
            })
        })
        .collect();
    Ok(tracks)
}

/// Read a JSON array of results (as written by [`write_results`])
pub fn load_results(path: &Path) -> Result<Vec<ClassificationResult>> {
    read_json(path)
}

/// Write results as a pretty-printed JSON array
pub fn write_results(path: &Path, results: &[ClassificationResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(|e| ClassifierError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| ClassifierError::io(path, e))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| ClassifierError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| ClassifierError::json(path, e))
}
