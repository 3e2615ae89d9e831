//! Test Helper Utilities
//!
//! Shared builders for gsort-classifier integration tests

#![allow(dead_code)]

pub mod log_capture;

use gsort_classifier::{ProviderResponse, TrackInput, TrackMetadata};
use serde_json::Value;
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Route tracing output through the test harness (RUST_LOG controls level)
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Fluent builder for track metadata
#[derive(Debug, Default)]
pub struct TrackBuilder {
    metadata: TrackMetadata,
}

impl TrackBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.metadata.title = title.to_string();
        self
    }

    pub fn artist(mut self, artist: &str) -> Self {
        self.metadata.artist = artist.to_string();
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.metadata.genre.push(genre.to_string());
        self
    }

    pub fn bpm(mut self, bpm: &str) -> Self {
        self.metadata.bpm = bpm.to_string();
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.metadata.filename = filename.to_string();
        self
    }

    pub fn file_path(mut self, file_path: &str) -> Self {
        self.metadata.file_path = file_path.to_string();
        self
    }

    pub fn build(self) -> TrackMetadata {
        self.metadata
    }

    pub fn input(self) -> TrackInput {
        TrackInput::new(self.metadata, None)
    }

    pub fn input_with(self, provider: ProviderResponse) -> TrackInput {
        TrackInput::new(self.metadata, Some(provider))
    }
}

/// Decode a provider response from inline JSON
pub fn provider(value: Value) -> ProviderResponse {
    serde_json::from_value(value).expect("test provider JSON is well-formed")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} but got {}",
        expected,
        actual
    );
}
