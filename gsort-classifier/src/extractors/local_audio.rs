//! Local Audio Analysis Extractor
//!
//! Scores descriptors computed from the audio file itself (tempo, spectral
//! centroid, zero-crossing rate). Only runs when the bag carries a local
//! analysis block; the analysis is produced upstream.

use crate::evidence::{EvidenceBag, LocalAudioAnalysis};
use crate::taxonomy::Taxonomy;
use crate::types::{EvidenceExtractor, ScoreMap};

/// (upper bound exclusive, genre, score, label); the last band is open-ended
const TEMPO_BANDS: &[(f64, &str, f64, &str)] = &[
    (90.0, "ambient", 0.3, "slow_tempo"),
    (110.0, "downtempo", 0.2, "medium_tempo"),
    (130.0, "house", 0.3, "house_tempo"),
    (150.0, "techno", 0.3, "techno_tempo"),
    (180.0, "drum_and_bass", 0.3, "fast_tempo"),
    (f64::INFINITY, "hardcore", 0.2, "very_fast_tempo"),
];

/// Centroid below this (Hz) means low frequencies dominate
const LOW_CENTROID_HZ: f64 = 1000.0;
/// Centroid above this (Hz) means high frequencies dominate
const HIGH_CENTROID_HZ: f64 = 3000.0;
const SPECTRAL_SCORE: f64 = 0.2;

const HIGH_ZCR: f64 = 0.1;
const DYNAMICS_SCORE: f64 = 0.15;

pub struct LocalAudioExtractor;

impl LocalAudioExtractor {
    fn score(analysis: &LocalAudioAnalysis) -> ScoreMap {
        let mut scores = ScoreMap::new();

        if let Some(tempo) = analysis.tempo.filter(|t| *t > 0.0) {
            if let Some((_, genre, score, label)) =
                TEMPO_BANDS.iter().find(|(upper, ..)| tempo < *upper)
            {
                scores.add(genre, *score, format!("{}:{:.1}", label, tempo));
            }
        }

        match analysis.spectral_centroid {
            Some(c) if c < LOW_CENTROID_HZ => scores.add("ambient", SPECTRAL_SCORE, "low_frequencies"),
            Some(c) if c > HIGH_CENTROID_HZ => scores.add("techno", SPECTRAL_SCORE, "high_frequencies"),
            _ => {}
        }

        if analysis.zero_crossing_rate.is_some_and(|zcr| zcr > HIGH_ZCR) {
            scores.add("electronic", DYNAMICS_SCORE, "high_dynamics");
        }

        scores
    }
}

impl EvidenceExtractor for LocalAudioExtractor {
    fn name(&self) -> &'static str {
        "local_audio"
    }

    fn is_available(&self, bag: &EvidenceBag) -> bool {
        bag.local_audio.is_some()
    }

    fn extract(&self, bag: &EvidenceBag, _taxonomy: &Taxonomy) -> ScoreMap {
        match &bag.local_audio {
            Some(analysis) => Self::score(analysis),
            None => ScoreMap::new(),
        }
    }
}
