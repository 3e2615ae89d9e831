//! End-to-end properties of the built-in classifier

mod helpers;

use gsort_classifier::{ClassificationResult, GenreClassifier, TrackMetadata};
use helpers::*;
use serde_json::json;

fn max_score(result: &ClassificationResult) -> f64 {
    result
        .analysis_details
        .all_scores
        .values()
        .copied()
        .fold(0.0, f64::max)
}

#[test]
fn test_no_evidence_is_unknown() {
    init_test_logging();
    let classifier = GenreClassifier::builtin();

    let result = classifier.classify(&TrackMetadata::default(), None);
    assert_eq!(result, ClassificationResult::unknown());
    assert_eq!(result.suggested_folder, "Other");
    assert_eq!(result.confidence_score, 0.0);

    // Evidence that matches nothing in the taxonomy is no evidence
    let polka = TrackBuilder::new().title("Polka Party").genre("Polka").build();
    assert!(classifier.classify(&polka, None).is_unknown());
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = GenreClassifier::builtin();
    let metadata = TrackBuilder::new()
        .title("Night Drive")
        .artist("Someone")
        .genre("Deep House")
        .bpm("122")
        .build();
    let response = provider(json!({
        "primary_genre": "House",
        "confidence": 0.7,
        "tags": ["groovy"],
        "energy": 0.85,
        "danceability": 0.9
    }));

    let first = classifier.classify(&metadata, Some(&response));
    let second = classifier.classify(&metadata, Some(&response));
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_confidence_is_top_score() {
    let classifier = GenreClassifier::builtin();
    let metadata = TrackBuilder::new()
        .title("Acid Line")
        .genre("Techno")
        .bpm("135")
        .filename("acid_line.mp3")
        .build();

    let result = classifier.classify(&metadata, None);
    assert_eq!(result.primary_genre, "techno");
    assert_close(result.confidence_score, 1.8);
    assert_close(result.confidence_score, max_score(&result));
    assert_eq!(
        result.classification_sources,
        vec!["direct_match_metadata:Techno", "keywords:techno", "bpm:135.0"]
    );
    assert_eq!(result.suggested_folder, "Techno");
}

#[test]
fn test_secondaries_follow_primary_in_score_order() {
    let classifier = GenreClassifier::builtin();
    let metadata = TrackBuilder::new()
        .title("Night Drive")
        .artist("Someone")
        .genre("Deep House")
        .bpm("122")
        .build();

    let result = classifier.classify(&metadata, None);
    assert_eq!(result.primary_genre, "house");
    assert_eq!(result.secondary_genres, vec!["deep_house"]);
    assert!(!result.secondary_genres.contains(&result.primary_genre));

    let scores = &result.analysis_details.all_scores;
    for genre in &result.secondary_genres {
        assert!(scores.get(genre).copied().unwrap_or_default() > 0.3);
        assert!(scores.get(genre).copied().unwrap_or_default() <= result.confidence_score);
    }
}

#[test]
fn test_remix_follows_remix_style() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({
        "additional_info": {
            "web": {"genres": ["classic trance"]},
            "ai_analysis": {"is_remix": true, "remix_style": "house"}
        }
    }));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert_eq!(result.primary_genre, "house");
    assert_close(result.confidence_score, 0.8);
    assert_eq!(result.classification_sources, vec!["ai_remix_style"]);
    assert_eq!(result.secondary_genres, vec!["trance"]);
    assert_close(result.analysis_details.all_scores.get("trance").copied().unwrap(), 0.5);
}

#[test]
fn test_ai_boost_outranks_provider_primary() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({
        "primary_genre": "techno",
        "confidence": 0.5,
        "additional_info": {
            "ai_analysis": {"primary_genre": "ambient", "confidence": 0.5}
        }
    }));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert_eq!(result.primary_genre, "ambient");
    assert_close(result.confidence_score, 0.6);
    assert_eq!(result.secondary_genres, vec!["techno"]);
}

#[test]
fn test_unavailable_ai_is_ignored() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({
        "additional_info": {
            "ai_analysis": {"primary_genre": "ambient", "confidence": 0.9}
        },
        "provider_status": {
            "ai_analysis": {"status": "unavailable", "reason": "rate limited"}
        }
    }));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert!(result.is_unknown());
}

#[test]
fn test_audio_features_alone() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({"energy": 0.9, "danceability": 0.85}));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert_eq!(result.primary_genre, "techno");
    assert_close(result.confidence_score, 0.5);
    assert_eq!(result.classification_sources, vec!["high_energy_dance"]);
    assert_eq!(result.secondary_genres, vec!["house"]);
}

#[test]
fn test_unparseable_audio_feature_voids_feature_rules() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({
        "energy": "0.9",
        "danceability": "loud",
        "acousticness": "0.05"
    }));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert!(result.is_unknown());
    assert!(result.analysis_details.all_scores.is_empty());
}

#[test]
fn test_malformed_provider_fields_shrink_evidence() {
    let classifier = GenreClassifier::builtin();
    let response = provider(json!({
        "primary_genre": 42,
        "confidence": "high",
        "genres": "not a list",
        "energy": "loud",
        "additional_info": "nope"
    }));

    let result = classifier.classify(&TrackMetadata::default(), Some(&response));
    assert!(result.is_unknown());
}

#[test]
fn test_breakdown_sums_to_total() {
    let classifier = GenreClassifier::builtin();
    let metadata = TrackBuilder::new().title("Acid Line").genre("Techno").bpm("135").build();

    let result = classifier.classify(&metadata, None);
    for (genre, detail) in result.analysis_details.score_breakdown.iter() {
        let sum: f64 = detail.breakdown.values().sum();
        assert_close(sum, detail.total_score);
        assert_close(
            result.analysis_details.all_scores.get(genre).copied().unwrap(),
            detail.total_score,
        );
    }
}
