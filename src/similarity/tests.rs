use super::*;
use crate::tier::{Metric, ScoreTier};

#[test]
fn test_cosine_identical_vectors() {
    let v = [1.0f32, 2.0, 3.0];
    let similarity = cosine_similarity(&v, &v).unwrap();
    assert!(
        (similarity - 1.0).abs() < 1e-9,
        "Identical vectors should have similarity ~1.0"
    );
}

#[test]
fn test_cosine_self_similarity_many_vectors() {
    for seed in 1..50u32 {
        let v: Vec<f32> = (0..64)
            .map(|i| ((seed * 31 + i) % 97) as f32 / 97.0 - 0.3)
            .collect();
        let similarity = cosine_similarity(&v, &v).unwrap();
        assert!((similarity - 1.0).abs() < 1e-9, "seed {seed}: {similarity}");
    }
}

#[test]
fn test_cosine_orthogonal_vectors() {
    let similarity = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
    assert!(similarity.abs() < 1e-9);
}

#[test]
fn test_cosine_opposite_vectors() {
    let similarity = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
    assert!((similarity + 1.0).abs() < 1e-9);
}

#[test]
fn test_cosine_scaled_vectors() {
    let similarity = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    assert!((similarity - 1.0).abs() < 1e-9);
}

#[test]
fn test_cosine_zero_vector_falls_back_to_zero() {
    let similarity = cosine_similarity(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(similarity, 0.0, "Zero vector should return 0.0");
}

#[test]
fn test_cosine_empty_vectors() {
    let similarity = cosine_similarity(&[], &[]).unwrap();
    assert_eq!(similarity, 0.0);
}

#[test]
fn test_every_metric_rejects_mismatched_lengths() {
    let a = [1.0f32, 2.0];
    let b = [1.0f32, 2.0, 3.0];

    let errors = [
        cosine_similarity(&a, &b).unwrap_err(),
        euclidean_distance(&a, &b).unwrap_err(),
        manhattan_distance(&a, &b).unwrap_err(),
        dot_product(&a, &b).unwrap_err(),
        SimilarityScores::compute(&a, &b).unwrap_err(),
    ];

    for err in errors {
        let SimilarityError::LengthMismatch { left, right, .. } = err;
        assert_eq!((left, right), (2, 3));
    }
}

#[test]
fn test_length_mismatch_names_operation() {
    let err = euclidean_distance(&[1.0], &[]).unwrap_err();
    assert!(err.to_string().contains("euclidean_distance"));
    assert!(err.to_string().contains("1 vs 0"));
}

#[test]
fn test_distance_metrics() {
    let a = [1.0f32, 2.0, 3.0];
    let b = [4.0f32, 6.0, 3.0];

    assert!((euclidean_distance(&a, &b).unwrap() - 5.0).abs() < 1e-9);
    assert!((manhattan_distance(&a, &b).unwrap() - 7.0).abs() < 1e-9);
    assert!((dot_product(&a, &b).unwrap() - 25.0).abs() < 1e-9);
}

#[test]
fn test_passage_score_clamps_and_rounds() {
    assert_eq!(passage_score(-0.5), 0);
    assert_eq!(passage_score(0.0), 0);
    assert_eq!(passage_score(0.444), 44);
    assert_eq!(passage_score(0.446), 45);
    assert_eq!(passage_score(1.0), 100);
    assert_eq!(passage_score(1.7), 100);
    assert_eq!(passage_score(f64::NAN), 0);
}

#[test]
fn test_passage_score_is_monotonic() {
    let mut previous = 0u8;
    for step in -100..=150 {
        let cosine = f64::from(step) / 100.0;
        let score = passage_score(cosine);
        assert!(score >= previous, "score dropped at cosine {cosine}");
        assert!(score <= 100);
        previous = score;
    }
}

#[test]
fn test_similarity_scores_compute() {
    let scores = SimilarityScores::compute(&[1.0, 0.0], &[1.0, 1.0]).unwrap();

    assert!((scores.cosine - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    assert_eq!(scores.passage_score, 71);
    assert!((scores.euclidean - 1.0).abs() < 1e-9);
    assert!((scores.manhattan - 1.0).abs() < 1e-9);
    assert!((scores.dot_product - 1.0).abs() < 1e-9);
    assert_eq!(scores.passage_tier(), ScoreTier::Moderate);
    assert_eq!(scores.value(Metric::PassageScore), 71.0);
}

#[test]
fn test_similarity_scores_serialize_camel_case() {
    let scores = SimilarityScores::from_cosine(0.8);
    let json = serde_json::to_value(scores).unwrap();

    assert_eq!(json["passageScore"], 80);
    assert!(json.get("dotProduct").is_some());
}
