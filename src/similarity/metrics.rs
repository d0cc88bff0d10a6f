use super::error::{SimilarityError, SimilarityResult};
use crate::constants::MAX_PASSAGE_SCORE;

#[inline]
pub(crate) fn ensure_same_len(
    operation: &'static str,
    a: &[f32],
    b: &[f32],
) -> SimilarityResult<()> {
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch {
            operation,
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Cosine similarity in `[-1, 1]`; `0.0` when either vector has zero magnitude.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> SimilarityResult<f64> {
    ensure_same_len("cosine_similarity", a, b)?;
    Ok(cosine_unchecked(a, b))
}

#[inline]
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> SimilarityResult<f64> {
    ensure_same_len("euclidean_distance", a, b)?;
    Ok(euclidean_unchecked(a, b))
}

#[inline]
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> SimilarityResult<f64> {
    ensure_same_len("manhattan_distance", a, b)?;
    Ok(manhattan_unchecked(a, b))
}

#[inline]
pub fn dot_product(a: &[f32], b: &[f32]) -> SimilarityResult<f64> {
    ensure_same_len("dot_product", a, b)?;
    Ok(dot_unchecked(a, b))
}

/// Maps raw cosine onto the `0..=100` passage scale.
///
/// Negative cosine clamps to `0`; `NaN` is treated as no similarity.
#[inline]
pub fn passage_score(cosine: f64) -> u8 {
    if cosine.is_nan() {
        return 0;
    }
    (cosine.clamp(0.0, 1.0) * MAX_PASSAGE_SCORE).round() as u8
}

pub(crate) fn cosine_unchecked(a: &[f32], b: &[f32]) -> f64 {
    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f64, 0.0f64, 0.0f64), |(dot, na, nb), (&av, &bv)| {
                let av = f64::from(av);
                let bv = f64::from(bv);
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

pub(crate) fn euclidean_unchecked(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| {
            let d = f64::from(av) - f64::from(bv);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

pub(crate) fn manhattan_unchecked(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| (f64::from(av) - f64::from(bv)).abs())
        .sum()
}

pub(crate) fn dot_unchecked(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&av, &bv)| f64::from(av) * f64::from(bv))
        .sum()
}
