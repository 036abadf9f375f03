//! Vector math shared by the index and the scoring engine.

use talent_core::SemanticStatus;

pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| f64::from(*x) * f64::from(*x)).sum::<f64>().sqrt()
}

/// Unit-length copy of `v`, or `None` for an empty, zero, or non-finite vector.
pub fn normalize(v: &[f32]) -> Option<Vec<f32>> {
    let norm = l2_norm(v);
    if !norm.is_finite() || norm <= f64::from(f32::EPSILON) {
        return None;
    }
    Some(v.iter().map(|x| (f64::from(*x) / norm) as f32).collect())
}

/// Cosine similarity in [-1, 1].
///
/// Zero vectors and mismatched lengths yield 0 rather than an error.
pub fn similarity(a: &[f32], b: &[f32]) -> f64 {
    compare(a, b).0
}

/// Cosine similarity plus the status explaining a forced 0.
pub fn compare(a: &[f32], b: &[f32]) -> (f64, SemanticStatus) {
    if a.len() != b.len() {
        if a.is_empty() || b.is_empty() {
            return (0.0, SemanticStatus::MissingEmbedding);
        }
        return (0.0, SemanticStatus::DimensionMismatch);
    }
    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON || !norm_a.is_finite() || !norm_b.is_finite()
    {
        return (0.0, SemanticStatus::MissingEmbedding);
    }
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    ((dot / (norm_a * norm_b)).clamp(-1.0, 1.0), SemanticStatus::Computed)
}

/// Dot product of two already-normalized vectors of equal length.
pub(crate) fn unit_dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum::<f64>()
        .clamp(-1.0, 1.0)
}
