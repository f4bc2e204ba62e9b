//! Outer product of per-observation scores.
//!
//! For an `n × k` score matrix with rows `s_t = ∂ℓ_t/∂φ`, returns
//! `S = Σ_t s_t s_tᵀ`, the "meat" of the Bollerslev–Wooldridge sandwich on
//! the same (sum) scale as the observed information. No centering is
//! applied: at an interior MLE the scores sum to (approximately) zero.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::Array2;

/// `Sᵀ S` for a score matrix with one row per observation.
///
/// # Errors
/// - `InferenceError::EmptyScores` if `scores` has no rows or no columns.
/// - `InferenceError::ScoreDimMismatch` if `expected_dim` differs from the
///   number of columns.
pub fn outer_product(scores: &Array2<f64>, expected_dim: usize) -> InferenceResult<Array2<f64>> {
    let (n, k) = scores.dim();
    if n == 0 || k == 0 {
        return Err(InferenceError::EmptyScores);
    }
    if k != expected_dim {
        return Err(InferenceError::ScoreDimMismatch { expected: expected_dim, actual: k });
    }
    Ok(scores.t().dot(scores))
}
