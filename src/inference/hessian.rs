//! Standard errors from the observed information matrix.
//!
//! The caller supplies the gradient of the **negative total** log-likelihood
//! in model coordinates. Its finite-difference Jacobian at the estimate is
//! the observed information `J`. Variances are read off an eigenvalue
//! pseudoinverse `J⁺ = Q diag(1/λ) Qᵀ`, keeping only `λ > EIGEN_EPS`, so a
//! flat direction yields a zero variance instead of a blow-up.
//!
//! - Classical: `√diag(J⁺)`.
//! - Robust (Bollerslev–Wooldridge sandwich): `√diag(J⁺ S J⁺)` with
//!   `S = Σ_t s_t s_tᵀ`.
//!
//! `J` and `S` are both sums over observations, so no `1/T` factor appears.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        loglik_optimizer::finite_diff::compute_hessian,
        numerical_stability::transformations::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Standard errors at `phi_hat`; robust when `scores` (the `k × k` score
/// outer product) is given.
///
/// # Errors
/// - `ScoreDimMismatch` when `scores` is not `k × k`.
/// - `HessianFailed` when the information matrix has non-finite entries.
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, phi_hat: &Array1<f64>, scores: Option<&Array2<f64>>,
) -> InferenceResult<Array1<f64>> {
    let k = phi_hat.len();
    if let Some(s) = scores.filter(|s| s.dim() != (k, k)) {
        return Err(InferenceError::ScoreDimMismatch { expected: k, actual: s.nrows() });
    }
    let info_inv = pseudo_inverse(to_dmatrix(&compute_hessian(f, phi_hat)?));
    let cov = match scores {
        Some(s) => &info_inv * to_dmatrix(s) * &info_inv,
        None => info_inv,
    };
    Ok(Array1::from_shape_fn(k, |i| cov[(i, i)].max(0.0).sqrt()))
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(a.nrows(), a.ncols(), |i, j| a[[i, j]])
}

/// Eigenvalue pseudoinverse of a symmetric matrix.
fn pseudo_inverse(m: DMatrix<f64>) -> DMatrix<f64> {
    let eigen = m.symmetric_eigen();
    let inv_vals = eigen.eigenvalues.map(|l| if l > EIGEN_EPS { 1.0 / l } else { 0.0 });
    let q = eigen.eigenvectors;
    &q * DMatrix::from_diagonal(&inv_vals) * q.transpose()
}
