//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used to map
//! unconstrained optimizer coordinates into GARCH parameter space. The
//! functions use explicit cutoffs (`x > 20.0`) and max-shifting to keep
//! `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: ε buffer enforcing `α + β < 1` strictly.
//! - [`LOGIT_EPS`]: floor applied to simplex weights before taking logs.
//! - [`EIGEN_EPS`]: eigenvalue cutoff for pseudoinverses.
//! - [`GENERAL_TOL`]: threshold below which a sample variance counts as zero.
//! - [`safe_softplus`], [`safe_softplus_inv`], [`safe_logistic`].
//! - [`safe_softmax`], [`safe_softmax_deriv`]: the scaled simplex map for
//!   `(α, β, slack)` and its Jacobian–vector product.
use ndarray::{ArrayView1, ArrayViewMut1};

/// Safety margin for strict stationarity.
///
/// GARCH(1,1) is covariance stationary iff `α + β < 1`. The optimizer maps
/// onto the scaled simplex `α + β + slack = 1 − STATIONARITY_MARGIN`, so the
/// variance recursion always runs inside the stable region.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Lower clamp for simplex weights before `ln` in inverse mappings.
pub const LOGIT_EPS: f64 = 1e-12;

/// Eigenvalues at or below this value are treated as zero in pseudoinverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// General purpose "numerically zero" threshold.
pub const GENERAL_TOL: f64 = 1e-14;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x` to machine precision.
/// - Otherwise `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: returns `t = ln(exp(x) - 1)`.
///
/// Mirrors the cutoff of [`safe_softplus`]; for `x > 20` the identity is
/// exact in `f64`, otherwise `ln(expm1(x))` avoids cancellation for small `x`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic `σ(x) = 1 / (1 + exp(-x))`.
///
/// This is the derivative of [`safe_softplus`], used by the chain rule for ω.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Scaled softmax with an implicit zero logit for the slack coordinate.
///
/// Writes `out[i] = c · exp(θ_i) / (1 + Σ_j exp(θ_j))` with
/// `c = 1 − STATIONARITY_MARGIN` and returns the slack weight
/// `c / (1 + Σ_j exp(θ_j))`. Logits are shifted by `max(0, max θ)` before
/// exponentiation, so large inputs never overflow.
///
/// `logits` and `out` must have the same length.
pub fn safe_softmax(logits: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) -> f64 {
    let c = 1.0 - STATIONARITY_MARGIN;
    let shift = logits.iter().copied().fold(0.0_f64, f64::max);
    let slack_exp = (-shift).exp();
    let mut denom = slack_exp;
    for (o, &l) in out.iter_mut().zip(logits.iter()) {
        *o = (l - shift).exp();
        denom += *o;
    }
    out.mapv_inplace(|e| c * e / denom);
    c * slack_exp / denom
}

/// Jacobian–vector product of [`safe_softmax`], applied in place.
///
/// On entry `grad[j] = ∂ℓ/∂x_j` for the simplex weights `x = weights`; on
/// exit `grad[j] = ∂ℓ/∂θ_j`. With `c = 1 − STATIONARITY_MARGIN`,
///
/// `∂ℓ/∂θ_j = x_j · (g_j − Σ_i g_i x_i / c)`.
///
/// The slack coordinate carries no direct gradient.
pub fn safe_softmax_deriv(weights: ArrayView1<f64>, mut grad: ArrayViewMut1<f64>) {
    let c = 1.0 - STATIONARITY_MARGIN;
    let weighted: f64 = weights.iter().zip(grad.iter()).map(|(x, g)| x * g).sum::<f64>() / c;
    for (g, &x) in grad.iter_mut().zip(weights.iter()) {
        *g = x * (*g - weighted);
    }
}
