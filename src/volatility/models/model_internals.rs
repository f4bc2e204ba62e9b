//! GARCH(1,1) model internals: observation traversal, likelihood, and scores.
//!
//! Purpose
//! -------
//! Provide the low-level loops shared by estimation and inference: run the
//! σ²- and sensitivity recursions into reusable scratch buffers, walk the
//! sample in lockstep with `(∂σ²_t/∂φ, ε_t, σ²_t)`, and turn each entry into
//! a per-observation score.
//!
//! Key behaviors
//! -------------
//! - [`loglik_at`] evaluates the total Gaussian log-likelihood for a given
//!   [`WorkSpace`].
//! - [`walk_observations`] feeds every observation into a step closure.
//! - [`model_space_gradient`] and [`calculate_scores`] accumulate the
//!   analytic score in model space `φ = (ω, α, β[, μ])`.
//! - [`theta_gradient`] maps a model-space gradient to optimizer space θ via
//!   the softplus and scaled-softmax Jacobians.
//!
//! Invariants & assumptions
//! ------------------------
//! - The score of observation `t` is
//!   `s_t = ½ (ε²_t − σ²_t) / σ⁴_t · ∂σ²_t/∂φ`, plus `ε_t / σ²_t` in the μ
//!   slot under a constant mean.
//! - Scratch buffers are single-owner; re-entrant evaluation on the same
//!   [`GarchScratch`] panics on the `RefCell` borrow.
//!
//! Conventions
//! -----------
//! - Score rows are indexed by observation (0-based) and columns follow the
//!   `φ` layout of [`GarchParams::model_vector`](crate::volatility::core::params::GarchParams::model_vector).
use crate::{
    optimization::numerical_stability::transformations::{safe_logistic, safe_softmax_deriv},
    volatility::{
        core::{
            data::ReturnSeries,
            options::GarchOptions,
            variance::{compute_derivative, compute_variance, likelihood_driver},
            workspace::{GarchScratch, WorkSpace},
        },
        errors::{GarchError, GarchResult},
    },
};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewMut1, aview1, s};

/// One observation seen by [`walk_observations`].
///
/// - `idx`: 0-based observation index.
/// - `deriv_row`: `∂σ²_t/∂φ`, borrowed from the scratch buffer.
/// - `resid`: `ε_t = r_t − μ`.
/// - `sigma2`: `σ²_t`.
#[derive(Debug, Clone, Copy)]
pub struct ObsEntry<'a> {
    pub idx: usize,
    pub deriv_row: ArrayView1<'a, f64>,
    pub resid: f64,
    pub sigma2: f64,
}

/// Total log-likelihood at `ws`, using `scratch` for the variance path.
///
/// # Errors
/// Propagates [`compute_variance`] / [`likelihood_driver`] failures.
pub fn loglik_at(
    ws: &WorkSpace, series: &ReturnSeries, options: &GarchOptions, scratch: &GarchScratch,
) -> GarchResult<f64> {
    let mut sigma2 = scratch.sigma2(series.len());
    compute_variance(ws, series, options.init, &options.variance_guards, sigma2.view_mut())?;
    likelihood_driver(ws, series, sigma2.view())
}

/// Run both recursions at `ws` and feed every observation into `step`.
///
/// `state` is threaded through each call and owned by the caller. The
/// derivative width is `options.mean.n_params()`.
///
/// # Errors
/// Propagates recursion failures and the first error returned by `step`.
pub fn walk_observations<State, Step>(
    ws: &WorkSpace, series: &ReturnSeries, options: &GarchOptions, scratch: &GarchScratch,
    state: &mut State, mut step: Step,
) -> GarchResult<()>
where
    Step: FnMut(ObsEntry<'_>, &mut State) -> GarchResult<()>,
{
    let n = series.len();
    let guards = &options.variance_guards;
    let mut sigma2 = scratch.sigma2(n);
    compute_variance(ws, series, options.init, guards, sigma2.view_mut())?;
    let mut deriv = scratch.deriv(n, options.mean.n_params());
    compute_derivative(ws, series, options.init, guards, sigma2.view(), deriv.view_mut());

    deriv
        .rows()
        .into_iter()
        .zip(series.values().iter())
        .zip(sigma2.iter())
        .enumerate()
        .map(|(idx, ((deriv_row, &r), &sigma2))| ObsEntry {
            idx,
            deriv_row,
            resid: r - ws.mu,
            sigma2,
        })
        .try_for_each(|entry| step(entry, state))
}

/// Add the score of `entry` to `out` (length 3 or 4).
///
/// # Errors
/// `GarchError::InvalidVarianceLogLik` unless `σ²_t` is finite and > 0.
pub fn add_score(entry: &ObsEntry<'_>, mut out: ArrayViewMut1<f64>) -> GarchResult<()> {
    let sigma2 = entry.sigma2;
    if !(sigma2 > 0.0 && sigma2.is_finite()) {
        return Err(GarchError::InvalidVarianceLogLik { value: sigma2 });
    }
    let weight = 0.5 * (entry.resid * entry.resid - sigma2) / (sigma2 * sigma2);
    out.scaled_add(weight, &entry.deriv_row);
    if out.len() == 4 {
        out[3] += entry.resid / sigma2;
    }
    Ok(())
}

/// Analytic gradient `∂ℓ/∂φ` of the total log-likelihood.
pub fn model_space_gradient(
    ws: &WorkSpace, series: &ReturnSeries, options: &GarchOptions, scratch: &GarchScratch,
) -> GarchResult<Array1<f64>> {
    let mut grad = Array1::zeros(options.mean.n_params());
    walk_observations(ws, series, options, scratch, &mut grad, |entry, acc| {
        add_score(&entry, acc.view_mut())
    })?;
    Ok(grad)
}

/// Per-observation scores, shape `(T, k)`; rows sum to
/// [`model_space_gradient`].
pub fn calculate_scores(
    ws: &WorkSpace, series: &ReturnSeries, options: &GarchOptions, scratch: &GarchScratch,
) -> GarchResult<Array2<f64>> {
    let mut scores = Array2::zeros((series.len(), options.mean.n_params()));
    walk_observations(ws, series, options, scratch, &mut scores, |entry, acc| {
        add_score(&entry, acc.row_mut(entry.idx))
    })?;
    Ok(scores)
}

/// Chain rule from model space to optimizer space, in place.
///
/// - `∂ℓ/∂θ_ω = σ(θ_ω) ∂ℓ/∂ω` (softplus derivative is the logistic).
/// - `(∂ℓ/∂θ_α, ∂ℓ/∂θ_β)` via the scaled-softmax Jacobian at `(α, β)`.
/// - `μ` is unconstrained, so its component is unchanged.
pub fn theta_gradient(theta: ArrayView1<f64>, ws: &WorkSpace, mut grad: Array1<f64>) -> Array1<f64> {
    grad[0] *= safe_logistic(theta[0]);
    safe_softmax_deriv(aview1(&[ws.alpha, ws.beta]), grad.slice_mut(s![1..3]));
    grad
}
