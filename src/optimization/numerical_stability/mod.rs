//! numerical_stability — stable transforms between θ-space and GARCH parameters.
//!
//! Purpose
//! -------
//! Collect the scalar and vector transforms that map unconstrained optimizer
//! coordinates onto the GARCH(1,1) parameter domain, together with the small
//! numerical tolerances shared by the optimizer, the variance recursion and
//! the inference layer.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv` map ω between ℝ and (0, ∞);
//!   `safe_logistic` is its derivative for the chain rule.
//! - `safe_softmax` maps the two logits `(θ_α, θ_β)` onto the scaled simplex
//!   `α + β + slack = 1 − STATIONARITY_MARGIN`; `safe_softmax_deriv` pushes
//!   model-space gradients back to the logits.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; length and domain checks live in the volatility
//!   layer (`volatility::core::validation`).
//! - The slack logit is pinned at zero, so the map from `(θ_α, θ_β)` to
//!   `(α, β)` is a bijection onto the open simplex interior.
//!
//! Conventions
//! -----------
//! - θ layout: `θ = (θ_ω, θ_α, θ_β[, μ])`; the mean coordinate, when
//!   present, is passed through untransformed.
//! - Pure numerical helpers: no I/O, no global state, no allocation beyond
//!   what the caller passes in.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover round trips, tail behavior,
//!   simplex mass conservation, and the softmax JVP against central
//!   differences.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, GENERAL_TOL, LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax,
    safe_softmax_deriv, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, LOGIT_EPS, STATIONARITY_MARGIN, safe_logistic, safe_softmax,
        safe_softplus, safe_softplus_inv,
    };
}
