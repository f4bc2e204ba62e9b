//! models — GARCH(1,1) model, estimator, and estimation results.
//!
//! Purpose
//! -------
//! Sit on top of `volatility::core` and wire the variance recursions to the
//! generic log-likelihood optimizer and the inference layer.
//!
//! Key behaviors
//! -------------
//! - [`GarchModel`]: parameters bound to one series, with the σ² path,
//!   residuals, log-likelihood, and forecasts.
//! - [`Estimator`]: implements [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   in θ-space and provides `fit` and `inference`.
//! - [`EstimationResult`] / [`ConvergenceStatus`]: frozen fit plus
//!   diagnostics.
//! - [`model_internals`]: observation traversal and per-observation scores.
//!
//! Conventions
//! -----------
//! - θ-space layout `(θ_ω, θ_α, θ_β[, μ])`; model-space layout
//!   `φ = (ω, α, β[, μ])`.
//! - Scratch buffers are single-owner; an [`Estimator`] is not shared across
//!   threads.
pub mod estimation;
pub mod estimator;
pub mod garch;
pub mod model_internals;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::estimation::{ConvergenceStatus, EstimationResult};
pub use self::estimator::Estimator;
pub use self::garch::GarchModel;
pub use self::model_internals::{calculate_scores, walk_observations};
