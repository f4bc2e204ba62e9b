//! volatility — GARCH(1,1) estimation, forecasting, and simulation.
//!
//! Purpose
//! -------
//! Provide the user-facing entry points of the crate: fit a GARCH(1,1)
//! model to a [`ReturnSeries`] by maximum likelihood, forecast conditional
//! variance from a fitted [`GarchModel`], and simulate paths from known
//! parameters.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_garch::volatility::{
//!     self, GarchParams, SimOpts, simulate,
//! };
//!
//! let truth = GarchParams::new(0.05, 0.1, 0.85).unwrap();
//! let series = simulate(&truth, 1500, &SimOpts::default()).unwrap().into_series().unwrap();
//! let guess = GarchParams::new(0.1, 0.05, 0.9).unwrap();
//! let fitted = volatility::fit(&series, guess).unwrap();
//! let path = volatility::forecast(fitted.model(), 10).unwrap();
//! assert_eq!(path.horizon(), 10);
//! ```
pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    GarchOptions, GarchParams, Init, MIN_OBSERVATIONS, MeanSpec, ReturnKind, ReturnSeries,
    SimOpts, SimStart, SimulatedPath, TRADING_DAYS, VarianceForecast, VarianceGuards, simulate,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{ConvergenceStatus, EstimationResult, Estimator, GarchModel};

/// Fit GARCH(1,1) with default [`GarchOptions`] (zero mean, sample-variance
/// initialization, L-BFGS).
///
/// # Errors
/// See [`Estimator::fit`].
pub fn fit(series: &ReturnSeries, initial_guess: GarchParams) -> GarchResult<EstimationResult> {
    Estimator::new(GarchOptions::default()).fit(series, initial_guess)
}

/// Forecast `horizon` steps of conditional variance from a fitted model.
///
/// # Errors
/// `GarchError::InvalidHorizon` when `horizon == 0`.
pub fn forecast(model: &GarchModel, horizon: usize) -> GarchResult<VarianceForecast> {
    model.forecast(horizon)
}
