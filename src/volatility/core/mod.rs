//! core — shared GARCH(1,1) data, parameters, and σ²-recursions.
//!
//! Purpose
//! -------
//! Collect the building blocks the estimator, forecaster, and simulator are
//! assembled from: the validated return series, parameter containers and
//! their optimizer-space mapping, options, initialization and guard
//! policies, and the in-sample / out-of-sample variance recursions.
//!
//! Invariants & assumptions
//! ------------------------
//! - Returns in [`ReturnSeries`] are finite and at least
//!   [`MIN_OBSERVATIONS`] long.
//! - Successfully constructed [`GarchParams`] satisfy `ω > 0`, `α, β ≥ 0`,
//!   `α + β < 1 − STATIONARITY_MARGIN`.
//! - Every σ²_t produced here is clamped into [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - Indexing is 0-based: `sigma2[t]` is the variance of `returns[t]`, and
//!   `forecast.variance[i]` is the `(i + 1)`-step-ahead forecast.
//! - No I/O or logging; failures are reported via `GarchResult` /
//!   `ParamResult`.
pub mod data;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod options;
pub mod params;
pub mod simulation;
pub mod validation;
pub mod variance;
pub mod workspace;

pub use self::data::{MIN_OBSERVATIONS, ReturnKind, ReturnSeries};
pub use self::forecasts::{VarianceForecast, forecast_recursion};
pub use self::guards::VarianceGuards;
pub use self::init::Init;
pub use self::options::{GarchOptions, MeanSpec, SimOpts, SimStart, TRADING_DAYS};
pub use self::params::GarchParams;
pub use self::simulation::{SimulatedPath, simulate};
pub use self::workspace::{GarchScratch, WorkSpace};
