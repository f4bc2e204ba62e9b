//! rust_garch — GARCH(1,1) conditional-volatility estimation and forecasting.
//!
//! Purpose
//! -------
//! Serve as the crate root: fit a Gaussian GARCH(1,1) model to a single
//! return series by maximum likelihood, forecast its conditional variance,
//! simulate paths from known parameters, and report standard errors.
//!
//! Key behaviors
//! -------------
//! - [`volatility`]: validated return series, parameters, the variance
//!   recursion, the [`Estimator`], forecasts, and simulation.
//! - [`optimization`]: a generic log-likelihood maximizer on top of
//!   `argmin` (L-BFGS or Nelder–Mead) plus numerically stable parameter
//!   transforms.
//! - [`inference`]: classical and robust (sandwich) standard errors and
//!   coefficient tables.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimation is single-threaded; an [`Estimator`] owns `RefCell`-backed
//!   scratch buffers and is not shared across threads.
//! - Every public entry point validates its inputs and reports failures as
//!   [`GarchError`] values rather than panicking.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `sigma2[t]` is the conditional variance of
//!   `returns[t]`.
//! - Likelihood values reported to callers are **totals** over the sample.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_garch::prelude::*;
//!
//! let truth = GarchParams::new(0.05, 0.10, 0.85).unwrap();
//! let series = simulate(&truth, 2000, &SimOpts::default()).unwrap().into_series().unwrap();
//! let guess = GarchParams::initial_guess(&series, MeanSpec::Zero).unwrap();
//! let result = fit(&series, guess).unwrap();
//! println!("{result}");
//! let path = forecast(result.model(), 5).unwrap();
//! assert_eq!(path.variance[0], result.model().one_step_variance());
//! ```

pub mod inference;
pub mod optimization;
pub mod volatility;

pub use crate::inference::{CoefficientTable, StdErrorKind};
pub use crate::volatility::{
    ConvergenceStatus, EstimationResult, Estimator, GarchError, GarchModel, GarchOptions,
    GarchParams, GarchResult, Init, MeanSpec, ParamError, ReturnKind, ReturnSeries, SimOpts,
    SimStart, VarianceForecast, fit, forecast, simulate,
};

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_garch::prelude::*;` to import the primary
// surface in a single line.

pub mod prelude {
    pub use crate::inference::{CoefficientTable, StdErrorKind};
    pub use crate::optimization::loglik_optimizer::{
        LineSearcher, MLEOptions, OptimizerKind, Tolerances,
    };
    pub use crate::volatility::{
        ConvergenceStatus, EstimationResult, Estimator, GarchError, GarchModel, GarchOptions,
        GarchParams, GarchResult, Init, MeanSpec, ReturnKind, ReturnSeries, SimOpts, SimStart,
        VarianceForecast, VarianceGuards, fit, forecast, simulate,
    };
}
