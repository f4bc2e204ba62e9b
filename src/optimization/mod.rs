//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit GARCH models: an argmin-backed
//! log-likelihood optimizer, numerically stable parameter transforms, and a
//! single error/result surface. Model code implements a log-likelihood,
//! chooses tolerances, and receives fitted parameters and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with L-BFGS or Nelder–Mead.
//! - `numerical_stability`: softplus/softmax maps from unconstrained θ onto
//!   `(ω, α, β)` with a strict stationarity margin.
//! - `errors`: configuration issues, numerical failures, GARCH model errors
//!   and argmin backend errors all become `OptError` / `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; outcomes are
//!   reported in terms of `ℓ`.
//! - This module performs no I/O; the only output is the optional
//!   `obs_slog` observer.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
