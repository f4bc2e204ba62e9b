//! loglik_optimizer — argmin-powered log-likelihood maximization.
//!
//! Purpose
//! -------
//! Provide a high-level optimization layer for **maximizing log-likelihoods**
//! `ℓ(θ)`. Callers implement [`LogLikelihood`] and invoke [`maximize`] to run
//! L-BFGS (configurable line search, finite-difference gradient fallback) or
//! derivative-free Nelder–Mead.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the argmin cost
//!   `c(θ) = -ℓ(θ)`.
//! - [`maximize`] validates `θ₀` via [`LogLikelihood::check`], builds the
//!   solver from [`MLEOptions`] ([`builders`]), runs it ([`run`]) and
//!   normalizes the result into an [`OptimOutcome`].
//! - [`finite_diff`] supplies validated FD gradients and Hessians; the
//!   inference layer reuses [`finite_diff::compute_hessian`].
//!
//! Invariants & assumptions
//! ------------------------
//! - User code implements `ℓ(θ)` and `∇ℓ(θ)`, never the cost directly.
//! - Invalid inputs inside `value`/`grad` are recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values; they travel through argmin and are recovered intact.
//! - Configuration types are validated on construction.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained space as [`Theta`]; constrained ↔
//!   unconstrained mappings belong to the model layer.
//! - [`OptimOutcome::value`] is expressed as `ℓ`, not as the cost.
//!
//! Testing notes
//! -------------
//! - Unit tests cover sign conventions ([`adapter`]), solver construction
//!   ([`builders`]), FD helpers and validation, option parsing and outcome
//!   mapping ([`traits`]), and every solver path on a toy concave bowl
//!   ([`api`]).
//! - The GARCH integration tests exercise [`maximize`] end to end.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, OptimStatus, OptimizerKind, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, OptimStatus, OptimizerKind,
        Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
