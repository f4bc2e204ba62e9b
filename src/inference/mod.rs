//! inference — standard errors and coefficient tables for fitted models.
//!
//! Purpose
//! -------
//! Provide post-estimation uncertainty quantification on top of a fitted
//! model: classical (observed-information) and robust (sandwich) standard
//! errors, and coefficient tables with z-statistics and p-values.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inference is carried out in **model space** `φ` (the constrained
//!   parameters themselves), not in the optimizer's unconstrained `θ`.
//! - Observed information and score outer products are on the **total**
//!   log-likelihood scale.
//! - All routines return [`InferenceError`] on failure rather than panicking.
//!
//! Downstream usage
//! ----------------
//! - Build a gradient callback `φ ↦ −∇ℓ(φ)` and per-observation scores,
//!   then call [`calc_standard_errors`] with `Some(outer_product(scores))`
//!   for robust SEs or `None` for classical SEs.
//! - Wrap the result in a [`CoefficientTable`].
pub mod errors;
pub mod hessian;
pub mod scores;
pub mod table;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::calc_standard_errors;
pub use self::scores::outer_product;
pub use self::table::{CoefficientTable, StdErrorKind};
