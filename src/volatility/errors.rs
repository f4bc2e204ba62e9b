//! Errors for GARCH(1,1) volatility models (data validation, parameter
//! domain, options, recursion invariants, estimation and forecasting).
//!
//! [`GarchError`] is the model-level error returned by every public entry
//! point; [`ParamError`] names the violated parameter constraint and is
//! wrapped as [`GarchError::InvalidParameters`].
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Returns must be finite; the series needs at least
//!   [`MIN_OBSERVATIONS`](crate::volatility::core::data::MIN_OBSERVATIONS)
//!   entries.
//! - Estimation failures carry the last-best [`EstimationResult`] so callers
//!   can still inspect where the optimizer stopped.
use statrs::distribution::NormalError;

use crate::{
    inference::errors::InferenceError, optimization::errors::OptError,
    volatility::models::estimation::EstimationResult,
};

/// Result alias for GARCH operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter construction/validation paths.
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GARCH modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Series is empty.
    EmptySeries,

    /// A data point is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    /// Fewer observations than the estimator needs.
    SeriesTooShort { len: usize, min: usize },

    /// Sample variance is (numerically) zero; the likelihood has no maximum.
    DegenerateInput { variance: f64 },

    /// Prices used to build returns must be strictly positive.
    NonPositivePrice { index: usize, value: f64 },

    /// Return scale factor must be finite and > 0.
    InvalidScale { value: f64 },

    // ---- Parameters ----
    /// Parameters outside ω > 0, α ≥ 0, β ≥ 0, α + β < 1.
    InvalidParameters(ParamError),

    // ---- Options validation ----
    /// Variance guards must be finite with 0 < min < max.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    /// Fixed initial variance must be finite and > 0.
    InvalidInitFixed { value: f64 },

    /// Boundary tolerance must lie in (0, 1).
    InvalidBoundaryTol { value: f64 },

    /// Periods per year must be finite and > 0.
    InvalidPeriodsPerYear { value: f64 },

    // ---- Recursion / likelihood ----
    /// Variance recursion produced a non-finite value.
    NonFiniteVariance { t: usize, value: f64 },

    /// Variance fed into the Gaussian log-density is non-positive or non-finite.
    InvalidVarianceLogLik { value: f64 },

    // ---- Estimation ----
    /// Iteration limit exhausted; carries the last-best result.
    NonConvergence { result: Box<EstimationResult> },

    /// Solver stopped for a reason other than convergence or the iteration
    /// cap; carries the last-best result.
    EstimationFailed { result: Box<EstimationResult> },

    /// Optimizer or backend error before any result was available.
    OptimizationFailed { status: String },

    /// Mean specification name not recognized.
    InvalidMeanSpec { name: String },

    // ---- Forecasting / risk ----
    /// Forecast horizon must be ≥ 1.
    InvalidHorizon { horizon: usize },

    /// Confidence level must lie strictly inside (0, 1).
    InvalidConfidence { level: f64 },

    // ---- Simulation ----
    /// Simulation length must be ≥ 1.
    InvalidSimLength { n: usize },

    // ---- Inference ----
    /// Standard-error computation failed.
    InferenceFailed { text: String },

    // ---- statrs ----
    /// Normal distribution could not be constructed.
    InvalidNormalParam,
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::EmptySeries => write!(f, "Return series is empty"),
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Non-finite return at index {index}: {value}")
            }
            GarchError::SeriesTooShort { len, min } => {
                write!(f, "Return series has {len} observations; at least {min} are required")
            }
            GarchError::DegenerateInput { variance } => {
                write!(f, "Degenerate input: sample variance {variance} is numerically zero")
            }
            GarchError::NonPositivePrice { index, value } => {
                write!(f, "Non-positive price at index {index}: {value}")
            }
            GarchError::InvalidScale { value } => {
                write!(f, "Invalid return scale {value}: must be finite and > 0")
            }

            // ---- Parameters ----
            GarchError::InvalidParameters(err) => write!(f, "Invalid parameters: {err}"),

            // ---- Options validation ----
            GarchError::InvalidVarianceGuards { min, max, reason } => {
                write!(f, "Invalid variance guards (min = {min}, max = {max}): {reason}")
            }
            GarchError::InvalidInitFixed { value } => {
                write!(f, "Invalid fixed initial variance {value}: must be finite and > 0")
            }
            GarchError::InvalidBoundaryTol { value } => {
                write!(f, "Invalid boundary tolerance {value}: must lie in (0, 1)")
            }
            GarchError::InvalidPeriodsPerYear { value } => {
                write!(f, "Invalid periods per year {value}: must be finite and > 0")
            }

            // ---- Recursion / likelihood ----
            GarchError::NonFiniteVariance { t, value } => {
                write!(f, "Non-finite conditional variance at t = {t}: {value}")
            }
            GarchError::InvalidVarianceLogLik { value } => {
                write!(f, "Invalid conditional variance in log-likelihood: {value}")
            }

            // ---- Estimation ----
            GarchError::NonConvergence { result } => write!(
                f,
                "Optimizer did not converge after {} iterations (last log-likelihood {:.6})",
                result.iterations(),
                result.loglik()
            ),
            GarchError::EstimationFailed { result } => write!(
                f,
                "Estimation failed ({}) after {} iterations",
                result.optim().status,
                result.iterations()
            ),
            GarchError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }

            GarchError::InvalidMeanSpec { name } => {
                write!(f, "Unknown mean specification '{name}': expected 'zero' or 'constant'")
            }

            // ---- Forecasting / risk ----
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Invalid forecast horizon {horizon}: must be >= 1")
            }
            GarchError::InvalidConfidence { level } => {
                write!(f, "Invalid confidence level {level}: must lie in (0, 1)")
            }

            // ---- Simulation ----
            GarchError::InvalidSimLength { n } => {
                write!(f, "Invalid simulation length {n}: must be >= 1")
            }

            // ---- Inference ----
            GarchError::InferenceFailed { text } => write!(f, "Inference failed: {text}"),

            // ---- statrs ----
            GarchError::InvalidNormalParam => write!(f, "Invalid normal distribution parameters"),
        }
    }
}

/// Parameter-domain errors for `(ω, α, β, μ)` and their θ-space encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamError {
    /// Omega must be finite and > 0.
    InvalidOmega { value: f64 },

    /// Alpha must be finite and ≥ 0.
    InvalidAlpha { value: f64 },

    /// Beta must be finite and ≥ 0.
    InvalidBeta { value: f64 },

    /// Mean must be finite.
    InvalidMu { value: f64 },

    /// α + β must stay below 1 − STATIONARITY_MARGIN.
    StationarityViolated { coeff_sum: f64 },

    /// Slack must be non-negative and finite.
    InvalidSlack { value: f64 },

    /// θ length does not match the mean specification.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ entries must be finite.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::InvalidOmega { value } => {
                write!(f, "omega = {value}, must be finite and > 0")
            }
            ParamError::InvalidAlpha { value } => {
                write!(f, "alpha = {value}, must be finite and >= 0")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "beta = {value}, must be finite and >= 0")
            }
            ParamError::InvalidMu { value } => write!(f, "mu = {value}, must be finite"),
            ParamError::StationarityViolated { coeff_sum } => {
                write!(f, "alpha + beta = {coeff_sum}, must be < 1")
            }
            ParamError::InvalidSlack { value } => {
                write!(f, "slack = {value}, must be finite and >= 0")
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "theta has length {actual}, expected {expected}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "theta[{index}] = {value}, must be finite")
            }
        }
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> Self {
        GarchError::InvalidParameters(err)
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::Model(inner) => *inner,
            OptError::Param(param_err) => GarchError::InvalidParameters(param_err),
            other => GarchError::OptimizationFailed { status: other.to_string() },
        }
    }
}

impl From<InferenceError> for GarchError {
    fn from(err: InferenceError) -> Self {
        GarchError::InferenceFailed { text: err.to_string() }
    }
}

impl From<NormalError> for GarchError {
    fn from(_: NormalError) -> Self {
        GarchError::InvalidNormalParam
    }
}
