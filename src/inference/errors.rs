//! Unified error handling for inference routines.
//!
//! `InferenceError` covers the failures of post-estimation inference:
//! dimension mismatches between estimates, Hessians, and score matrices,
//! empty score samples, invalid standard errors in a coefficient table, and
//! finite-difference Hessian failures passed up from the optimizer layer.
//! The alias `InferenceResult<T>` standardizes return types.
use crate::optimization::errors::OptError;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Shapes ----
    /// Score matrix columns (or covariance size) do not match the estimate.
    ScoreDimMismatch { expected: usize, actual: usize },

    /// Names, estimates, and standard errors disagree in length.
    EstimateDimMismatch { expected: usize, actual: usize },

    /// Score matrix has no rows.
    EmptyScores,

    // ---- Numerics ----
    /// A standard error is negative or non-finite.
    InvalidStdError { index: usize, value: f64 },

    /// Observed-information Hessian could not be computed.
    HessianFailed { text: String },
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::HessianFailed { text: err.to_string() }
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shapes ----
            InferenceError::ScoreDimMismatch { expected, actual } => write!(
                f,
                "Inference Error: score dimension {actual} does not match parameter dimension {expected}"
            ),
            InferenceError::EstimateDimMismatch { expected, actual } => write!(
                f,
                "Inference Error: got {actual} entries where {expected} were expected"
            ),
            InferenceError::EmptyScores => write!(f, "Inference Error: score matrix is empty"),

            // ---- Numerics ----
            InferenceError::InvalidStdError { index, value } => {
                write!(f, "Inference Error: invalid standard error {value} at index {index}")
            }
            InferenceError::HessianFailed { text } => {
                write!(f, "Inference Error: Hessian computation failed ({text})")
            }
        }
    }
}
