//! Errors raised by the log-likelihood optimizer.
//!
//! [`OptError`] covers optimizer configuration, gradient/Hessian validation,
//! and failures reported by the `argmin` backend. Model errors raised inside
//! a cost or gradient evaluation travel through `argmin::core::Error` and
//! are recovered intact by the `From<argmin::core::Error>` conversion, so a
//! parameter or recursion failure is never flattened into a string.
use argmin::core::{ArgminError, Error};

use crate::volatility::errors::{GarchError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// Which `argmin` error a [`OptError::Backend`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendErrorKind {
    InvalidParameter,
    NotImplemented,
    NotInitialized,
    ConditionViolated,
    CheckpointNotFound,
    PotentialBug,
    ImpossibleError,
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// No analytic gradient; the adapter falls back to finite differences.
    GradientNotImplemented,

    /// Gradient length differs from θ.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient entry is NaN/±inf.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    InvalidTolGrad { tol: f64, reason: &'static str },
    InvalidTolCost { tol: f64, reason: &'static str },
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    NoTolerancesProvided,
    InvalidLineSearch { name: String, reason: &'static str },
    InvalidOptimizer { name: String, reason: &'static str },
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Evaluation / outcome ----
    /// The log-likelihood evaluated to NaN/±inf.
    NonFiniteCost { value: f64 },

    /// Solver returned a non-finite best parameter.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },

    /// Solver finished without a best parameter.
    MissingThetaHat,

    // ---- Finite differences ----
    HessianDimMismatch { expected: usize, found: (usize, usize) },
    InvalidHessian { row: usize, col: usize, value: f64 },

    // ---- argmin ----
    /// Error reported by the `argmin` backend itself.
    Backend { kind: BackendErrorKind, text: String },

    // ---- Model ----
    /// θ mapped outside the parameter domain.
    Param(ParamError),

    /// Recursion or likelihood failure raised by the model.
    Model(Box<GarchError>),
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => write!(f, "Analytic gradient not implemented"),
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid iteration cap {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => write!(f, "No stopping tolerances provided"),
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Unknown line search '{name}': {reason}")
            }
            OptError::InvalidOptimizer { name, reason } => {
                write!(f, "Unknown optimizer '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Evaluation / outcome ----
            OptError::NonFiniteCost { value } => write!(f, "Non-finite log-likelihood: {value}"),
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimate at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => write!(f, "Solver returned no best parameter vector"),

            // ---- Finite differences ----
            OptError::HessianDimMismatch { expected, found } => write!(
                f,
                "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
            ),
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Non-finite Hessian entry at ({row}, {col}): {value}")
            }

            // ---- argmin ----
            OptError::Backend { kind, text } => write!(f, "argmin {kind:?}: {text}"),

            // ---- Model ----
            OptError::Param(err) => write!(f, "Parameter error: {err}"),
            OptError::Model(err) => write!(f, "Model error: {err}"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => {
                let (kind, text) = match argmin_err {
                    ArgminError::InvalidParameter { text } => {
                        (BackendErrorKind::InvalidParameter, text)
                    }
                    ArgminError::NotImplemented { text } => (BackendErrorKind::NotImplemented, text),
                    ArgminError::NotInitialized { text } => (BackendErrorKind::NotInitialized, text),
                    ArgminError::ConditionViolated { text } => {
                        (BackendErrorKind::ConditionViolated, text)
                    }
                    ArgminError::CheckpointNotFound { text } => {
                        (BackendErrorKind::CheckpointNotFound, text)
                    }
                    ArgminError::PotentialBug { text } => (BackendErrorKind::PotentialBug, text),
                    ArgminError::ImpossibleError { text } => {
                        (BackendErrorKind::ImpossibleError, text)
                    }
                    other => (BackendErrorKind::Other, other.to_string()),
                };
                OptError::Backend { kind, text }
            }
            Err(err) => OptError::Backend { kind: BackendErrorKind::Other, text: err.to_string() },
        }
    }
}

impl From<GarchError> for OptError {
    fn from(err: GarchError) -> Self {
        match err {
            GarchError::InvalidParameters(param_err) => OptError::Param(param_err),
            other => OptError::Model(Box::new(other)),
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        OptError::Param(err)
    }
}
