//! Initialization policy for σ²_1, the first conditional variance.
//!
//! The GARCH recursion needs a starting value before any residual has been
//! observed. [`Init`] selects it:
//!
//! - `SampleVariance` (default): the sample variance of the return series.
//!   Independent of the parameters, so it contributes nothing to the gradient.
//! - `UncondVariance`: the model-implied `ω / (1 − α − β)`; its derivatives
//!   seed the sensitivity recursion.
//! - `Fixed(v)`: a user-supplied `v > 0`.
use crate::volatility::errors::{GarchError, GarchResult};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Init {
    #[default]
    SampleVariance,
    UncondVariance,
    Fixed(f64),
}

impl Init {
    pub const fn sample_variance() -> Self {
        Init::SampleVariance
    }

    pub const fn uncond_variance() -> Self {
        Init::UncondVariance
    }

    /// Fixed starting variance.
    ///
    /// # Errors
    /// `GarchError::InvalidInitFixed` unless `value` is finite and > 0.
    pub fn fixed(value: f64) -> GarchResult<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(GarchError::InvalidInitFixed { value });
        }
        Ok(Init::Fixed(value))
    }

    /// Re-check a `Fixed` value built without [`Init::fixed`].
    ///
    /// # Errors
    /// `GarchError::InvalidInitFixed` as in [`Init::fixed`].
    pub fn validate(&self) -> GarchResult<()> {
        if let Init::Fixed(value) = *self {
            Init::fixed(value)?;
        }
        Ok(())
    }
}
