//! Variance guards: clamp bounds for the conditional variance recursion.
//!
//! Every σ²_t produced by the recursion (in-sample, forecast, or simulated)
//! is clamped into `[min, max]`, so a single extreme residual cannot push the
//! likelihood into `ln 0` or overflow. The defaults are wide enough to be
//! inactive for any reasonably scaled return series.
use crate::volatility::errors::{GarchError, GarchResult};

/// Default lower clamp for σ²_t.
pub const DEFAULT_VARIANCE_MIN: f64 = 1e-12;

/// Default upper clamp for σ²_t.
pub const DEFAULT_VARIANCE_MAX: f64 = 1e12;

/// Closed interval `[min, max]` with `0 < min < max < ∞`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    pub min: f64,
    pub max: f64,
}

impl VarianceGuards {
    /// Validate a `(min, max)` pair.
    ///
    /// # Errors
    /// `GarchError::InvalidVarianceGuards` when the bounds are unordered,
    /// non-finite, or `min <= 0`.
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        let reason = if !min.is_finite() || !max.is_finite() {
            Some("Variance guards must be finite.")
        } else if min >= max {
            Some("Variance guards must have min < max.")
        } else if min <= 0.0 {
            Some("Variance guards must be strictly positive.")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(GarchError::InvalidVarianceGuards { min, max, reason }),
            None => Ok(VarianceGuards { min, max }),
        }
    }

    /// Re-check bounds that may have been set through the public fields.
    ///
    /// # Errors
    /// Same as [`VarianceGuards::new`].
    pub fn validate(&self) -> GarchResult<()> {
        VarianceGuards::new((self.min, self.max)).map(|_| ())
    }

    /// Clamp `value` into the guard interval.
    ///
    /// NaN is passed through so the recursion's finiteness check can report it.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        VarianceGuards { min: DEFAULT_VARIANCE_MIN, max: DEFAULT_VARIANCE_MAX }
    }
}
