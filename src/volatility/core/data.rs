//! Return-series container for GARCH models.
//!
//! Purpose
//! -------
//! Provide the validated, immutable input series every GARCH operation works
//! on, plus a helper that derives returns from a price path the way daily
//! percent-return workflows usually do.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries::new`] enforces non-emptiness, finiteness, and a minimum
//!   length of [`MIN_OBSERVATIONS`].
//! - [`ReturnSeries::from_prices`] builds simple or log returns from strictly
//!   positive prices, optionally rescaled (e.g. `scale = 100` for percent).
//! - Summary statistics used by the recursion (`mean`, `sample_variance`) are
//!   computed on demand.
//!
//! Invariants & assumptions
//! ------------------------
//! - Storage is private; the series cannot change after construction.
//! - A constant series is a *valid* `ReturnSeries`; rejecting zero-variance
//!   input is the estimator's job (`GarchError::DegenerateInput`).
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, each validation failure, price
//!   conversion for both return kinds, and the summary statistics.
use crate::volatility::errors::{GarchError, GarchResult};
use ndarray::{Array1, ArrayView1};

/// Fewest observations accepted by [`ReturnSeries::new`].
pub const MIN_OBSERVATIONS: usize = 30;

/// How consecutive prices are turned into returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    /// `p_t / p_{t-1} − 1`
    Simple,
    /// `ln(p_t / p_{t-1})`
    Log,
}

/// Validated, ordered sequence of returns `r_1..r_T`.
///
/// Invariants
/// ----------
/// - `len() >= MIN_OBSERVATIONS`.
/// - Every entry is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    data: Array1<f64>,
}

impl ReturnSeries {
    /// Validate and wrap a return series.
    ///
    /// Errors
    /// ------
    /// - `GarchError::EmptySeries` when `data` is empty.
    /// - `GarchError::NonFiniteData { index, value }` for the first NaN/±∞.
    /// - `GarchError::SeriesTooShort { len, min }` below [`MIN_OBSERVATIONS`].
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        if data.is_empty() {
            return Err(GarchError::EmptySeries);
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GarchError::NonFiniteData { index, value });
        }
        if data.len() < MIN_OBSERVATIONS {
            return Err(GarchError::SeriesTooShort { len: data.len(), min: MIN_OBSERVATIONS });
        }
        Ok(Self { data })
    }

    /// Build returns from a price path and validate them with [`ReturnSeries::new`].
    ///
    /// `scale` multiplies every return (`100.0` gives percent returns). The
    /// resulting series has `prices.len() − 1` entries.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidScale` if `scale` is not finite and > 0.
    /// - `GarchError::NonFiniteData` / `GarchError::NonPositivePrice` for the
    ///   first bad price (indexed into `prices`).
    /// - Any error of [`ReturnSeries::new`] on the derived returns.
    pub fn from_prices(prices: ArrayView1<f64>, kind: ReturnKind, scale: f64) -> GarchResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GarchError::InvalidScale { value: scale });
        }
        for (index, &value) in prices.iter().enumerate() {
            if !value.is_finite() {
                return Err(GarchError::NonFiniteData { index, value });
            }
            if value <= 0.0 {
                return Err(GarchError::NonPositivePrice { index, value });
            }
        }
        if prices.len() < 2 {
            return Err(GarchError::EmptySeries);
        }
        let returns: Array1<f64> = prices
            .windows(2)
            .into_iter()
            .map(|w| {
                let ratio = w[1] / w[0];
                match kind {
                    ReturnKind::Simple => scale * (ratio - 1.0),
                    ReturnKind::Log => scale * ratio.ln(),
                }
            })
            .collect();
        Self::new(returns)
    }

    /// Read-only view of the returns.
    pub fn values(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample mean.
    pub fn mean(&self) -> f64 {
        self.data.sum() / self.data.len() as f64
    }

    /// Population variance (divisor `T`).
    pub fn sample_variance(&self) -> f64 {
        let mean = self.mean();
        self.data.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / self.data.len() as f64
    }

    /// Most recent return `r_T`.
    pub fn last(&self) -> f64 {
        self.data[self.data.len() - 1]
    }
}
