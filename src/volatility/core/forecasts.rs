//! Out-of-sample variance forecasting for GARCH(1,1).
//!
//! Purpose
//! -------
//! Roll the variance recursion beyond the sample and package the path with
//! the derived quantities risk users ask for: volatilities, parametric
//! Value-at-Risk, and horizon-aggregate volatility.
//!
//! Key behaviors
//! -------------
//! - The first step uses the last in-sample residual and variance,
//!   `σ̂²_{T+1} = ω + α ε²_T + β σ²_T`; later steps replace `ε²` by its
//!   conditional expectation, `σ̂²_{T+h} = ω + (α + β) σ̂²_{T+h−1}`.
//!   Unrolled, `σ̂²_{T+h} = σ²_∞ + (α + β)^{h−1} (σ̂²_{T+1} − σ²_∞)`.
//! - Every step is clamped with the model's [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - `variance[i]` stores the `(i + 1)`-step-ahead forecast.
//! - VaR is reported as a positive loss: `VaR_h = −(μ + σ_h Φ⁻¹(1 − c))`.
use crate::volatility::{
    core::{
        guards::VarianceGuards, validation::validate_confidence, variance::next_variance,
        workspace::WorkSpace,
    },
    errors::GarchResult,
};
use ndarray::{Array1, ArrayViewMut1};
use statrs::distribution::{ContinuousCDF, Normal};

/// Forecast path of conditional variances and derived volatilities.
#[derive(Debug, Clone, PartialEq)]
pub struct VarianceForecast {
    /// `σ̂²_{T+1}, …, σ̂²_{T+h}`.
    pub variance: Array1<f64>,
    /// `√variance`, elementwise.
    pub volatility: Array1<f64>,
    /// Mean-reversion target `σ²_∞ = ω / (1 − α − β)`.
    pub uncond_variance: f64,
    /// Return mean used for VaR (0 under a zero-mean model).
    pub mu: f64,
}

impl VarianceForecast {
    /// Wrap a variance path, deriving volatilities.
    pub fn new(variance: Array1<f64>, uncond_variance: f64, mu: f64) -> VarianceForecast {
        let volatility = variance.mapv(f64::sqrt);
        VarianceForecast { variance, volatility, uncond_variance, mu }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.variance.len()
    }

    /// Per-step Gaussian Value-at-Risk at confidence `confidence`.
    ///
    /// # Errors
    /// - `GarchError::InvalidConfidence` unless `0 < confidence < 1`.
    /// - `GarchError::InvalidNormalParam` if the standard normal cannot be
    ///   built (never for fixed `(0, 1)`).
    pub fn value_at_risk(&self, confidence: f64) -> GarchResult<Array1<f64>> {
        validate_confidence(confidence)?;
        let z = Normal::new(0.0, 1.0)?.inverse_cdf(1.0 - confidence);
        Ok(self.volatility.mapv(|sigma| -(self.mu + sigma * z)))
    }

    /// Volatility of the cumulative return over the whole horizon,
    /// `√Σ_h σ̂²_{T+h}` (Gaussian innovations are uncorrelated).
    pub fn aggregate_volatility(&self) -> f64 {
        self.variance.sum().sqrt()
    }
}

/// Roll the recursion forward into `out` (its length is the horizon).
///
/// `resid_last` and `sigma2_last` are `ε_T` and `σ²_T`. Returns the last
/// forecast `σ̂²_{T+h}`, or `sigma2_last` for an empty buffer.
pub fn forecast_recursion(
    ws: &WorkSpace, resid_last: f64, sigma2_last: f64, guards: &VarianceGuards,
    mut out: ArrayViewMut1<f64>,
) -> f64 {
    let persistence = ws.persistence();
    let mut current = sigma2_last;
    for (h, slot) in out.iter_mut().enumerate() {
        current = if h == 0 {
            guards.clamp(next_variance(ws, resid_last, sigma2_last))
        } else {
            guards.clamp(ws.omega + persistence * current)
        };
        *slot = current;
    }
    current
}
