//! Validation helpers for GARCH(1,1) parameters, θ vectors, and request
//! arguments.
//!
//! Purpose
//! -------
//! Centralize the domain checks shared by [`GarchParams`], the optimizer
//! workspace, the forecaster, and the estimator, so every entry point reports
//! the same [`ParamError`] / [`GarchError`] for the same violation.
//!
//! Conventions
//! -----------
//! - Parameter checks return [`ParamResult`]; request checks (horizon,
//!   confidence, annualization factor, sample variance) return
//!   [`GarchResult`].
//! - Helpers only validate; none of them clamp or repair inputs.
//!
//! [`GarchParams`]: crate::volatility::core::params::GarchParams
use crate::{
    optimization::numerical_stability::transformations::{GENERAL_TOL, STATIONARITY_MARGIN},
    volatility::{
        core::{data::ReturnSeries, options::MeanSpec},
        errors::{GarchError, GarchResult, ParamError, ParamResult},
    },
};
use ndarray::ArrayView1;

/// Validate ω: finite and strictly positive.
///
/// # Examples
/// ```rust
/// # use rust_garch::volatility::core::validation::validate_omega;
/// # use rust_garch::volatility::errors::ParamError;
/// assert!(validate_omega(0.1).is_ok());
/// assert!(matches!(validate_omega(0.0), Err(ParamError::InvalidOmega { .. })));
/// ```
pub fn validate_omega(omega: f64) -> ParamResult<()> {
    if omega <= 0.0 || !omega.is_finite() {
        return Err(ParamError::InvalidOmega { value: omega });
    }
    Ok(())
}

/// Validate α: finite and non-negative.
pub fn validate_alpha(alpha: f64) -> ParamResult<()> {
    if alpha < 0.0 || !alpha.is_finite() {
        return Err(ParamError::InvalidAlpha { value: alpha });
    }
    Ok(())
}

/// Validate β: finite and non-negative.
pub fn validate_beta(beta: f64) -> ParamResult<()> {
    if beta < 0.0 || !beta.is_finite() {
        return Err(ParamError::InvalidBeta { value: beta });
    }
    Ok(())
}

/// Validate μ: finite.
pub fn validate_mu(mu: f64) -> ParamResult<()> {
    if !mu.is_finite() {
        return Err(ParamError::InvalidMu { value: mu });
    }
    Ok(())
}

/// Strict stationarity for caller-supplied parameters:
/// `α + β < 1 − STATIONARITY_MARGIN`.
///
/// # Errors
/// `ParamError::StationarityViolated { coeff_sum }` otherwise.
pub fn validate_stationarity(alpha: f64, beta: f64) -> ParamResult<()> {
    let coeff_sum = alpha + beta;
    if !(coeff_sum < 1.0 - STATIONARITY_MARGIN) {
        return Err(ParamError::StationarityViolated { coeff_sum });
    }
    Ok(())
}

/// Consistency of a simplex point `(α, β, slack)` produced by the θ-mapping.
///
/// The softmax guarantees `α + β + slack = 1 − STATIONARITY_MARGIN` up to
/// rounding; this helper rejects a negative/non-finite slack and any drift
/// beyond `1e-10`.
pub fn validate_stationarity_and_slack(alpha: f64, beta: f64, slack: f64) -> ParamResult<()> {
    if !(slack >= 0.0 && slack.is_finite()) {
        return Err(ParamError::InvalidSlack { value: slack });
    }
    const SUM_TOL: f64 = 1e-10;
    let total = alpha + beta + slack;
    if (total - (1.0 - STATIONARITY_MARGIN)).abs() > SUM_TOL {
        return Err(ParamError::StationarityViolated { coeff_sum: alpha + beta });
    }
    Ok(())
}

/// Validate an optimizer-space vector θ against the mean specification.
///
/// Layout is `θ = (θ_ω, θ_α, θ_β)` for [`MeanSpec::Zero`] and
/// `θ = (θ_ω, θ_α, θ_β, μ)` for [`MeanSpec::Constant`].
///
/// # Errors
/// - `ParamError::ThetaLengthMismatch` on a length mismatch.
/// - `ParamError::InvalidThetaInput` for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, mean: MeanSpec) -> ParamResult<()> {
    let expected = mean.n_params();
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Forecast horizons start at one step ahead.
pub fn validate_horizon(horizon: usize) -> GarchResult<()> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    Ok(())
}

/// VaR confidence must lie strictly inside `(0, 1)`.
pub fn validate_confidence(level: f64) -> GarchResult<()> {
    if !(level > 0.0 && level < 1.0) {
        return Err(GarchError::InvalidConfidence { level });
    }
    Ok(())
}

/// Annualization factor must be finite and > 0.
pub fn validate_periods_per_year(value: f64) -> GarchResult<()> {
    if !(value > 0.0 && value.is_finite()) {
        return Err(GarchError::InvalidPeriodsPerYear { value });
    }
    Ok(())
}

/// Reject a series whose sample variance is numerically zero.
///
/// Returns the sample variance on success.
///
/// # Errors
/// `GarchError::DegenerateInput { variance }` when `variance <= GENERAL_TOL`.
pub fn validate_series_variance(series: &ReturnSeries) -> GarchResult<f64> {
    let variance = series.sample_variance();
    if !(variance > GENERAL_TOL) {
        return Err(GarchError::DegenerateInput { variance });
    }
    Ok(variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Scalar parameter domains, θ shape/finiteness, stationarity with and
    // without slack, and the request-level checks (horizon, confidence,
    // periods per year, degenerate series).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Scalar parameter checks accept their domain and reject its complement.
    fn scalar_checks_accept_domain_and_reject_complement() {
        assert!(validate_omega(1e-8).is_ok());
        assert!(validate_alpha(0.0).is_ok());
        assert!(validate_beta(0.0).is_ok());
        assert!(validate_mu(-3.0).is_ok());

        assert!(matches!(validate_omega(-1.0), Err(ParamError::InvalidOmega { .. })));
        assert!(matches!(validate_omega(f64::INFINITY), Err(ParamError::InvalidOmega { .. })));
        assert!(matches!(validate_alpha(-0.01), Err(ParamError::InvalidAlpha { .. })));
        assert!(matches!(validate_beta(f64::NAN), Err(ParamError::InvalidBeta { .. })));
        assert!(matches!(validate_mu(f64::NAN), Err(ParamError::InvalidMu { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Stationarity is strict and honors the safety margin.
    //
    // Given
    // -----
    // - α + β = 0.95, exactly 1.0, and 1 − margin / 2.
    //
    // Expect
    // ------
    // - Only 0.95 passes.
    fn stationarity_is_strict_with_margin() {
        assert!(validate_stationarity(0.05, 0.90).is_ok());
        assert_eq!(
            validate_stationarity(0.3, 0.7),
            Err(ParamError::StationarityViolated { coeff_sum: 1.0 })
        );
        let near = 1.0 - STATIONARITY_MARGIN / 2.0;
        assert!(validate_stationarity(near - 0.5, 0.5).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Simplex consistency rejects bad slack and mass drift.
    fn stationarity_and_slack_checks_simplex_mass() {
        let c = 1.0 - STATIONARITY_MARGIN;
        assert!(validate_stationarity_and_slack(0.1, 0.8, c - 0.9).is_ok());
        assert!(matches!(
            validate_stationarity_and_slack(0.1, 0.8, -1e-3),
            Err(ParamError::InvalidSlack { .. })
        ));
        assert!(matches!(
            validate_stationarity_and_slack(0.1, 0.8, 0.5),
            Err(ParamError::StationarityViolated { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // θ length follows the mean specification; non-finite entries are indexed.
    fn validate_theta_checks_length_and_finiteness() {
        assert!(validate_theta(array![0.0, 1.0, 2.0].view(), MeanSpec::Zero).is_ok());
        assert!(validate_theta(array![0.0, 1.0, 2.0, 0.1].view(), MeanSpec::Constant).is_ok());
        assert_eq!(
            validate_theta(array![0.0, 1.0, 2.0].view(), MeanSpec::Constant),
            Err(ParamError::ThetaLengthMismatch { expected: 4, actual: 3 })
        );
        assert!(matches!(
            validate_theta(array![0.0, f64::NAN, 2.0].view(), MeanSpec::Zero),
            Err(ParamError::InvalidThetaInput { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Request-level checks map to their dedicated `GarchError` variants.
    fn request_checks_map_to_dedicated_errors() {
        assert!(validate_horizon(1).is_ok());
        assert_eq!(validate_horizon(0), Err(GarchError::InvalidHorizon { horizon: 0 }));
        assert!(validate_confidence(0.99).is_ok());
        for level in [0.0, 1.0, f64::NAN] {
            assert!(matches!(
                validate_confidence(level),
                Err(GarchError::InvalidConfidence { .. })
            ));
        }
        assert!(validate_periods_per_year(252.0).is_ok());
        assert!(matches!(
            validate_periods_per_year(0.0),
            Err(GarchError::InvalidPeriodsPerYear { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // A constant series is degenerate; a varying one returns its variance.
    fn series_variance_check_flags_constant_series() {
        let flat = ReturnSeries::new(Array1::from_elem(40, 0.0)).unwrap();
        assert_eq!(validate_series_variance(&flat), Err(GarchError::DegenerateInput { variance: 0.0 }));

        let alt = ReturnSeries::new(Array1::from_iter((0..40).map(|i| if i % 2 == 0 { 2.0 } else { -2.0 })))
            .unwrap();
        assert_eq!(validate_series_variance(&alt), Ok(4.0));
    }
}
