//! GARCH(1,1) parameterization and the model ↔ optimizer-space mapping.
//!
//! This module provides the **model-space** parameter container
//! [`GarchParams`] and the numerically stable mapping to and from the
//! unconstrained optimizer vector θ.
//!
//! ## Mapping conventions
//! - `θ_ω = softplus⁻¹(ω)` ensures `ω > 0`.
//! - `(α, β, slack)` live on a **scaled simplex** of total mass
//!   `(1 − margin)`; θ stores **log-odds relative to slack** (slack is the
//!   softmax baseline with an implicit zero logit).
//! - Under [`MeanSpec::Constant`] the mean μ is appended to θ unchanged.
//! - The inverse map clamps tiny simplex weights to `LOGIT_EPS` before
//!   taking logs, so boundary values such as `α = 0` map to a large negative
//!   but finite logit.
//!
//! ## Invariants validated by constructors
//! - `ω > 0`, `α ≥ 0`, `β ≥ 0`, all finite
//! - `α + β < 1 − margin`, so the derived `slack = (1 − margin) − α − β`
//!   is positive
//! - `μ` finite
use crate::{
    optimization::numerical_stability::transformations::{
        LOGIT_EPS, STATIONARITY_MARGIN, safe_softmax, safe_softplus, safe_softplus_inv,
    },
    volatility::{
        core::{
            data::ReturnSeries,
            options::MeanSpec,
            validation::{
                validate_alpha, validate_beta, validate_mu, validate_omega, validate_stationarity,
                validate_stationarity_and_slack, validate_theta,
            },
        },
        errors::ParamResult,
    },
};
use ndarray::{Array1, ArrayView1, aview_mut1, s};

/// Default ARCH coefficient of [`GarchParams::initial_guess`].
pub const INITIAL_ALPHA: f64 = 0.05;

/// Default GARCH coefficient of [`GarchParams::initial_guess`].
pub const INITIAL_BETA: f64 = 0.90;

/// Constrained **model-space** parameters of a GARCH(1,1) process.
///
/// ```text
/// r_t   = μ + ε_t,        ε_t = σ_t z_t
/// σ²_t  = ω + α ε²_{t−1} + β σ²_{t−1}
/// ```
///
/// Invariants are validated at construction; see [`GarchParams::to_theta`]
/// for the optimizer-space mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarchParams {
    /// ω > 0
    pub omega: f64,
    /// α ≥ 0
    pub alpha: f64,
    /// β ≥ 0
    pub beta: f64,
    /// Constant mean (0 under [`MeanSpec::Zero`]).
    pub mu: f64,
}

impl GarchParams {
    /// Create validated zero-mean parameters.
    ///
    /// # Errors
    /// `ParamError::{InvalidOmega, InvalidAlpha, InvalidBeta,
    /// StationarityViolated}` naming the first violated constraint.
    ///
    /// # Examples
    /// ```rust
    /// # use rust_garch::volatility::core::params::GarchParams;
    /// let p = GarchParams::new(0.05, 0.10, 0.85).unwrap();
    /// assert!((p.persistence() - 0.95).abs() < 1e-15);
    /// assert!(GarchParams::new(0.05, 0.30, 0.75).is_err());
    /// ```
    pub fn new(omega: f64, alpha: f64, beta: f64) -> ParamResult<Self> {
        validate_omega(omega)?;
        validate_alpha(alpha)?;
        validate_beta(beta)?;
        validate_stationarity(alpha, beta)?;
        Ok(GarchParams { omega, alpha, beta, mu: 0.0 })
    }

    /// Same parameters with a constant mean μ.
    ///
    /// # Errors
    /// `ParamError::InvalidMu` if `mu` is not finite.
    pub fn with_mu(self, mu: f64) -> ParamResult<Self> {
        validate_mu(mu)?;
        Ok(GarchParams { mu, ..self })
    }

    /// Re-run every construction check. Useful on values whose public fields
    /// were edited after construction.
    pub fn validate(&self) -> ParamResult<()> {
        validate_omega(self.omega)?;
        validate_alpha(self.alpha)?;
        validate_beta(self.beta)?;
        validate_stationarity(self.alpha, self.beta)?;
        validate_mu(self.mu)
    }

    /// Build validated parameters from an optimizer-space vector θ.
    ///
    /// 1. `ω = softplus(θ₀)`.
    /// 2. `(α, β, slack)` from a max-shift softmax of `θ[1..3]` with an
    ///    implicit zero slack logit, scaled to total mass `1 − margin`.
    /// 3. `μ = θ₃` under [`MeanSpec::Constant`], else 0.
    ///
    /// # Errors
    /// θ length/finiteness errors, or a domain error if the mapped values
    /// leave the admissible region through floating-point underflow.
    pub fn from_theta(theta: ArrayView1<f64>, mean: MeanSpec) -> ParamResult<Self> {
        validate_theta(theta, mean)?;
        let omega = safe_softplus(theta[0]);
        validate_omega(omega)?;
        let mut weights = [0.0_f64; 2];
        let slack = safe_softmax(theta.slice(s![1..3]), aview_mut1(&mut weights));
        let [alpha, beta] = weights;
        validate_alpha(alpha)?;
        validate_beta(beta)?;
        validate_stationarity_and_slack(alpha, beta, slack)?;
        let mu = match mean {
            MeanSpec::Zero => 0.0,
            MeanSpec::Constant => theta[3],
        };
        Ok(GarchParams { omega, alpha, beta, mu })
    }

    /// Map model-space parameters to **optimizer-space** θ.
    ///
    /// Layout: `θ = [θ_ω, θ_α, θ_β]` (plus `μ` under [`MeanSpec::Constant`]):
    /// - `θ_ω = softplus⁻¹(ω)`
    /// - `θ_k = ln(π_k) − ln(π_slack)` with `π = component / (1 − margin)`,
    ///   each `π` clamped below at `LOGIT_EPS`.
    pub fn to_theta(&self, mean: MeanSpec) -> Array1<f64> {
        let denom_inv = 1.0 / (1.0 - STATIONARITY_MARGIN);
        let log_odds = |x: f64| (x * denom_inv).max(LOGIT_EPS).ln();
        let log_slack = log_odds(self.slack());
        let mut theta = Array1::zeros(mean.n_params());
        theta[0] = safe_softplus_inv(self.omega);
        theta[1] = log_odds(self.alpha) - log_slack;
        theta[2] = log_odds(self.beta) - log_slack;
        if mean == MeanSpec::Constant {
            theta[3] = self.mu;
        }
        theta
    }

    /// Model-space vector `φ = (ω, α, β)` or `(ω, α, β, μ)`; the coordinates
    /// standard errors are reported in.
    pub fn model_vector(&self, mean: MeanSpec) -> Array1<f64> {
        match mean {
            MeanSpec::Zero => Array1::from(vec![self.omega, self.alpha, self.beta]),
            MeanSpec::Constant => Array1::from(vec![self.omega, self.alpha, self.beta, self.mu]),
        }
    }

    /// Simplex remainder `(1 − margin) − α − β`, from the current α and β.
    pub fn slack(&self) -> f64 {
        1.0 - STATIONARITY_MARGIN - self.alpha - self.beta
    }

    /// Persistence `α + β`.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Unconditional variance `σ²_∞ = ω / (1 − α − β)`.
    ///
    /// Finite by construction since `α + β < 1 − margin`.
    pub fn uncond_variance(&self) -> f64 {
        self.omega / (1.0 - self.alpha - self.beta)
    }

    /// Number of periods for a variance shock to decay by half,
    /// `ln(0.5) / ln(α + β)`. Zero when `α + β = 0`.
    pub fn half_life(&self) -> f64 {
        let persistence = self.persistence();
        if persistence <= 0.0 {
            return 0.0;
        }
        0.5_f64.ln() / persistence.ln()
    }

    /// Conventional starting point for estimation.
    ///
    /// `α = 0.05`, `β = 0.90`, and `ω = 0.05·var` so that the implied
    /// unconditional variance matches the sample variance. Under
    /// [`MeanSpec::Constant`], μ starts at the sample mean.
    ///
    /// A degenerate (zero-variance) series yields `InvalidOmega`; the
    /// estimator reports `DegenerateInput` before reaching this point.
    pub fn initial_guess(series: &ReturnSeries, mean: MeanSpec) -> ParamResult<Self> {
        let variance = series.sample_variance();
        let omega = (1.0 - INITIAL_ALPHA - INITIAL_BETA) * variance;
        let params = GarchParams::new(omega, INITIAL_ALPHA, INITIAL_BETA)?;
        match mean {
            MeanSpec::Zero => Ok(params),
            MeanSpec::Constant => params.with_mu(series.mean()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::ParamError;
    use ndarray::{Array1, array};

    #[test]
    // Purpose
    // -------
    // `new` stores the triple, computes slack, and defaults μ to 0.
    fn new_computes_slack_and_zero_mean() {
        let p = GarchParams::new(0.02, 0.08, 0.9).unwrap();
        assert_eq!((p.omega, p.alpha, p.beta, p.mu), (0.02, 0.08, 0.9, 0.0));
        assert!((p.slack() - (1.0 - STATIONARITY_MARGIN - 0.98)).abs() < 1e-15);
        assert!((p.uncond_variance() - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Each domain violation is reported with its own `ParamError`.
    //
    // Given
    // -----
    // - ω = 0, α < 0, β < 0, α + β = 1.05.
    //
    // Expect
    // ------
    // - InvalidOmega, InvalidAlpha, InvalidBeta, StationarityViolated.
    fn new_rejects_out_of_domain_values() {
        assert!(matches!(GarchParams::new(0.0, 0.1, 0.8), Err(ParamError::InvalidOmega { .. })));
        assert!(matches!(GarchParams::new(0.1, -0.1, 0.8), Err(ParamError::InvalidAlpha { .. })));
        assert!(matches!(GarchParams::new(0.1, 0.1, -0.8), Err(ParamError::InvalidBeta { .. })));
        assert!(matches!(
            GarchParams::new(0.1, 0.25, 0.8),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            GarchParams::new(0.1, 0.1, 0.8).unwrap().with_mu(f64::INFINITY),
            Err(ParamError::InvalidMu { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `to_theta` followed by `from_theta` reproduces interior parameters for
    // both mean specifications.
    //
    // Given
    // -----
    // - ω = 0.05, α = 0.1, β = 0.85, μ = 0.03.
    //
    // Expect
    // ------
    // - Every coordinate recovered within 1e-10.
    fn theta_mapping_reproduces_interior_parameters() {
        let params = GarchParams::new(0.05, 0.1, 0.85).unwrap().with_mu(0.03).unwrap();
        for mean in [MeanSpec::Zero, MeanSpec::Constant] {
            let theta = params.to_theta(mean);
            assert_eq!(theta.len(), mean.n_params());
            let back = GarchParams::from_theta(theta.view(), mean).unwrap();
            assert!((back.omega - params.omega).abs() < 1e-10);
            assert!((back.alpha - params.alpha).abs() < 1e-10);
            assert!((back.beta - params.beta).abs() < 1e-10);
            let expected_mu = if mean == MeanSpec::Constant { 0.03 } else { 0.0 };
            assert!((back.mu - expected_mu).abs() < 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Coefficients edited after construction, or set in a struct literal,
    // are what θ encodes.
    //
    // Given
    // -----
    // - `new(0.05, 0.10, 0.85)` with α then lowered to 0.02.
    // - A struct literal (0.05, 0.10, 0.85).
    //
    // Expect
    // ------
    // - Both validate and map through θ back to their own α and β.
    fn edited_coefficients_round_trip_through_theta() {
        // Arrange
        let mut edited = GarchParams::new(0.05, 0.10, 0.85).unwrap();
        edited.alpha = 0.02;
        let literal = GarchParams { omega: 0.05, alpha: 0.10, beta: 0.85, mu: 0.0 };

        for params in [edited, literal] {
            // Act
            params.validate().unwrap();
            let back = GarchParams::from_theta(params.to_theta(MeanSpec::Zero).view(), MeanSpec::Zero)
                .unwrap();

            // Assert
            assert!((back.alpha - params.alpha).abs() < 1e-10, "alpha {}", back.alpha);
            assert!((back.beta - params.beta).abs() < 1e-10, "beta {}", back.beta);
            assert!((back.slack() - params.slack()).abs() < 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // Any finite θ, however extreme, maps into the stationary region.
    fn from_theta_always_lands_in_stationary_region() {
        for theta in [array![-30.0, 40.0, 45.0], array![50.0, -700.0, 700.0], array![0.0, 0.0, 0.0]] {
            let p = GarchParams::from_theta(theta.view(), MeanSpec::Zero).unwrap();
            assert!(p.omega > 0.0);
            assert!(p.alpha >= 0.0 && p.beta >= 0.0);
            assert!(p.persistence() < 1.0);
        }
        assert!(matches!(
            GarchParams::from_theta(array![0.0, 0.0].view(), MeanSpec::Zero),
            Err(ParamError::ThetaLengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Boundary values such as α = 0 produce finite θ.
    fn to_theta_is_finite_at_zero_alpha() {
        let p = GarchParams::new(0.1, 0.0, 0.5).unwrap();
        let theta = p.to_theta(MeanSpec::Zero);
        assert!(theta.iter().all(|v| v.is_finite()));
        let back = GarchParams::from_theta(theta.view(), MeanSpec::Zero).unwrap();
        assert!(back.alpha < 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Derived quantities follow their closed forms.
    fn derived_quantities_follow_closed_forms() {
        let p = GarchParams::new(0.1, 0.1, 0.8).unwrap();
        assert!((p.uncond_variance() - 1.0).abs() < 1e-12);
        assert!((p.half_life() - 0.5_f64.ln() / 0.9_f64.ln()).abs() < 1e-12);
        assert_eq!(GarchParams::new(0.1, 0.0, 0.0).unwrap().half_life(), 0.0);
        assert_eq!(p.model_vector(MeanSpec::Zero), array![0.1, 0.1, 0.8]);
        assert_eq!(p.model_vector(MeanSpec::Constant).len(), 4);
    }

    #[test]
    // Purpose
    // -------
    // The initial guess matches the sample variance through σ²_∞ and starts
    // μ at the sample mean under a constant mean.
    fn initial_guess_matches_sample_moments() {
        let data = Array1::from_iter((0..60).map(|i| 1.0 + if i % 2 == 0 { 0.5 } else { -0.5 }));
        let series = ReturnSeries::new(data).unwrap();
        let zero = GarchParams::initial_guess(&series, MeanSpec::Zero).unwrap();
        assert!((zero.uncond_variance() - series.sample_variance()).abs() < 1e-12);
        assert_eq!(zero.mu, 0.0);
        let constant = GarchParams::initial_guess(&series, MeanSpec::Constant).unwrap();
        assert!((constant.mu - 1.0).abs() < 1e-12);
    }
}
