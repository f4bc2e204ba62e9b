//! GARCH(1,1) model bound to one return series.
//!
//! A [`GarchModel`] owns validated parameters together with the
//! conditional-variance path, residuals, and log-likelihood they imply for
//! a specific [`ReturnSeries`]. The path is recomputed whenever the
//! parameters change ([`GarchModel::set_params`]); once wrapped in an
//! [`EstimationResult`](crate::volatility::models::estimation::EstimationResult)
//! the model is read-only.
use crate::volatility::{
    core::{
        data::ReturnSeries,
        forecasts::{VarianceForecast, forecast_recursion},
        guards::VarianceGuards,
        init::Init,
        options::{GarchOptions, MeanSpec},
        params::GarchParams,
        validation::{validate_horizon, validate_periods_per_year},
        variance::{compute_variance, likelihood_driver, next_variance},
        workspace::WorkSpace,
    },
    errors::GarchResult,
};
use ndarray::Array1;

/// Parameters plus the in-sample state they imply.
///
/// - `sigma2[t]`: conditional variance σ²_t of `returns[t]`.
/// - `resid[t]`: ε_t = r_t − μ (μ = 0 under a zero mean).
/// - `loglik`: total Gaussian log-likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchModel {
    params: GarchParams,
    mean: MeanSpec,
    init: Init,
    guards: VarianceGuards,
    sigma2: Array1<f64>,
    resid: Array1<f64>,
    loglik: f64,
}

impl GarchModel {
    /// Run the variance recursion for `series` at `params`.
    ///
    /// Under [`MeanSpec::Zero`] any μ carried by `params` is ignored and
    /// stored as 0.
    ///
    /// # Errors
    /// - `GarchError::InvalidParameters` if `params` fail validation.
    /// - Recursion/likelihood errors (`NonFiniteVariance`,
    ///   `InvalidVarianceLogLik`).
    ///
    /// # Examples
    /// ```rust
    /// # use rust_garch::volatility::core::{options::{GarchOptions, SimOpts}, params::GarchParams, simulation::simulate};
    /// # use rust_garch::volatility::models::garch::GarchModel;
    /// let params = GarchParams::new(0.05, 0.1, 0.85).unwrap();
    /// let series = simulate(&params, 250, &SimOpts::default()).unwrap().into_series().unwrap();
    /// let model = GarchModel::new(params, &series, &GarchOptions::default()).unwrap();
    /// assert_eq!(model.nobs(), 250);
    /// assert!(model.conditional_variance().iter().all(|v| *v > 0.0));
    /// ```
    pub fn new(
        params: GarchParams, series: &ReturnSeries, options: &GarchOptions,
    ) -> GarchResult<GarchModel> {
        let mut model = GarchModel {
            params,
            mean: options.mean,
            init: options.init,
            guards: options.variance_guards,
            sigma2: Array1::zeros(series.len()),
            resid: Array1::zeros(series.len()),
            loglik: f64::NAN,
        };
        model.set_params(params, series)?;
        Ok(model)
    }

    /// Replace the parameters and recompute σ², residuals, and ℓ.
    ///
    /// On error the model is left unchanged.
    pub fn set_params(&mut self, params: GarchParams, series: &ReturnSeries) -> GarchResult<()> {
        params.validate()?;
        let params = match self.mean {
            MeanSpec::Zero => GarchParams { mu: 0.0, ..params },
            MeanSpec::Constant => params,
        };
        let ws = WorkSpace::from_params(&params, self.mean);
        let mut sigma2 = Array1::zeros(series.len());
        compute_variance(&ws, series, self.init, &self.guards, sigma2.view_mut())?;
        let loglik = likelihood_driver(&ws, series, sigma2.view())?;

        self.resid = series.values().mapv(|r| r - ws.mu);
        self.sigma2 = sigma2;
        self.params = params;
        self.loglik = loglik;
        Ok(())
    }

    pub fn params(&self) -> &GarchParams {
        &self.params
    }

    pub fn mean(&self) -> MeanSpec {
        self.mean
    }

    pub fn init(&self) -> Init {
        self.init
    }

    pub fn guards(&self) -> &VarianceGuards {
        &self.guards
    }

    /// σ²_1..σ²_T.
    pub fn conditional_variance(&self) -> &Array1<f64> {
        &self.sigma2
    }

    /// σ_t = √σ²_t.
    pub fn conditional_volatility(&self) -> Array1<f64> {
        self.sigma2.mapv(f64::sqrt)
    }

    /// ε_1..ε_T.
    pub fn residuals(&self) -> &Array1<f64> {
        &self.resid
    }

    /// z_t = ε_t / σ_t.
    pub fn standardized_residuals(&self) -> Array1<f64> {
        &self.resid / &self.conditional_volatility()
    }

    /// √(periods · σ²_t), e.g. `periods = TRADING_DAYS` for daily returns.
    ///
    /// # Errors
    /// `GarchError::InvalidPeriodsPerYear` unless `periods` is finite and > 0.
    pub fn annualized_volatility(&self, periods: f64) -> GarchResult<Array1<f64>> {
        validate_periods_per_year(periods)?;
        Ok(self.sigma2.mapv(|s| (periods * s).sqrt()))
    }

    pub fn loglik(&self) -> f64 {
        self.loglik
    }

    pub fn nobs(&self) -> usize {
        self.sigma2.len()
    }

    /// One-step value σ²_{T+1} = ω + α ε²_T + β σ²_T (guarded).
    pub fn one_step_variance(&self) -> f64 {
        let ws = WorkSpace::from_params(&self.params, self.mean);
        self.guards.clamp(next_variance(&ws, self.last_resid(), self.last_sigma2()))
    }

    /// Forecast σ²_{T+1..T+h}.
    ///
    /// The first step equals [`GarchModel::one_step_variance`]; later steps
    /// decay toward σ²_∞ at rate α + β.
    ///
    /// # Errors
    /// `GarchError::InvalidHorizon` when `horizon == 0`.
    pub fn forecast(&self, horizon: usize) -> GarchResult<VarianceForecast> {
        validate_horizon(horizon)?;
        let ws = WorkSpace::from_params(&self.params, self.mean);
        let mut variance = Array1::zeros(horizon);
        forecast_recursion(
            &ws,
            self.last_resid(),
            self.last_sigma2(),
            &self.guards,
            variance.view_mut(),
        );
        Ok(VarianceForecast::new(variance, self.params.uncond_variance(), ws.mu))
    }

    /// Options reproducing this model's recursion (optimizer settings from
    /// `base`).
    pub fn options_from(&self, base: &GarchOptions) -> GarchOptions {
        GarchOptions {
            init: self.init,
            mean: self.mean,
            variance_guards: self.guards,
            ..base.clone()
        }
    }

    // ---- Helper methods ----

    fn last_resid(&self) -> f64 {
        self.resid[self.resid.len() - 1]
    }

    fn last_sigma2(&self) -> f64 {
        self.sigma2[self.sigma2.len() - 1]
    }
}
