//! GARCH(1,1) maximum-likelihood estimator.
//!
//! This module wires the Gaussian GARCH(1,1) likelihood to the
//! [`LogLikelihood`] trait and drives the argmin-backed optimizer.
//!
//! Key ideas:
//! - Parameters live in unconstrained space: `ω = softplus(θ₀)`,
//!   `(α, β, slack) = (1 − margin)·softmax(θ₁, θ₂, 0)`, `μ = θ₃`.
//! - The objective handed to the optimizer is the **average** log-likelihood
//!   `ℓ(θ)/T`; reported likelihoods are totals.
//! - The gradient uses the chain rule:
//!   1) accumulate `∂ℓ/∂φ` via the σ²-sensitivity recursion;
//!   2) map to θ-space through the softplus and scaled-softmax Jacobians.
//! - Inference (standard errors) is carried out in model space `φ`.
use crate::{
    inference::{
        calc_standard_errors, errors::InferenceError, outer_product,
        table::{CoefficientTable, StdErrorKind},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Grad, LogLikelihood, OptimStatus, Theta, maximize},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            options::{GarchOptions, MeanSpec},
            params::GarchParams,
            validation::{validate_series_variance, validate_theta},
            workspace::{GarchScratch, WorkSpace},
        },
        errors::{GarchError, GarchResult},
        models::{
            estimation::{ConvergenceStatus, EstimationResult},
            garch::GarchModel,
            model_internals::{calculate_scores, loglik_at, model_space_gradient, theta_gradient},
        },
    },
};
use ndarray::{Array1, Array2};
use std::cell::RefCell;

/// Maximum-likelihood estimator for GARCH(1,1).
///
/// Holds the estimation options and scratch buffers (σ² path and
/// sensitivities) reused across likelihood evaluations. The buffers are
/// `RefCell`-backed: one estimator serves one fit at a time and is not
/// `Sync`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Estimator {
    pub options: GarchOptions,
    scratch: GarchScratch,
}

impl Estimator {
    pub fn new(options: GarchOptions) -> Estimator {
        Estimator { options, scratch: GarchScratch::default() }
    }

    /// Fit GARCH(1,1) to `series` starting from `initial_guess`.
    ///
    /// ## Steps
    /// 1. Reject invalid options, a zero-variance series, and an invalid
    ///    initial guess.
    /// 2. Map the guess to θ and maximize the average log-likelihood.
    /// 3. Map `θ̂` back to model space and rebuild the [`GarchModel`] (σ²
    ///    path and total log-likelihood at the optimum).
    /// 4. Classify the outcome (see [`ConvergenceStatus`]).
    ///
    /// ## Errors
    /// - Any [`GarchOptions::validate`] error for options edited through
    ///   their public fields.
    /// - `GarchError::DegenerateInput` for a (numerically) constant series.
    /// - `GarchError::InvalidParameters` for an invalid `initial_guess`.
    /// - `GarchError::NonConvergence` when the iteration cap is hit, and
    ///   `GarchError::EstimationFailed` for any other non-converged
    ///   termination; both carry the last-best [`EstimationResult`].
    /// - `GarchError::OptimizationFailed` (or a model error) when the
    ///   optimizer aborts before producing a result.
    pub fn fit(
        &self, series: &ReturnSeries, initial_guess: GarchParams,
    ) -> GarchResult<EstimationResult> {
        self.options.validate()?;
        validate_series_variance(series)?;
        initial_guess.validate()?;
        let mean = self.options.mean;
        let theta0 = initial_guess.to_theta(mean);

        let optim = maximize(self, theta0, series, &self.options.mle_opts)?;
        let params = GarchParams::from_theta(optim.theta_hat.view(), mean)?;
        let model = GarchModel::new(params, series, &self.options)?;
        let status = classify(params.persistence(), &optim.status, self.options.boundary_tol);
        let result = EstimationResult::new(model, status, optim);

        match status {
            ConvergenceStatus::Converged | ConvergenceStatus::Boundary => Ok(result),
            ConvergenceStatus::MaxIterationsReached => {
                Err(GarchError::NonConvergence { result: Box::new(result) })
            }
            ConvergenceStatus::Failed => {
                Err(GarchError::EstimationFailed { result: Box::new(result) })
            }
        }
    }

    /// Coefficient table with classical or robust standard errors.
    ///
    /// Standard errors are computed in model space
    /// `φ = (ω, α, β[, μ])` at the fitted parameters:
    /// - the observed information is the finite-difference Jacobian of the
    ///   analytic gradient of `−ℓ(φ)`;
    /// - `Robust` uses the sandwich `J⁺ S J⁺` with `S = Σ_t s_t s_tᵀ`.
    ///
    /// `series` must be the series `result` was fitted on.
    ///
    /// ## Errors
    /// - `GarchError::InferenceFailed` on a length mismatch, a failed Hessian,
    ///   or invalid standard errors.
    /// - Recursion errors while building scores, or the first one raised by
    ///   the gradient when it leaves the Hessian unusable.
    pub fn inference(
        &self, result: &EstimationResult, series: &ReturnSeries, kind: StdErrorKind,
    ) -> GarchResult<CoefficientTable> {
        if series.len() != result.nobs() {
            return Err(InferenceError::EstimateDimMismatch {
                expected: result.nobs(),
                actual: series.len(),
            }
            .into());
        }
        let options = result.model().options_from(&self.options);
        let mean = options.mean;
        let phi_hat = result.params().model_vector(mean);

        let neg_grad = |phi: &Array1<f64>| -> GarchResult<Array1<f64>> {
            let ws = WorkSpace::from_model_vector(phi.view(), mean)?;
            Ok(-model_space_gradient(&ws, series, &options, &self.scratch)?)
        };

        let meat = match kind {
            StdErrorKind::Classical => None,
            StdErrorKind::Robust => {
                let ws = WorkSpace::from_params(result.params(), mean);
                let scores = calculate_scores(&ws, series, &options, &self.scratch)?;
                Some(outer_product(&scores, phi_hat.len())?)
            }
        };
        let std_errors = observed_std_errors(neg_grad, &phi_hat, meat.as_ref())?;
        Ok(CoefficientTable::new(param_names(mean), phi_hat, std_errors, kind)?)
    }
}

impl LogLikelihood for Estimator {
    type Data = ReturnSeries;

    /// Average log-likelihood `ℓ(θ)/T`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let ws = WorkSpace::from_theta(theta.view(), self.options.mean)?;
        let total = loglik_at(&ws, data, &self.options, &self.scratch)?;
        Ok(total / data.len() as f64)
    }

    /// Length and finiteness of θ for the configured mean.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.options.mean)?;
        Ok(())
    }

    /// Analytic `∇_θ (ℓ/T)`.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let ws = WorkSpace::from_theta(theta.view(), self.options.mean)?;
        let model_grad = model_space_gradient(&ws, data, &self.options, &self.scratch)?;
        let grad = theta_gradient(theta.view(), &ws, model_grad);
        Ok(grad / data.len() as f64)
    }
}

// ---- Helper methods ----

/// [`calc_standard_errors`] over a fallible gradient map.
///
/// Failed evaluations become NaN vectors for the Hessian, and the first
/// error is kept. It is returned only when the Hessian itself fails, so a
/// central-difference step outside the domain that the forward pass
/// recovers from is not an error.
fn observed_std_errors<G>(
    neg_grad: G, phi_hat: &Array1<f64>, meat: Option<&Array2<f64>>,
) -> GarchResult<Array1<f64>>
where
    G: Fn(&Array1<f64>) -> GarchResult<Array1<f64>>,
{
    let first_err: RefCell<Option<GarchError>> = RefCell::new(None);
    let eval = |phi: &Array1<f64>| match neg_grad(phi) {
        Ok(g) => g,
        Err(e) => {
            first_err.borrow_mut().get_or_insert(e);
            Array1::from_elem(phi.len(), f64::NAN)
        }
    };
    match calc_standard_errors(&eval, phi_hat, meat) {
        Ok(std_errors) => Ok(std_errors),
        Err(err) => Err(first_err.take().unwrap_or_else(|| err.into())),
    }
}

fn classify(persistence: f64, status: &OptimStatus, boundary_tol: f64) -> ConvergenceStatus {
    if persistence >= 1.0 - boundary_tol {
        return ConvergenceStatus::Boundary;
    }
    match status {
        OptimStatus::Converged => ConvergenceStatus::Converged,
        OptimStatus::MaxItersReached => ConvergenceStatus::MaxIterationsReached,
        OptimStatus::Stopped { .. } | OptimStatus::NotTerminated => ConvergenceStatus::Failed,
    }
}

fn param_names(mean: MeanSpec) -> Vec<String> {
    let names: &[&str] = match mean {
        MeanSpec::Zero => &["omega", "alpha", "beta"],
        MeanSpec::Constant => &["omega", "alpha", "beta", "mu"],
    };
    names.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::loglik_optimizer::{OptimizerKind, Tolerances},
        volatility::core::{guards::VarianceGuards, options::SimOpts, simulation::simulate},
    };
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Input rejection, status classification, LogLikelihood conformance,
    // and short end-to-end fits on simulated data.
    // -------------------------------------------------------------------------

    fn true_params() -> GarchParams {
        GarchParams::new(0.05, 0.1, 0.85).unwrap()
    }

    fn series(n: usize) -> ReturnSeries {
        simulate(&true_params(), n, &SimOpts::default()).unwrap().into_series().unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A constant series fails before any optimization.
    fn fit_rejects_zero_variance_series() {
        let s = ReturnSeries::new(Array1::zeros(100)).unwrap();
        let guess = GarchParams::new(0.01, 0.05, 0.9).unwrap();
        assert_eq!(
            Estimator::default().fit(&s, guess),
            Err(GarchError::DegenerateInput { variance: 0.0 })
        );
    }

    #[test]
    // Purpose
    // -------
    // An initial guess outside the stationary region is rejected.
    fn fit_rejects_invalid_initial_guess() {
        let mut guess = true_params();
        guess.alpha = 0.2;
        assert!(matches!(
            Estimator::default().fit(&series(200), guess),
            Err(GarchError::InvalidParameters(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Options written through their public fields are checked before the
    // series is touched.
    //
    // Given
    // -----
    // - `boundary_tol = 0.0` and inverted variance guards, each on top of
    //   the defaults.
    //
    // Expect
    // ------
    // - `InvalidBoundaryTol` and `InvalidVarianceGuards` from `fit`.
    fn fit_rejects_struct_literal_options() {
        // Arrange
        let s = series(200);
        let zero_tol = GarchOptions { boundary_tol: 0.0, ..GarchOptions::default() };
        let inverted = GarchOptions {
            variance_guards: VarianceGuards { min: 1e3, max: 1e-3 },
            ..GarchOptions::default()
        };

        // Act
        let tol_err = Estimator::new(zero_tol).fit(&s, true_params());
        let guard_err = Estimator::new(inverted).fit(&s, true_params());

        // Assert
        assert_eq!(tol_err, Err(GarchError::InvalidBoundaryTol { value: 0.0 }));
        assert!(matches!(guard_err, Err(GarchError::InvalidVarianceGuards { .. })));
    }

    #[test]
    // Purpose
    // -------
    // An initial guess edited after construction starts the optimizer from
    // the edited coefficients, not from a stale simplex remainder.
    //
    // Given
    // -----
    // - `new(0.05, 0.10, 0.85)` with α lowered to 0.02, capped at one
    //   iteration.
    //
    // Expect
    // ------
    // - The θ handed to the optimizer maps back to α = 0.02, β = 0.85.
    // - The capped fit reports a finite last-best log-likelihood.
    fn fit_starts_from_edited_initial_guess() {
        // Arrange
        let mut guess = true_params();
        guess.alpha = 0.02;
        let mut capped = GarchOptions::default();
        capped.mle_opts.tols = Tolerances::new(Some(1e-12), None, Some(1)).unwrap();

        // Act
        let start = GarchParams::from_theta(guess.to_theta(MeanSpec::Zero).view(), MeanSpec::Zero)
            .unwrap();
        let outcome = Estimator::new(capped).fit(&series(500), guess);

        // Assert
        assert!((start.alpha - 0.02).abs() < 1e-10, "alpha = {}", start.alpha);
        assert!((start.beta - 0.85).abs() < 1e-10, "beta = {}", start.beta);
        let result = match outcome {
            Ok(result) => result,
            Err(GarchError::NonConvergence { result }) => *result,
            Err(other) => panic!("unexpected error {other}"),
        };
        assert!(result.loglik().is_finite());
    }

    #[test]
    // Purpose
    // -------
    // A gradient that always fails surfaces its own error instead of a
    // generic Hessian failure.
    //
    // Given
    // -----
    // - A gradient map returning `NonFiniteVariance { t: 7 }` everywhere.
    //
    // Expect
    // ------
    // - That exact error from `observed_std_errors`.
    fn observed_std_errors_returns_gradient_error() {
        // Arrange
        let failing = |_: &Array1<f64>| -> GarchResult<Array1<f64>> {
            Err(GarchError::NonFiniteVariance { t: 7, value: f64::INFINITY })
        };

        // Act
        let err = observed_std_errors(failing, &Array1::from(vec![0.05, 0.1, 0.85]), None);

        // Assert
        assert_eq!(err, Err(GarchError::NonFiniteVariance { t: 7, value: f64::INFINITY }));
    }

    #[test]
    // Purpose
    // -------
    // A failure on the central pass only is forgotten once the forward
    // Hessian succeeds.
    //
    // Given
    // -----
    // - g(φ) = φ, failing on its first call.
    //
    // Expect
    // ------
    // - Unit standard errors.
    fn observed_std_errors_ignores_recovered_failures() {
        let calls = std::cell::Cell::new(0_usize);
        let flaky = |phi: &Array1<f64>| -> GarchResult<Array1<f64>> {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                Err(GarchError::NonFiniteVariance { t: 0, value: f64::NAN })
            } else {
                Ok(phi.clone())
            }
        };

        let se = observed_std_errors(flaky, &Array1::from(vec![0.3, -0.4]), None).unwrap();

        assert!(se.iter().all(|v| (v - 1.0).abs() < 1e-6), "{se:?}");
    }

    #[test]
    // Purpose
    // -------
    // Boundary takes precedence over the solver status; otherwise the solver
    // status maps one-to-one.
    fn classify_orders_boundary_before_solver_status() {
        assert_eq!(
            classify(0.99995, &OptimStatus::Converged, 1e-4),
            ConvergenceStatus::Boundary
        );
        assert_eq!(
            classify(0.99995, &OptimStatus::MaxItersReached, 1e-4),
            ConvergenceStatus::Boundary
        );
        assert_eq!(classify(0.95, &OptimStatus::Converged, 1e-4), ConvergenceStatus::Converged);
        assert_eq!(
            classify(0.95, &OptimStatus::MaxItersReached, 1e-4),
            ConvergenceStatus::MaxIterationsReached
        );
        assert_eq!(
            classify(0.95, &OptimStatus::Stopped { reason: "Aborted".into() }, 1e-4),
            ConvergenceStatus::Failed
        );
        assert_eq!(classify(0.95, &OptimStatus::NotTerminated, 1e-4), ConvergenceStatus::Failed);
    }

    #[test]
    // Purpose
    // -------
    // `value` is the average of the total log-likelihood and `check` rejects
    // a θ of the wrong length.
    fn loglikelihood_value_is_average_and_check_validates_length() {
        let s = series(300);
        let est = Estimator::default();
        let theta = true_params().to_theta(MeanSpec::Zero);
        let model = GarchModel::new(true_params(), &s, &est.options).unwrap();

        let avg = est.value(&theta, &s).unwrap();

        assert!((avg * 300.0 - model.loglik()).abs() < 1e-8 * model.loglik().abs());
        assert!(est.check(&theta, &s).is_ok());
        assert!(est.check(&Array1::zeros(4), &s).is_err());
    }

    #[test]
    // Purpose
    // -------
    // L-BFGS on a moderately long sample converges near the truth and the
    // reported log-likelihood is the total at the fitted parameters.
    fn lbfgs_fit_recovers_parameters() {
        // Arrange
        let s = series(3000);
        let guess = GarchParams::initial_guess(&s, MeanSpec::Zero).unwrap();

        // Act
        let result = Estimator::default().fit(&s, guess).unwrap();

        // Assert
        let p = result.params();
        assert_eq!(result.status(), ConvergenceStatus::Converged);
        assert!((p.alpha - 0.1).abs() < 0.05, "alpha = {}", p.alpha);
        assert!((p.beta - 0.85).abs() < 0.07, "beta = {}", p.beta);
        assert!(p.omega > 0.0);
        let refit = GarchModel::new(*p, &s, &GarchOptions::default()).unwrap();
        assert_eq!(result.loglik(), refit.loglik());
        assert!(result.loglik() >= GarchModel::new(guess, &s, &GarchOptions::default()).unwrap().loglik());
        assert!((result.aic() - (6.0 - 2.0 * result.loglik())).abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // A loose boundary tolerance turns a good fit into `Boundary`, and an
    // iteration cap of one yields `NonConvergence` with the last-best result.
    fn status_policy_reports_boundary_and_non_convergence() {
        let s = series(1000);
        let guess = GarchParams::initial_guess(&s, MeanSpec::Zero).unwrap();

        let loose = Estimator::new(GarchOptions { boundary_tol: 0.5, ..GarchOptions::default() });
        let result = loose.fit(&s, guess).unwrap();
        assert_eq!(result.status(), ConvergenceStatus::Boundary);

        let mut capped = GarchOptions::default();
        capped.mle_opts.tols = Tolerances::new(Some(1e-12), None, Some(1)).unwrap();
        match Estimator::new(capped).fit(&s, guess) {
            Err(GarchError::NonConvergence { result }) => {
                assert_eq!(result.status(), ConvergenceStatus::MaxIterationsReached);
                assert!(result.loglik().is_finite());
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Derivative-free Nelder–Mead with a constant mean lands near the
    // truth and yields finite classical and robust standard errors.
    fn nelder_mead_constant_mean_fit_and_inference() {
        // Arrange
        let p_true = true_params().with_mu(0.1).unwrap();
        let s = simulate(&p_true, 2000, &SimOpts::default()).unwrap().into_series().unwrap();
        let mut options = GarchOptions::with_mean(MeanSpec::Constant);
        options.mle_opts.optimizer = OptimizerKind::NelderMead;
        options.mle_opts.tols = Tolerances::new(None, Some(1e-12), Some(5000)).unwrap();
        let est = Estimator::new(options);
        let guess = GarchParams::initial_guess(&s, MeanSpec::Constant).unwrap();

        // Act
        let result = match est.fit(&s, guess) {
            Ok(result) => result,
            Err(GarchError::NonConvergence { result }) => *result,
            Err(other) => panic!("unexpected error {other}"),
        };
        let classical = est.inference(&result, &s, StdErrorKind::Classical).unwrap();
        let robust = est.inference(&result, &s, StdErrorKind::Robust).unwrap();

        // Assert
        let p = result.params();
        assert!((p.alpha - 0.1).abs() < 0.06, "alpha = {}", p.alpha);
        assert!((p.mu - 0.1).abs() < 0.1, "mu = {}", p.mu);
        assert_eq!(classical.names, vec!["omega", "alpha", "beta", "mu"]);
        for table in [&classical, &robust] {
            assert!(table.std_errors.iter().all(|se| se.is_finite() && *se > 0.0));
        }
        assert!(est.inference(&result, &series(500), StdErrorKind::Classical).is_err());
    }
}
