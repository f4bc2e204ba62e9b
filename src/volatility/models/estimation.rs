//! Estimation results: fitted model, convergence status, and fit summary.
use crate::{
    optimization::loglik_optimizer::OptimOutcome,
    volatility::{
        core::{options::MeanSpec, params::GarchParams},
        models::garch::GarchModel,
    },
};
use std::fmt;

/// Outcome classification of a fit.
///
/// - `Converged`: the solver met its convergence criterion.
/// - `Boundary`: persistence `α + β` ended within `boundary_tol` of 1; the
///   fit is returned but sits at the edge of the stationary region.
/// - `MaxIterationsReached`: iteration cap exhausted (carried by
///   `GarchError::NonConvergence`).
/// - `Failed`: any other termination (carried by
///   `GarchError::EstimationFailed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Converged,
    Boundary,
    MaxIterationsReached,
    Failed,
}

impl fmt::Display for ConvergenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvergenceStatus::Converged => write!(f, "converged"),
            ConvergenceStatus::Boundary => write!(f, "boundary (alpha + beta near 1)"),
            ConvergenceStatus::MaxIterationsReached => write!(f, "maximum iterations reached"),
            ConvergenceStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A frozen fitted model plus optimizer diagnostics.
///
/// `loglik()` is the **total** log-likelihood recomputed at the fitted
/// parameters; `optim().value` is the optimizer's objective (the average).
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    model: GarchModel,
    status: ConvergenceStatus,
    optim: OptimOutcome,
}

impl EstimationResult {
    pub(crate) fn new(
        model: GarchModel, status: ConvergenceStatus, optim: OptimOutcome,
    ) -> EstimationResult {
        EstimationResult { model, status, optim }
    }

    pub fn model(&self) -> &GarchModel {
        &self.model
    }

    pub fn params(&self) -> &GarchParams {
        self.model.params()
    }

    pub fn loglik(&self) -> f64 {
        self.model.loglik()
    }

    pub fn status(&self) -> ConvergenceStatus {
        self.status
    }

    pub fn iterations(&self) -> usize {
        self.optim.iterations
    }

    pub fn optim(&self) -> &OptimOutcome {
        &self.optim
    }

    pub fn mean(&self) -> MeanSpec {
        self.model.mean()
    }

    pub fn nobs(&self) -> usize {
        self.model.nobs()
    }

    /// Free parameters: 3, or 4 with a constant mean.
    pub fn n_params(&self) -> usize {
        self.mean().n_params()
    }

    /// `2k − 2ℓ`.
    pub fn aic(&self) -> f64 {
        2.0 * self.n_params() as f64 - 2.0 * self.loglik()
    }

    /// `k ln T − 2ℓ`.
    pub fn bic(&self) -> f64 {
        self.n_params() as f64 * (self.nobs() as f64).ln() - 2.0 * self.loglik()
    }

    pub fn into_model(self) -> GarchModel {
        self.model
    }
}

impl fmt::Display for EstimationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.params();
        writeln!(f, "GARCH(1,1) estimation results")?;
        writeln!(f, "  mean model:       {:?}", self.mean())?;
        writeln!(f, "  observations:     {}", self.nobs())?;
        writeln!(f, "  log-likelihood:   {:.4}", self.loglik())?;
        writeln!(f, "  AIC / BIC:        {:.4} / {:.4}", self.aic(), self.bic())?;
        writeln!(f, "  status:           {} ({} iterations)", self.status, self.iterations())?;
        if self.mean() == MeanSpec::Constant {
            writeln!(f, "  mu:               {:.6}", p.mu)?;
        }
        writeln!(f, "  omega:            {:.6}", p.omega)?;
        writeln!(f, "  alpha[1]:         {:.6}", p.alpha)?;
        writeln!(f, "  beta[1]:          {:.6}", p.beta)?;
        write!(f, "  persistence:      {:.6}", p.persistence())
    }
}
