//! Types a model author touches: the [`LogLikelihood`] trait, solver
//! options, and the [`OptimOutcome`] handed back by `maximize`.
//!
//! Models always speak in log-likelihood terms. The sign flip to argmin's
//! cost happens in the adapter and nowhere else.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// A log-likelihood `ℓ(θ)` over an unconstrained parameter vector.
///
/// `check` runs once on θ₀ before any solver work. `grad`, when
/// implemented, returns `∇ℓ(θ)`; the default reports
/// [`OptError::GradientNotImplemented`] and the optimizer differentiates
/// numerically instead.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Solver family. Parsing ignores case, `-` and `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    /// Quasi-Newton, steered by a [`LineSearcher`].
    Lbfgs,
    /// Simplex search; uses no gradient at all.
    NelderMead,
}

impl FromStr for OptimizerKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase().replace(['-', '_'], "");
        match key.as_str() {
            "lbfgs" => Ok(OptimizerKind::Lbfgs),
            "neldermead" => Ok(OptimizerKind::NelderMead),
            _ => Err(OptError::InvalidOptimizer {
                name: s.to_string(),
                reason: "Expected 'LBFGS' or 'NelderMead'.",
            }),
        }
    }
}

/// Line search inside L-BFGS. Parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.to_lowercase();
        match key.as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Expected 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer configuration.
///
/// `line_searcher` and `lbfgs_mem` only matter for L-BFGS. `verbose`
/// attaches a slog observer when the `obs_slog` feature is on and is
/// otherwise ignored.
///
/// The default is L-BFGS with More–Thuente, `tol_grad = 1e-6` and at most
/// 300 iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub optimizer: OptimizerKind,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] for a history length of zero.
    pub fn new(
        tols: Tolerances, optimizer: OptimizerKind, line_searcher: LineSearcher, verbose: bool,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, optimizer, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            optimizer: OptimizerKind::Lbfgs,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. `None` leaves a rule off, but at least one must be set.
///
/// `tol_grad` bounds the gradient norm, `tol_cost` the change in cost
/// (the simplex spread for Nelder–Mead), `max_iter` the iteration count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when every rule is `None`.
    /// - [`OptError::InvalidTolGrad`], [`OptError::InvalidTolCost`] for
    ///   NaN, infinite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] for a zero iteration cap.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if (tol_grad, tol_cost, max_iter) == (None, None, None) {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// argmin's termination status, reduced to what estimation decisions need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimStatus {
    /// Solver convergence test passed, or the target cost was reached.
    Converged,
    MaxItersReached,
    /// Interrupted, timed out, or exited for a solver-specific reason.
    Stopped { reason: String },
    NotTerminated,
}

impl From<TerminationStatus> for OptimStatus {
    fn from(status: TerminationStatus) -> Self {
        let reason = match status {
            TerminationStatus::NotTerminated => return OptimStatus::NotTerminated,
            TerminationStatus::Terminated(reason) => reason,
        };
        match reason {
            TerminationReason::SolverConverged | TerminationReason::TargetCostReached => {
                OptimStatus::Converged
            }
            TerminationReason::MaxItersReached => OptimStatus::MaxItersReached,
            other => OptimStatus::Stopped { reason: format!("{other:?}") },
        }
    }
}

impl std::fmt::Display for OptimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimStatus::Converged => write!(f, "converged"),
            OptimStatus::MaxItersReached => write!(f, "maximum iterations reached"),
            OptimStatus::Stopped { reason } => write!(f, "stopped: {reason}"),
            OptimStatus::NotTerminated => write!(f, "not terminated"),
        }
    }
}

/// What `maximize` returns.
///
/// `value` is ℓ(θ̂), not the cost. `fn_evals` holds argmin's counters such
/// as `cost_count` and `gradient_count`. `grad_norm` is the norm of the
/// last cost gradient and is `None` for Nelder–Mead.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: OptimStatus,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// # Errors
    /// `MissingThetaHat`, `InvalidThetaHat` or `NonFiniteCost` when the
    /// solver's final state is unusable.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let status = OptimStatus::from(termination);
        Ok(Self {
            theta_hat,
            value,
            converged: status == OptimStatus::Converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}
