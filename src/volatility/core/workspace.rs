//! Evaluation workspace for the GARCH(1,1) recursion.
//!
//! Purpose
//! -------
//! Decouple *where parameters come from* (validated [`GarchParams`], an
//! optimizer θ, or a raw model-space vector perturbed by finite differences)
//! from the recursion and likelihood code, which only needs the four scalars
//! `(ω, α, β, μ)`. Also hosts [`GarchScratch`], the reusable buffers behind
//! the estimator's likelihood and gradient evaluations.
//!
//! Key behaviors
//! -------------
//! - [`WorkSpace::from_theta`] maps θ through the validated softplus/softmax
//!   transform ([`GarchParams::from_theta`]).
//! - [`WorkSpace::from_model_vector`] copies `(ω, α, β[, μ])` after shape and
//!   finiteness checks only. Finite-difference Hessians step slightly outside
//!   the parameter domain when an estimate sits on `α = 0`; the guarded
//!   recursion still produces a usable likelihood there.
//! - Under [`MeanSpec::Zero`], `mu` is always `0.0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Scratch buffers are resized lazily: a length change reallocates, a
//!   repeated evaluation on the same series reuses memory.
//! - `GarchScratch` uses `RefCell`; one estimator must not be shared across
//!   threads.
use crate::volatility::{
    core::{options::MeanSpec, params::GarchParams, validation::validate_theta},
    errors::ParamResult,
};
use ndarray::{Array1, Array2, ArrayView1};
use std::cell::{RefCell, RefMut};

/// Plain `(ω, α, β, μ)` used by the recursion and likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkSpace {
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
    pub mu: f64,
}

impl WorkSpace {
    /// Copy validated parameters; μ is dropped under [`MeanSpec::Zero`].
    pub fn from_params(params: &GarchParams, mean: MeanSpec) -> WorkSpace {
        let mu = match mean {
            MeanSpec::Zero => 0.0,
            MeanSpec::Constant => params.mu,
        };
        WorkSpace { omega: params.omega, alpha: params.alpha, beta: params.beta, mu }
    }

    /// Map an optimizer-space θ to a workspace.
    ///
    /// # Errors
    /// Any [`ParamError`](crate::volatility::errors::ParamError) raised by
    /// [`GarchParams::from_theta`].
    pub fn from_theta(theta: ArrayView1<f64>, mean: MeanSpec) -> ParamResult<WorkSpace> {
        let params = GarchParams::from_theta(theta, mean)?;
        Ok(WorkSpace::from_params(&params, mean))
    }

    /// Wrap a model-space vector `φ = (ω, α, β[, μ])` without domain checks.
    ///
    /// # Errors
    /// `ThetaLengthMismatch` / `InvalidThetaInput` on shape or finiteness.
    pub fn from_model_vector(phi: ArrayView1<f64>, mean: MeanSpec) -> ParamResult<WorkSpace> {
        validate_theta(phi, mean)?;
        let mu = match mean {
            MeanSpec::Zero => 0.0,
            MeanSpec::Constant => phi[3],
        };
        Ok(WorkSpace { omega: phi[0], alpha: phi[1], beta: phi[2], mu })
    }

    /// Persistence `α + β`.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }
}

/// Reusable buffers for likelihood and gradient evaluation.
///
/// - `sigma2_buf`: length `n`, the conditional variance path.
/// - `deriv_buf`: shape `(n, k)`, the sensitivities `∂σ²_t/∂φ` with `k = 3`
///   or `4` depending on the mean specification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GarchScratch {
    pub sigma2_buf: RefCell<Array1<f64>>,
    pub deriv_buf: RefCell<Array2<f64>>,
}

impl GarchScratch {
    /// Zero-initialized buffers for `n` observations and `k` parameters.
    pub fn new(n: usize, k: usize) -> GarchScratch {
        GarchScratch {
            sigma2_buf: RefCell::new(Array1::zeros(n)),
            deriv_buf: RefCell::new(Array2::zeros((n, k))),
        }
    }

    /// Borrow the variance buffer, reallocating if its length is not `n`.
    ///
    /// # Panics
    /// If the buffer is already borrowed (re-entrant evaluation).
    pub fn sigma2(&self, n: usize) -> RefMut<'_, Array1<f64>> {
        let mut buf = self.sigma2_buf.borrow_mut();
        if buf.len() != n {
            *buf = Array1::zeros(n);
        }
        buf
    }

    /// Borrow the sensitivity buffer, reallocating unless its shape is `(n, k)`.
    ///
    /// # Panics
    /// If the buffer is already borrowed (re-entrant evaluation).
    pub fn deriv(&self, n: usize, k: usize) -> RefMut<'_, Array2<f64>> {
        let mut buf = self.deriv_buf.borrow_mut();
        if buf.dim() != (n, k) {
            *buf = Array2::zeros((n, k));
        }
        buf
    }
}
