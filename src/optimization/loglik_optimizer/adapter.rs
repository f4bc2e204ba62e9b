//! Present a [`LogLikelihood`] to argmin as a minimization problem.
//!
//! argmin minimizes, so the adapter hands it `c(θ) = -ℓ(θ)` and `-∇ℓ(θ)`.
//! Models without an analytic gradient get a finite-difference gradient of
//! the cost itself, which already carries the right sign.
use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Borrowed model plus its data, implementing argmin's problem traits.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<F: LogLikelihood> CostFunction for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Theta) -> Result<Cost, Error> {
        let ll = self.f.value(theta, self.data)?;
        if ll.is_finite() { Ok(-ll) } else { Err(OptError::NonFiniteCost { value: ll }.into()) }
    }
}

impl<F: LogLikelihood> Gradient for ArgMinAdapter<'_, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Analytic `-∇ℓ(θ)` after validation; on `GradientNotImplemented`,
    /// [`fd_gradient`] of the cost.
    fn gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => Ok(fd_gradient(theta, |x| self.cost(x))?),
            Err(e) => Err(e.into()),
        }
    }
}
