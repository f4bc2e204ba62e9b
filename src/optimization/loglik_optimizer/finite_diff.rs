//! Finite-difference derivatives on top of `finitediff`.
//!
//! `finitediff` wants infallible `Fn(&Theta) -> f64` closures. The helpers
//! here accept fallible objectives instead, remember the first evaluation
//! error, and return it in preference to the NaN-poisoned derivative it
//! produced. Results are validated before they leave the module.
//!
//! The coordinates are whatever the caller passes: the argmin adapter
//! differentiates in θ-space, the inference layer in model space.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Gradient of a fallible scalar objective.
///
/// Central differences are tried first. If an evaluation failed or the
/// estimate has non-finite entries, forward differences are computed from
/// scratch; an evaluation error seen on that second pass is returned as-is.
///
/// # Errors
/// - The objective's own error, converted into `OptError`.
/// - `InvalidGradient` when the forward estimate is still non-finite.
pub fn fd_gradient<C>(theta: &Theta, cost: C) -> OptResult<Grad>
where
    C: Fn(&Theta) -> Result<f64, Error>,
{
    let first_err: RefCell<Option<Error>> = RefCell::new(None);
    let eval = |x: &Theta| match cost(x) {
        Ok(v) => v,
        Err(e) => {
            first_err.borrow_mut().get_or_insert(e);
            f64::NAN
        }
    };

    let central = theta.central_diff(&eval);
    if first_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }

    first_err.replace(None);
    let forward = theta.forward_diff(&eval);
    if let Some(err) = first_err.take() {
        return Err(err.into());
    }
    validate_grad(&forward, theta.len())?;
    Ok(forward)
}

/// Jacobian of a gradient map `f` at `theta`, made exactly symmetric.
///
/// Forward differences are only used when the central matrix has
/// non-finite entries.
///
/// # Errors
/// `HessianDimMismatch` or `InvalidHessian` for the forward matrix.
///
/// ```rust
/// # use ndarray::array;
/// # use rust_garch::optimization::loglik_optimizer::{Theta, finite_diff::compute_hessian};
/// let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);
/// let hess = compute_hessian(&grad_fn, &array![1.0, 2.0]).unwrap();
/// assert_eq!(hess.shape(), &[2, 2]);
/// ```
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let central = theta.central_hessian(f);
    let mut hess = if validate_hessian(&central, dim).is_ok() {
        central
    } else {
        let forward = theta.forward_hessian(f);
        validate_hessian(&forward, dim)?;
        forward
    };
    symmetrize(&mut hess);
    Ok(hess)
}

/// `H ← (H + Hᵀ) / 2`.
fn symmetrize(hess: &mut Hessian) {
    let transposed = hess.t().to_owned();
    hess.zip_mut_with(&transposed, |h, ht| *h = 0.5 * (*h + ht));
}
