//! Construct configured argmin solvers from [`MLEOptions`].
//!
//! The builders only translate options into solver settings. Starting
//! points and iteration caps are the runner's job, except for Nelder–Mead
//! whose simplex is built around θ₀ here.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, DEFAULT_SIMPLEX_STEP, Grad, NelderMeadSimplex, Theta,
        },
    },
};
use argmin::solver::quasinewton::LBFGS;

/// L-BFGS around any line search.
///
/// History length is `opts.lbfgs_mem`, falling back to
/// [`DEFAULT_LBFGS_MEM`]. `tol_grad` and `tol_cost` override argmin's
/// defaults only when set.
///
/// # Errors
/// argmin rejects a tolerance (negative or NaN), surfaced as `OptError`.
pub fn lbfgs<L>(line_search: L, opts: &MLEOptions) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    let mut solver = LBFGS::new(line_search, opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM));
    if let Some(tol) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(tol)?;
    }
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(tol)?;
    }
    Ok(solver)
}

/// Nelder–Mead over a simplex around `theta0`; `tol_cost` becomes the
/// standard-deviation tolerance of the vertex costs.
pub fn nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSimplex> {
    let solver = NelderMeadSimplex::new(initial_simplex(theta0, DEFAULT_SIMPLEX_STEP));
    match opts.tols.tol_cost {
        Some(tol) => Ok(solver.with_sd_tolerance(tol)?),
        None => Ok(solver),
    }
}

/// θ₀ followed by one vertex per coordinate, shifted by
/// `step * max(|θ₀ᵢ|, 1)`.
pub fn initial_simplex(theta0: &Theta, step: f64) -> Vec<Theta> {
    std::iter::once(theta0.clone())
        .chain((0..theta0.len()).map(|i| {
            let mut vertex = theta0.clone();
            vertex[i] += step * theta0[i].abs().max(1.0);
            vertex
        }))
        .collect()
}
