//! Numeric aliases and concrete argmin solver types.
//!
//! Everything in the optimizer works on dense `f64` ndarray vectors. The
//! aliases below pin argmin's generic solvers to that representation so
//! builders and runners can name them without repeating type parameters.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector.
pub type Theta = Array1<f64>;

/// Gradient, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Square matrix of second derivatives.
pub type Hessian = Array2<f64>;

/// Value argmin minimizes: the negated log-likelihood.
pub type Cost = f64;

/// Evaluation counters keyed by argmin's names (`"cost_count"`, ...).
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when none is configured.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Offset of each extra simplex vertex from θ₀, relative to `max(|θ₀ᵢ|, 1)`.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.1;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

pub type NelderMeadSimplex = NelderMead<Theta, Cost>;
