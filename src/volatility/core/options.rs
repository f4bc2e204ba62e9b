//! Configuration for GARCH estimation and simulation.
//!
//! Purpose
//! -------
//! Group the knobs that influence fitting ([`GarchOptions`]) and synthetic
//! path generation ([`SimOpts`], [`SimStart`]) into plain, validated structs.
//!
//! Key behaviors
//! -------------
//! - [`GarchOptions`] bundles the σ²_1 policy, the mean specification,
//!   optimizer settings, variance guards, and the tolerance used to flag a
//!   fit as lying on the stationarity boundary.
//! - [`MeanSpec`] selects a zero mean (`r_t = ε_t`) or a constant mean
//!   estimated jointly with the variance parameters.
//! - [`SimOpts`] controls RNG seeding, warm/cold start, and whether the
//!   standardized shocks are returned.
//!
//! Conventions
//! -----------
//! - Defaults match a daily percent-return workflow: zero mean, sample
//!   variance start, L-BFGS with More–Thuente, `boundary_tol = 1e-4`.
use crate::{
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, OptimizerKind, Tolerances},
    volatility::{
        core::{guards::VarianceGuards, init::Init},
        errors::{GarchError, GarchResult},
    },
};
use std::str::FromStr;

/// Trading days per year, the default annualization factor.
pub const TRADING_DAYS: f64 = 252.0;

/// Default distance from the unit-persistence boundary that flags a fit as
/// `ConvergenceStatus::Boundary`.
pub const DEFAULT_BOUNDARY_TOL: f64 = 1e-4;

/// Mean specification of the return equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanSpec {
    /// `r_t = ε_t`.
    #[default]
    Zero,
    /// `r_t = μ + ε_t` with μ estimated.
    Constant,
}

impl MeanSpec {
    /// Number of free parameters: 3 for `Zero`, 4 for `Constant`.
    pub const fn n_params(&self) -> usize {
        match self {
            MeanSpec::Zero => 3,
            MeanSpec::Constant => 4,
        }
    }
}

impl FromStr for MeanSpec {
    type Err = GarchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(MeanSpec::Zero),
            "constant" => Ok(MeanSpec::Constant),
            _ => Err(GarchError::InvalidMeanSpec { name: s.to_string() }),
        }
    }
}

/// Estimation options for a GARCH(1,1) fit.
///
/// Fields
/// ------
/// - `init`: σ²_1 policy.
/// - `mean`: zero or constant mean.
/// - `mle_opts`: optimizer configuration.
/// - `variance_guards`: clamp interval for every σ²_t.
/// - `boundary_tol`: fits with `α + β ≥ 1 − boundary_tol` are reported as
///   `Boundary`.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    pub init: Init,
    pub mean: MeanSpec,
    pub mle_opts: MLEOptions,
    pub variance_guards: VarianceGuards,
    pub boundary_tol: f64,
}

impl GarchOptions {
    /// # Errors
    /// See [`GarchOptions::validate`].
    pub fn new(
        init: Init, mean: MeanSpec, mle_opts: MLEOptions, variance_guards: VarianceGuards,
        boundary_tol: f64,
    ) -> GarchResult<Self> {
        let options = GarchOptions { init, mean, mle_opts, variance_guards, boundary_tol };
        options.validate()?;
        Ok(options)
    }

    /// Re-run the construction checks, for options assembled or edited
    /// through the public fields.
    ///
    /// # Errors
    /// - `GarchError::InvalidBoundaryTol` unless `0 < boundary_tol < 1`.
    /// - `GarchError::InvalidVarianceGuards` for unordered or non-positive
    ///   guards.
    /// - `GarchError::InvalidInitFixed` for a non-positive fixed σ²_1.
    pub fn validate(&self) -> GarchResult<()> {
        if !(self.boundary_tol > 0.0 && self.boundary_tol < 1.0) {
            return Err(GarchError::InvalidBoundaryTol { value: self.boundary_tol });
        }
        self.variance_guards.validate()?;
        self.init.validate()
    }

    /// Default options with a different mean specification.
    pub fn with_mean(mean: MeanSpec) -> Self {
        GarchOptions { mean, ..GarchOptions::default() }
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        GarchOptions {
            init: Init::SampleVariance,
            mean: MeanSpec::Zero,
            mle_opts: MLEOptions {
                tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(500) },
                optimizer: OptimizerKind::Lbfgs,
                line_searcher: LineSearcher::MoreThuente,
                verbose: false,
                lbfgs_mem: None,
            },
            variance_guards: VarianceGuards::default(),
            boundary_tol: DEFAULT_BOUNDARY_TOL,
        }
    }
}

/// Simulation controls.
///
/// - `seed`: `Some(s)` for a reproducible `StdRng`, `None` for OS entropy.
/// - `return_shocks`: also return the standardized innovations `z_t`.
/// - `sim_start`: warm (burn-in from σ²_∞) or cold (explicit σ²_1) start.
#[derive(Debug, Clone, PartialEq)]
pub struct SimOpts {
    pub seed: Option<u64>,
    pub return_shocks: bool,
    pub sim_start: SimStart,
}

impl SimOpts {
    pub fn new(seed: Option<u64>, return_shocks: bool, sim_start: SimStart) -> SimOpts {
        SimOpts { seed, return_shocks, sim_start }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        SimOpts { seed: Some(42), return_shocks: false, sim_start: SimStart::Warm { burn_in: 2000 } }
    }
}

/// Starting state of a simulated path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimStart {
    /// Start σ²_1 at `sigma2_init`; no draws are discarded.
    Cold { sigma2_init: f64 },
    /// Start at σ²_∞ and discard `burn_in` draws.
    Warm { burn_in: usize },
}
