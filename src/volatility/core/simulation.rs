//! Simulation of GARCH(1,1) return paths with Gaussian innovations.
//!
//! ```text
//! z_t ~ N(0, 1) i.i.d.,  ε_t = σ_t z_t,  r_t = μ + ε_t
//! σ²_{t+1} = ω + α ε²_t + β σ²_t
//! ```
//!
//! Seeding follows [`SimOpts::seed`]: `Some(s)` uses `StdRng::seed_from_u64`,
//! `None` draws from OS entropy. With [`SimStart::Warm`], the process starts
//! at σ²_∞ and the first `burn_in` draws are discarded so the retained path
//! is (approximately) a draw from the stationary distribution.
use crate::volatility::{
    core::{
        data::ReturnSeries,
        guards::VarianceGuards,
        init::Init,
        options::{MeanSpec, SimOpts, SimStart},
        params::GarchParams,
        variance::next_variance,
        workspace::WorkSpace,
    },
    errors::{GarchError, GarchResult},
};
use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StandardNormal};

/// A simulated path.
///
/// - `returns`: `r_1..r_n`.
/// - `sigma2`: the conditional variances that generated them.
/// - `shocks`: standardized innovations `z_t`, when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    pub returns: Array1<f64>,
    pub sigma2: Array1<f64>,
    pub shocks: Option<Array1<f64>>,
}

impl SimulatedPath {
    /// Validate the returns as a [`ReturnSeries`].
    ///
    /// # Errors
    /// Any [`ReturnSeries::new`] error (e.g. `SeriesTooShort` for short paths).
    pub fn into_series(self) -> GarchResult<ReturnSeries> {
        ReturnSeries::new(self.returns)
    }
}

/// Simulate `n` observations from `params` (μ included).
///
/// # Errors
/// - `GarchError::InvalidSimLength` when `n == 0`.
/// - `GarchError::InvalidInitFixed` for a non-positive/non-finite cold start.
/// - `GarchError::InvalidParameters` if `params` fail validation.
///
/// # Examples
/// ```rust
/// # use rust_garch::volatility::core::{params::GarchParams, options::SimOpts, simulation::simulate};
/// let params = GarchParams::new(0.05, 0.1, 0.85).unwrap();
/// let path = simulate(&params, 500, &SimOpts::default()).unwrap();
/// assert_eq!(path.returns.len(), 500);
/// assert!(path.sigma2.iter().all(|v| *v > 0.0));
/// ```
pub fn simulate(params: &GarchParams, n: usize, opts: &SimOpts) -> GarchResult<SimulatedPath> {
    if n == 0 {
        return Err(GarchError::InvalidSimLength { n });
    }
    params.validate()?;
    let ws = WorkSpace::from_params(params, MeanSpec::Constant);
    let guards = VarianceGuards::default();
    let (mut sigma2_t, burn_in) = match opts.sim_start {
        SimStart::Warm { burn_in } => (params.uncond_variance(), burn_in),
        SimStart::Cold { sigma2_init } => {
            Init::fixed(sigma2_init)?;
            (sigma2_init, 0)
        }
    };
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut returns = Array1::zeros(n);
    let mut sigma2 = Array1::zeros(n);
    let mut shocks = if opts.return_shocks { Some(Array1::zeros(n)) } else { None };

    for t in 0..burn_in + n {
        let z: f64 = StandardNormal.sample(&mut rng);
        let eps = sigma2_t.sqrt() * z;
        if t >= burn_in {
            let i = t - burn_in;
            returns[i] = ws.mu + eps;
            sigma2[i] = sigma2_t;
            if let Some(shocks) = shocks.as_mut() {
                shocks[i] = z;
            }
        }
        sigma2_t = guards.clamp(next_variance(&ws, eps, sigma2_t));
    }

    Ok(SimulatedPath { returns, sigma2, shocks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GarchParams {
        GarchParams::new(0.05, 0.1, 0.85).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A fixed seed reproduces the path exactly; different seeds differ.
    fn seeded_simulation_is_reproducible() {
        let opts = SimOpts::default();
        let a = simulate(&params(), 200, &opts).unwrap();
        let b = simulate(&params(), 200, &opts).unwrap();
        assert_eq!(a, b);
        let c = simulate(&params(), 200, &SimOpts { seed: Some(7), ..SimOpts::default() }).unwrap();
        assert_ne!(a.returns, c.returns);
        assert!(a.shocks.is_none());
    }

    #[test]
    // Purpose
    // -------
    // The returned path satisfies the model equations.
    //
    // Given
    // -----
    // - μ = 0.3, cold start at σ²_1 = 2, shocks returned.
    //
    // Expect
    // ------
    // - σ²_1 = 2, r_t = μ + σ_t z_t, and σ²_{t+1} = ω + α ε²_t + β σ²_t.
    fn simulated_path_satisfies_model_equations() {
        // Arrange
        let p = params().with_mu(0.3).unwrap();
        let opts = SimOpts::new(Some(11), true, SimStart::Cold { sigma2_init: 2.0 });

        // Act
        let path = simulate(&p, 100, &opts).unwrap();

        // Assert
        let z = path.shocks.as_ref().unwrap();
        assert_eq!(path.sigma2[0], 2.0);
        for t in 0..100 {
            let eps = path.sigma2[t].sqrt() * z[t];
            assert!((path.returns[t] - (0.3 + eps)).abs() < 1e-12);
            if t + 1 < 100 {
                let next = 0.05 + 0.1 * eps * eps + 0.85 * path.sigma2[t];
                assert!((path.sigma2[t + 1] - next).abs() < 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Long warm-started paths have sample variance near σ²_∞.
    fn warm_start_matches_uncond_variance_on_average() {
        let path = simulate(&params(), 20_000, &SimOpts::default()).unwrap();
        let series = path.into_series().unwrap();
        let target = params().uncond_variance();
        assert!((series.sample_variance() - target).abs() < 0.25 * target);
    }

    #[test]
    // Purpose
    // -------
    // Invalid requests fail with their dedicated errors.
    fn invalid_requests_are_rejected() {
        assert_eq!(
            simulate(&params(), 0, &SimOpts::default()),
            Err(GarchError::InvalidSimLength { n: 0 })
        );
        let cold = SimOpts::new(Some(1), false, SimStart::Cold { sigma2_init: -1.0 });
        assert!(matches!(simulate(&params(), 10, &cold), Err(GarchError::InvalidInitFixed { .. })));
        let mut bad = params();
        bad.alpha = 0.5;
        assert!(matches!(simulate(&bad, 10, &SimOpts::default()), Err(GarchError::InvalidParameters(_))));
    }
}
