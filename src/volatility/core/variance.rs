//! σ²–recursions for GARCH(1,1): variance path, log-likelihood, and
//! sensitivities.
//!
//! ## Model convention
//! `σ²_t = ω + α ε²_{t−1} + β σ²_{t−1}`, `ε_t = r_t − μ`, for `t = 2..T`,
//! with σ²_1 seeded by [`Init`].
//!
//! ## What this module does
//! - Runs the variance recursion **in place** into a caller-provided buffer,
//!   clamping each σ²_t into [`VarianceGuards`].
//! - Accumulates the Gaussian log-likelihood over a computed path.
//! - Fills the `T × k` sensitivity matrix `∂σ²_t/∂φ` for
//!   `φ = (ω, α, β[, μ])` used by analytic gradients and scores.
//!
//! ## Sensitivity recursion
//! ```text
//! ∂σ²_t/∂φ = [1, ε²_{t−1}, σ²_{t−1}, −2αε_{t−1}] + β ∂σ²_{t−1}/∂φ
//! ```
//! The seed row is zero for `SampleVariance`/`Fixed` and
//! `[1/d, ω/d², ω/d², 0]` with `d = 1 − α − β` for `UncondVariance`. A step
//! whose value was clamped by a guard has a zero row: the clamped value does
//! not move with the parameters.
//!
//! ## Zero-copy design
//! Inner loops operate on `ndarray` views only; buffers live in
//! [`GarchScratch`](crate::volatility::core::workspace::GarchScratch) or in
//! the model that owns the path.
use crate::volatility::{
    core::{data::ReturnSeries, guards::VarianceGuards, init::Init, workspace::WorkSpace},
    errors::{GarchError, GarchResult},
};
use ndarray::{ArrayView1, ArrayViewMut1, ArrayViewMut2};

/// `ln(2π)`.
pub const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Unguarded starting variance σ²_1 under `init`.
pub fn initial_variance(ws: &WorkSpace, series: &ReturnSeries, init: Init) -> f64 {
    match init {
        Init::SampleVariance => series.sample_variance(),
        Init::UncondVariance => ws.omega / (1.0 - ws.persistence()),
        Init::Fixed(value) => value,
    }
}

/// One recursion step `ω + α ε² + β σ²`, unguarded.
#[inline]
pub fn next_variance(ws: &WorkSpace, resid: f64, sigma2: f64) -> f64 {
    ws.omega + ws.alpha * resid * resid + ws.beta * sigma2
}

/// Compute the conditional-variance path **in place**.
///
/// Writes `sigma2[t]` for every `t` of `series`; `sigma2.len()` must equal
/// `series.len()`.
///
/// # Errors
/// `GarchError::NonFiniteVariance { t, value }` if a step evaluates to NaN
/// (guards map ±∞ to the bounds, so only NaN can escape).
pub fn compute_variance(
    ws: &WorkSpace, series: &ReturnSeries, init: Init, guards: &VarianceGuards,
    mut sigma2: ArrayViewMut1<f64>,
) -> GarchResult<()> {
    debug_assert_eq!(sigma2.len(), series.len());
    let returns = series.values();
    let first = guards.clamp(initial_variance(ws, series, init));
    if !first.is_finite() {
        return Err(GarchError::NonFiniteVariance { t: 0, value: first });
    }
    sigma2[0] = first;
    for t in 1..returns.len() {
        let value = guards.clamp(next_variance(ws, returns[t - 1] - ws.mu, sigma2[t - 1]));
        if !value.is_finite() {
            return Err(GarchError::NonFiniteVariance { t, value });
        }
        sigma2[t] = value;
    }
    Ok(())
}

/// Gaussian log-density of one residual given its conditional variance.
///
/// # Errors
/// `GarchError::InvalidVarianceLogLik` unless `sigma2` is finite and > 0.
#[inline]
pub fn gaussian_loglik(resid: f64, sigma2: f64) -> GarchResult<f64> {
    if !(sigma2 > 0.0 && sigma2.is_finite()) {
        return Err(GarchError::InvalidVarianceLogLik { value: sigma2 });
    }
    Ok(-0.5 * (LN_2PI + sigma2.ln() + resid * resid / sigma2))
}

/// Total log-likelihood `ℓ = Σ_t log φ(ε_t; 0, σ²_t)` over a computed path.
///
/// # Errors
/// Propagates [`gaussian_loglik`] failures.
pub fn likelihood_driver(
    ws: &WorkSpace, series: &ReturnSeries, sigma2: ArrayView1<f64>,
) -> GarchResult<f64> {
    series
        .values()
        .iter()
        .zip(sigma2.iter())
        .try_fold(0.0, |acc, (&r, &s)| Ok(acc + gaussian_loglik(r - ws.mu, s)?))
}

/// Fill `deriv` (shape `T × k`, `k ∈ {3, 4}`) with `∂σ²_t/∂φ`.
///
/// `sigma2` must be the path produced by [`compute_variance`] for the same
/// `ws`, `init`, and `guards`. The fourth column (μ) is written only when
/// `k == 4`.
pub fn compute_derivative(
    ws: &WorkSpace, series: &ReturnSeries, init: Init, guards: &VarianceGuards,
    sigma2: ArrayView1<f64>, mut deriv: ArrayViewMut2<f64>,
) {
    let returns = series.values();
    let k = deriv.ncols();
    deriv.fill(0.0);

    if init == Init::UncondVariance {
        let raw = initial_variance(ws, series, init);
        if guards.clamp(raw) == raw {
            let d = 1.0 - ws.persistence();
            deriv[[0, 0]] = 1.0 / d;
            deriv[[0, 1]] = ws.omega / (d * d);
            deriv[[0, 2]] = ws.omega / (d * d);
        }
    }

    for t in 1..returns.len() {
        let resid = returns[t - 1] - ws.mu;
        let raw = next_variance(ws, resid, sigma2[t - 1]);
        if guards.clamp(raw) != raw {
            continue;
        }
        for j in 0..k {
            deriv[[t, j]] = ws.beta * deriv[[t - 1, j]];
        }
        deriv[[t, 0]] += 1.0;
        deriv[[t, 1]] += resid * resid;
        deriv[[t, 2]] += sigma2[t - 1];
        if k == 4 {
            deriv[[t, 3]] -= 2.0 * ws.alpha * resid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        optimization::numerical_stability::transformations::STATIONARITY_MARGIN,
        volatility::core::{options::MeanSpec, params::GarchParams},
    };
    use ndarray::{Array1, Array2};

    fn series() -> ReturnSeries {
        ReturnSeries::new(Array1::from_iter((0..64).map(|i| {
            let x = i as f64;
            (0.9 * x).sin() + 0.3 * (2.3 * x).cos()
        })))
        .unwrap()
    }

    fn ws(mu: f64) -> WorkSpace {
        let p = GarchParams::new(0.05, 0.1, 0.85).unwrap().with_mu(mu).unwrap();
        WorkSpace::from_params(&p, if mu == 0.0 { MeanSpec::Zero } else { MeanSpec::Constant })
    }

    fn path(ws: &WorkSpace, s: &ReturnSeries, init: Init) -> Array1<f64> {
        let mut sigma2 = Array1::zeros(s.len());
        compute_variance(ws, s, init, &VarianceGuards::default(), sigma2.view_mut()).unwrap();
        sigma2
    }

    /// (α, β) pairs with zero coefficients and sums just under `1 − margin`.
    fn coefficient_grid() -> Vec<(f64, f64)> {
        let top = 1.0 - STATIONARITY_MARGIN - 1e-9;
        let mut grid = Vec::new();
        for alpha in [0.0, 0.05, 0.3] {
            for beta in [0.0, 0.6] {
                grid.push((alpha, beta));
            }
            grid.push((alpha, top - alpha));
        }
        grid.push((top, 0.0));
        grid
    }

    #[test]
    // Purpose
    // -------
    // The recursion follows its definition and seeds σ²_1 per `Init`.
    //
    // Given
    // -----
    // - ω = 0.05, α = 0.1, β = 0.85 on a deterministic oscillating series.
    //
    // Expect
    // ------
    // - σ²_1 equals the sample variance, σ²_∞, or the fixed value.
    // - σ²_2 = ω + α r_1² + β σ²_1.
    // - Every σ²_t > 0.
    fn compute_variance_follows_recursion_and_init() {
        // Arrange
        let s = series();
        let w = ws(0.0);

        // Act
        let sample = path(&w, &s, Init::SampleVariance);
        let uncond = path(&w, &s, Init::UncondVariance);
        let fixed = path(&w, &s, Init::Fixed(2.0));

        // Assert
        assert_eq!(sample[0], s.sample_variance());
        assert!((uncond[0] - 1.0).abs() < 1e-12);
        assert_eq!(fixed[0], 2.0);
        let r0 = s.values()[0];
        assert!((sample[1] - (0.05 + 0.1 * r0 * r0 + 0.85 * sample[0])).abs() < 1e-15);
        assert!(sample.iter().chain(uncond.iter()).chain(fixed.iter()).all(|v| *v > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // σ²_t stays finite and positive across the whole admissible region.
    //
    // Given
    // -----
    // - α ∈ {0, 0.05, 0.3} × β ∈ {0, 0.6}, plus α + β just below
    //   `1 − margin` (including β = 0), for ω ∈ {1e-8, 0.05}.
    // - Zero and constant means under every `Init`.
    //
    // Expect
    // ------
    // - Every σ²_t is finite and > 0 and the log-likelihood is finite.
    fn compute_variance_is_positive_across_parameter_grid() {
        let s = series();
        for (alpha, beta) in coefficient_grid() {
            for omega in [1e-8, 0.05] {
                for mu in [0.0, 0.4] {
                    // Arrange
                    let p = GarchParams::new(omega, alpha, beta).unwrap().with_mu(mu).unwrap();
                    let w = WorkSpace::from_params(&p, MeanSpec::Constant);
                    for init in [Init::SampleVariance, Init::UncondVariance, Init::Fixed(1e-3)] {
                        // Act
                        let sigma2 = path(&w, &s, init);

                        // Assert
                        assert!(
                            sigma2.iter().all(|v| *v > 0.0 && v.is_finite()),
                            "alpha {alpha}, beta {beta}, omega {omega}, {init:?}"
                        );
                        assert!(likelihood_driver(&w, &s, sigma2.view()).unwrap().is_finite());
                    }
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Guards clamp every step, and a NaN parameter is reported with its index.
    fn compute_variance_clamps_and_reports_nan() {
        let s = series();
        let guards = VarianceGuards::new((0.5, 0.6)).unwrap();
        let mut sigma2 = Array1::zeros(s.len());
        compute_variance(&ws(0.0), &s, Init::Fixed(10.0), &guards, sigma2.view_mut()).unwrap();
        assert!(sigma2.iter().all(|v| (0.5..=0.6).contains(v)));

        let bad = WorkSpace { omega: f64::NAN, alpha: 0.1, beta: 0.8, mu: 0.0 };
        let err = compute_variance(&bad, &s, Init::Fixed(1.0), &VarianceGuards::default(), sigma2.view_mut());
        assert!(matches!(err, Err(GarchError::NonFiniteVariance { t: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // The likelihood equals the sum of Gaussian log-densities and rejects a
    // non-positive variance.
    fn likelihood_driver_sums_gaussian_terms() {
        let s = series();
        let w = ws(0.2);
        let sigma2 = path(&w, &s, Init::SampleVariance);
        let ll = likelihood_driver(&w, &s, sigma2.view()).unwrap();
        let manual: f64 = s
            .values()
            .iter()
            .zip(sigma2.iter())
            .map(|(r, v)| -0.5 * ((2.0 * std::f64::consts::PI).ln() + v.ln() + (r - 0.2).powi(2) / v))
            .sum();
        assert!((ll - manual).abs() < 1e-10);
        assert!(matches!(gaussian_loglik(0.1, 0.0), Err(GarchError::InvalidVarianceLogLik { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Sensitivities agree with central differences of the variance path for
    // every parameter, under both the sample- and unconditional-variance seeds.
    //
    // Given
    // -----
    // - φ = (0.05, 0.1, 0.85, 0.2), step h = 1e-6.
    //
    // Expect
    // ------
    // - Max abs error over all t below 1e-5 (relative to path scale).
    fn compute_derivative_matches_finite_differences() {
        let s = series();
        let guards = VarianceGuards::default();
        for init in [Init::SampleVariance, Init::UncondVariance] {
            // Arrange
            let w = ws(0.2);
            let sigma2 = path(&w, &s, init);
            let mut deriv = Array2::zeros((s.len(), 4));

            // Act
            compute_derivative(&w, &s, init, &guards, sigma2.view(), deriv.view_mut());

            // Assert
            let h = 1e-6;
            for j in 0..4 {
                let bump = |delta: f64| {
                    let mut b = w;
                    match j {
                        0 => b.omega += delta,
                        1 => b.alpha += delta,
                        2 => b.beta += delta,
                        _ => b.mu += delta,
                    }
                    path(&b, &s, init)
                };
                let numeric = (bump(h) - bump(-h)) / (2.0 * h);
                for t in 0..s.len() {
                    let tol = 1e-5 * numeric[t].abs().max(1.0);
                    assert!(
                        (numeric[t] - deriv[[t, j]]).abs() < tol,
                        "init {init:?}, j {j}, t {t}: {} vs {}",
                        numeric[t],
                        deriv[[t, j]]
                    );
                }
            }
        }
    }
}
