//! [`maximize`]: the single entry point of the optimizer.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{lbfgs, nelder_mead},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimizerKind},
        types::{HagerZhangLS, MoreThuenteLS},
    },
};

/// Maximize `ℓ(θ)` from `theta0` with the solver chosen in `opts`.
///
/// `f.check` vets θ₀ before any solver is built. Nelder–Mead ignores the
/// line-search choice and any analytic gradient.
///
/// # Errors
/// Whatever `f.check` rejects, tolerances argmin refuses, and failures
/// raised during the run (line-search breakdowns, model errors from a cost
/// or gradient evaluation).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_garch::optimization::errors::OptResult;
/// use rust_garch::optimization::loglik_optimizer::{
///     LogLikelihood, MLEOptions, Theta, maximize,
/// };
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_garch::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.optimizer {
        OptimizerKind::NelderMead => {
            let solver = nelder_mead(&theta0, opts)?;
            run_nelder_mead(opts, problem, solver)
        }
        OptimizerKind::Lbfgs => match opts.line_searcher {
            LineSearcher::MoreThuente => {
                run_lbfgs(theta0, opts, problem, lbfgs(MoreThuenteLS::new(), opts)?)
            }
            LineSearcher::HagerZhang => {
                run_lbfgs(theta0, opts, problem, lbfgs(HagerZhangLS::new(), opts)?)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loglik_optimizer::{Grad, traits::Tolerances},
    };
    use ndarray::array;

    // Concave toy log-likelihood ℓ(θ) = -Σ (θ_i - c_i)², maximized at c.
    struct Bowl {
        analytic: bool,
    }

    impl LogLikelihood for Bowl {
        type Data = Theta;

        fn value(&self, theta: &Theta, center: &Theta) -> OptResult<f64> {
            let d = theta - center;
            Ok(-d.dot(&d))
        }

        fn check(&self, theta: &Theta, center: &Theta) -> OptResult<()> {
            if theta.len() != center.len() {
                return Err(OptError::GradientDimMismatch {
                    expected: center.len(),
                    found: theta.len(),
                });
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, center: &Theta) -> OptResult<Grad> {
            if !self.analytic {
                return Err(OptError::GradientNotImplemented);
            }
            Ok((theta - center).mapv(|d| -2.0 * d))
        }
    }

    fn opts(optimizer: OptimizerKind, line_searcher: LineSearcher) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(500)).unwrap();
        MLEOptions::new(tols, optimizer, line_searcher, false, None).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Every solver path reaches the known maximizer of a concave bowl.
    //
    // Given
    // -----
    // - Center c = (1.5, -0.5); θ₀ = (0, 0).
    // - L-BFGS with both line searches (analytic gradient and FD fallback)
    //   and Nelder–Mead.
    //
    // Expect
    // ------
    // - θ̂ within 1e-4 of c and ℓ(θ̂) ≈ 0.
    fn maximize_recovers_bowl_center_for_every_solver() {
        let center = array![1.5, -0.5];
        let cases = [
            (OptimizerKind::Lbfgs, LineSearcher::MoreThuente, true),
            (OptimizerKind::Lbfgs, LineSearcher::HagerZhang, true),
            (OptimizerKind::Lbfgs, LineSearcher::MoreThuente, false),
            (OptimizerKind::NelderMead, LineSearcher::MoreThuente, false),
        ];
        for (optimizer, line_searcher, analytic) in cases {
            // Act
            let out = maximize(
                &Bowl { analytic },
                array![0.0, 0.0],
                &center,
                &opts(optimizer, line_searcher),
            )
            .expect("bowl should optimize");

            // Assert
            for j in 0..2 {
                assert!(
                    (out.theta_hat[j] - center[j]).abs() < 1e-4,
                    "{optimizer:?}/{line_searcher:?}: {:?}",
                    out.theta_hat
                );
            }
            assert!(out.value > -1e-7);
        }
    }

    #[test]
    // Purpose
    // -------
    // `check` runs before any solver work and its error is returned as-is.
    fn maximize_propagates_check_failure() {
        let res = maximize(
            &Bowl { analytic: true },
            array![0.0],
            &array![1.0, 2.0],
            &MLEOptions::default(),
        );
        assert_eq!(res, Err(OptError::GradientDimMismatch { expected: 2, found: 1 }));
    }
}
