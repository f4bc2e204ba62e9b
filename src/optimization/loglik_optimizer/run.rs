//! Solver execution: drive an `argmin` [`Executor`] and read the final state
//! back as an [`OptimOutcome`].
//!
//! The two entry points differ only in the solver state they produce:
//! L-BFGS carries a gradient, Nelder–Mead does not and seeds its own
//! starting point from the simplex.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::NelderMeadSimplex,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient, observers::ObserverMode};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Solver state of the gradient-based path.
type QuasiNewtonState = IterState<Theta, Grad, (), (), (), f64>;

/// Solver state of the simplex path.
type SimplexState = IterState<Theta, (), (), (), (), f64>;

/// Run L-BFGS (any line search) from `theta0`.
///
/// With `obs_slog` enabled and `opts.verbose`, ℓ(θ₀) and ‖∇ℓ(θ₀)‖ are
/// printed once and a terminal slog observer reports every iteration.
///
/// # Errors
/// Runtime failures from argmin (including model errors raised in a cost
/// or gradient call) and invalid final states rejected by
/// [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, QuasiNewtonState> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        report_start(&theta0, &problem)?;
    }
    let cap = iteration_cap(opts);
    let executor = Executor::new(problem, solver)
        .configure(|state: QuasiNewtonState| state.param(theta0).max_iters(cap));
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(argmin_observer_slog::SlogLogger::term_noblock(), ObserverMode::Always)
    } else {
        executor
    };

    let mut state = executor.run()?.state().clone();
    let gradient = state.take_gradient();
    summarize(&state, gradient)
}

/// Run Nelder–Mead; the simplex already holds the starting point.
///
/// # Errors
/// As for [`run_lbfgs`]. `grad_norm` of the outcome is always `None`.
pub fn run_nelder_mead<'a, F>(
    opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: NelderMeadSimplex,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    let cap = iteration_cap(opts);
    let executor =
        Executor::new(problem, solver).configure(|state: SimplexState| state.max_iters(cap));
    #[cfg(feature = "obs_slog")]
    let executor = if opts.verbose {
        executor.add_observer(argmin_observer_slog::SlogLogger::term_noblock(), ObserverMode::Always)
    } else {
        executor
    };

    let state = executor.run()?.state().clone();
    summarize(&state, None)
}

fn iteration_cap(opts: &MLEOptions) -> u64 {
    opts.tols.max_iter.map_or(u64::MAX, |n| n as u64)
}

/// Convert a finished solver state; the cost is negated back to ℓ.
fn summarize<I>(state: &I, gradient: Option<Grad>) -> OptResult<OptimOutcome>
where
    I: State<Param = Theta, Float = f64>,
{
    OptimOutcome::new(
        state.get_best_param().cloned(),
        -state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        gradient,
    )
}

#[cfg(feature = "obs_slog")]
fn report_start<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    match problem.gradient(theta0) {
        Ok(g) => eprintln!("start: loglik = {ll0:.6}, |grad| = {:.6}", g.l2_norm()),
        Err(_) => eprintln!("start: loglik = {ll0:.6}"),
    }
    Ok(())
}
