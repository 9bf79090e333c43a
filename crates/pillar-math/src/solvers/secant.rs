//! Secant root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{clamp, evaluate, SolverConfig, SolverResult};

/// Secant root-finding algorithm.
///
/// Approximates the derivative from the previous two iterates. Does not
/// require a derivative or a bracket; convergence order is about 1.618.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{secant, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(f, 1.0, 2.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    secant_within(&f, x0, x1, None, config)
}

/// Secant iteration with every new iterate clamped into `bounds`.
pub(crate) fn secant_within<F>(
    f: &F,
    x0: f64,
    x1: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = evaluate(f, x_prev)?;
    let mut f_curr = evaluate(f, x_curr)?;

    for iteration in 0..config.max_iterations {
        if f_curr.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x_curr,
                iterations: iteration,
                residual: f_curr,
            });
        }

        let denom = f_curr - f_prev;
        if denom.abs() < 1e-300 {
            return Err(MathError::DivisionByZero { value: denom });
        }

        let x_next = clamp(x_curr - f_curr * (x_curr - x_prev) / denom, bounds);

        if (x_next - x_curr).abs() <= config.x_tolerance {
            let f_next = evaluate(f, x_next)?;
            return Ok(SolverResult {
                root: x_next,
                iterations: iteration + 1,
                residual: f_next,
            });
        }

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = evaluate(f, x_curr)?;
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f_curr.abs(),
    ))
}
