//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{clamp, evaluate, SolverConfig, SolverResult};

/// Step used by the central finite difference.
const FD_STEP: f64 = 1e-8;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{newton_raphson, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    newton_within(&f, &df, initial_guess, None, config)
}

/// Newton-Raphson with a central finite-difference derivative.
pub fn newton_raphson_numerical<F>(
    f: F,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = central_difference(&f);
    newton_within(&f, &df, initial_guess, None, config)
}

pub(crate) fn central_difference<F>(f: &F) -> impl Fn(f64) -> f64 + '_
where
    F: Fn(f64) -> f64,
{
    move |x: f64| {
        let h = FD_STEP * x.abs().max(1.0);
        (f(x + h) - f(x - h)) / (2.0 * h)
    }
}

/// Newton iteration with every iterate clamped into `bounds`.
pub(crate) fn newton_within<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    bounds: Option<(f64, f64)>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut x = clamp(initial_guess, bounds);
    let mut fx = evaluate(f, x)?;

    for iteration in 0..config.max_iterations {
        if fx.abs() <= config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let dfx = df(x);
        if !dfx.is_finite() {
            return Err(MathError::NonFinite { x });
        }
        if dfx.abs() < 1e-300 {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let next = clamp(x - fx / dfx, bounds);
        let step = next - x;
        x = next;
        fx = evaluate(f, x)?;

        if step.abs() <= config.x_tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: fx,
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        fx.abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let result = newton_raphson(f, df, 1.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_numerical_derivative() {
        let f = |r: f64| (-r * 5.0).exp() - 0.8;
        let result = newton_raphson_numerical(f, 0.01, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, -(0.8f64.ln()) / 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_derivative() {
        let f = |x: f64| x * x + 1.0;
        let df = |x: f64| 2.0 * x;
        assert!(matches!(
            newton_raphson(f, df, 0.0, &SolverConfig::default()),
            Err(MathError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_bounds_respected() {
        let f = |x: f64| x - 5.0;
        let df = |_x: f64| 1.0;
        let config = SolverConfig::default().with_max_iterations(3);
        let result = newton_within(&f, &df, 0.0, Some((0.0, 1.0)), &config);
        // The clamped iterate sits on the upper bound and cannot move further
        let r = result.unwrap();
        assert_eq!(r.root, 1.0);
        assert_relative_eq!(r.residual, -4.0);
    }
}
