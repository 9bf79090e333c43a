//! Root-finding algorithms.
//!
//! This module provides one-dimensional solvers used by the bootstrap:
//!
//! - [`brent`]: Robust method combining bisection, secant, and inverse quadratic
//! - [`bisection`]: Simple and reliable bracketing method
//! - [`secant`]: Derivative-free method from two starting points
//! - [`newton_raphson`]: Quadratic convergence when a derivative is available
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Secant | Fast (superlinear) | May diverge | Guess |
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Guess, derivative optional |
//!
//! Every solver treats a NaN or infinite function value as
//! [`MathError::NonFinite`](crate::MathError::NonFinite) instead of
//! iterating on garbage.
//!
//! # Example
//!
//! ```rust
//! use pillar_math::solvers::{brent, SolverConfig};
//!
//! // Continuously compounded rate that gives a discount factor of 0.95 at 2y
//! let f = |r: f64| (-r * 2.0).exp() - 0.95;
//! let result = brent(f, 0.0, 0.2, &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.95f64.ln() / -2.0).abs() < 1e-12);
//! ```

mod bisection;
mod brent;
mod newton;
mod secant;

pub use bisection::bisection;
pub use brent::brent;
pub use newton::{newton_raphson, newton_raphson_numerical};
pub use secant::secant;

use crate::error::{MathError, MathResult};

/// Default tolerance on `|f(x)|`.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default tolerance on bracket width or step size.
pub const DEFAULT_X_TOLERANCE: f64 = 1e-15;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Convergence tolerance on the function value.
    pub tolerance: f64,
    /// Bracket width or step size at which iteration stops.
    pub x_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            x_tolerance: DEFAULT_X_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the x tolerance.
    #[must_use]
    pub fn with_x_tolerance(mut self, x_tolerance: f64) -> Self {
        self.x_tolerance = x_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// Trait for root-finding solvers with optional derivative.
///
/// The bootstrap is generic over this trait, so any implementation can
/// be plugged into a curve.
///
/// # Example
///
/// ```rust
/// use pillar_math::solvers::{Solver, NewtonSolver, SolverConfig};
///
/// let solver = NewtonSolver;
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = solver.solve(f, Some(df), 1.5, None, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub trait Solver: Send + Sync {
    /// Solves for a root of the given function.
    ///
    /// # Arguments
    ///
    /// * `f` - The function for which to find a root
    /// * `derivative` - Optional derivative function (used if available)
    /// * `initial_guess` - Starting point for the search
    /// * `bounds` - Optional interval `(min, max)` for the root
    /// * `config` - Solver configuration
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64;

    /// Returns the name of the solver.
    fn name(&self) -> &'static str;
}

/// Newton-Raphson solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonSolver;

impl Solver for NewtonSolver {
    fn solve<F, D>(
        &self,
        f: F,
        derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        match derivative {
            Some(df) => newton::newton_within(&f, &df, initial_guess, bounds, config),
            None => {
                let df = newton::central_difference(&f);
                newton::newton_within(&f, &df, initial_guess, bounds, config)
            }
        }
    }

    fn name(&self) -> &'static str {
        "Newton-Raphson"
    }
}

/// Brent's method solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrentSolver;

impl Solver for BrentSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        brent(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Brent"
    }
}

/// Bisection solver implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BisectionSolver;

impl Solver for BisectionSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let (a, b) = bounds.unwrap_or((initial_guess - 1.0, initial_guess + 1.0));
        bisection(f, a, b, config)
    }

    fn name(&self) -> &'static str {
        "Bisection"
    }
}

/// Secant method solver implementation.
///
/// Starts from the guess and a point offset by a small relative step.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecantSolver;

impl Solver for SecantSolver {
    fn solve<F, D>(
        &self,
        f: F,
        _derivative: Option<D>,
        initial_guess: f64,
        bounds: Option<(f64, f64)>,
        config: &SolverConfig,
    ) -> MathResult<SolverResult>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        let step = 1e-4 * initial_guess.abs().max(1e-2);
        let x0 = clamp(initial_guess, bounds);
        let mut x1 = clamp(initial_guess + step, bounds);
        if x1 == x0 {
            x1 = clamp(initial_guess - step, bounds);
        }
        secant::secant_within(&f, x0, x1, bounds, config)
    }

    fn name(&self) -> &'static str {
        "Secant"
    }
}

/// Evaluates `f(x)`, rejecting NaN and infinities.
pub(crate) fn evaluate<F>(f: &F, x: f64) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    let fx = f(x);
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(MathError::NonFinite { x })
    }
}

/// Clamps `x` into `bounds` when they are given.
pub(crate) fn clamp(x: f64, bounds: Option<(f64, f64)>) -> f64 {
    match bounds {
        Some((lo, hi)) => x.max(lo.min(hi)).min(hi.max(lo)),
        None => x,
    }
}
