//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{check_range, find_segment, validate, Interpolator};
use crate::linear_algebra::solve_tridiagonal;

/// Natural cubic spline (zero second derivative at both ends).
///
/// On each segment, with `A = (x_{i+1} - x) / h` and `B = 1 - A`:
///
/// ```text
/// y = A y_i + B y_{i+1} + ((A³ - A) y''_i + (B³ - B) y''_{i+1}) h² / 6
/// ```
///
/// Beyond the ends the boundary cubic is continued.
///
/// # Example
///
/// ```rust
/// use pillar_math::interpolation::{CubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!((y - 2.25).abs() < 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at the nodes
    y2s: Vec<f64>,
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl CubicSpline {
    /// Creates a new natural cubic spline.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;
        let y2s = second_derivatives(&xs, &ys)?;

        let mut spline = Self {
            xs,
            ys,
            y2s,
            integrals: Vec::new(),
            allow_extrapolation: false,
        };
        let n = spline.xs.len();
        let mut integrals = Vec::with_capacity(n);
        integrals.push(0.0);
        for i in 0..n - 1 {
            integrals.push(integrals[i] + spline.segment_integral(i, 1.0));
        }
        spline.integrals = integrals;
        Ok(spline)
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// `∫_{x_i}^{x_i + b h} y`, with `b` the fractional position in segment `i`.
    fn segment_integral(&self, i: usize, b: f64) -> f64 {
        let h = self.xs[i + 1] - self.xs[i];
        let a_term = (1.0 - (1.0 - b).powi(4)) / 4.0 - b + 0.5 * b * b;
        let b_term = 0.25 * b.powi(4) - 0.5 * b * b;
        h * (self.ys[i] * (b - 0.5 * b * b)
            + self.ys[i + 1] * 0.5 * b * b
            + h * h / 6.0 * (self.y2s[i] * a_term + self.y2s[i + 1] * b_term))
    }
}

/// Solves the natural spline system for the second derivatives.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> MathResult<Vec<f64>> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    if n < 3 {
        return Ok(y2s);
    }

    let m = n - 2;
    let mut lower = Vec::with_capacity(m.saturating_sub(1));
    let mut diag = Vec::with_capacity(m);
    let mut upper = Vec::with_capacity(m.saturating_sub(1));
    let mut rhs = Vec::with_capacity(m);

    for i in 1..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        if i > 1 {
            lower.push(h0 / 6.0);
        }
        diag.push((h0 + h1) / 3.0);
        if i < n - 2 {
            upper.push(h1 / 6.0);
        }
        rhs.push((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
    }

    let inner = solve_tridiagonal(&lower, &diag, &upper, &rhs)?;
    y2s[1..n - 1].copy_from_slice(&inner);
    Ok(y2s)
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);

        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        Ok(a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.y2s[i] + (b * b * b - b) * self.y2s[i + 1]) * h * h / 6.0)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);

        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;

        Ok((self.ys[i + 1] - self.ys[i]) / h
            - (3.0 * a * a - 1.0) * h * self.y2s[i] / 6.0
            + (3.0 * b * b - 1.0) * h * self.y2s[i + 1] / 6.0)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);
        let b = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(self.integrals[i] + self.segment_integral(i, b))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
