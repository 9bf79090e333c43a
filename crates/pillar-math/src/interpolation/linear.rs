//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{check_range, find_segment, validate, Interpolator};

/// Piecewise linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use pillar_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let times = vec![0.0, 1.0, 2.0];
/// let rates = vec![0.02, 0.03, 0.035];
///
/// let interp = LinearInterpolator::new(times, rates).unwrap();
/// assert!((interp.interpolate(0.5).unwrap() - 0.025).abs() < 1e-15);
/// assert!((interp.primitive(1.0).unwrap() - 0.025).abs() < 1e-15);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// `∫_{x0}^{x_i} y`
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths
    /// differ, or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;

        let mut integrals = Vec::with_capacity(xs.len());
        integrals.push(0.0);
        for i in 0..xs.len() - 1 {
            let h = xs[i + 1] - xs[i];
            integrals.push(integrals[i] + 0.5 * h * (ys[i] + ys[i + 1]));
        }

        Ok(Self {
            xs,
            ys,
            integrals,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    fn slope(&self, i: usize) -> f64 {
        (self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i])
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);
        Ok(self.ys[i] + self.slope(i) * (x - self.xs[i]))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        Ok(self.slope(find_segment(&self.xs, x)))
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);
        let dx = x - self.xs[i];
        Ok(self.integrals[i] + dx * (self.ys[i] + 0.5 * self.slope(i) * dx))
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
