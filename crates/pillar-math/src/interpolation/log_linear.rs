//! Log-linear interpolation.
//!
//! Interpolates the logarithm of values. On discount factors this gives
//! piecewise constant instantaneous forward rates.

use crate::error::{MathError, MathResult};
use crate::interpolation::{check_range, find_segment, validate, Interpolator};

/// Log-linear interpolation between data points.
///
/// ```text
/// y(x) = y_i · exp(k_i (x - x_i)),   k_i = (ln y_{i+1} - ln y_i) / (x_{i+1} - x_i)
/// ```
///
/// # Example
///
/// ```rust
/// use pillar_math::interpolation::{LogLinearInterpolator, Interpolator};
///
/// let times = vec![0.0, 1.0, 2.0, 3.0];
/// let discount_factors = vec![1.0, 0.97, 0.94, 0.91];
///
/// let interp = LogLinearInterpolator::new(times, discount_factors).unwrap();
/// let df = interp.interpolate(1.5).unwrap();
/// assert!(df > 0.94 && df < 0.97);
/// ```
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Slope of `ln y` on each segment
    rates: Vec<f64>,
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths
    /// differ, `xs` is not strictly increasing, or any y value is not
    /// positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;

        if let Some((i, y)) = ys.iter().enumerate().find(|(_, y)| **y <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "y[{i}] = {y} is not positive; log-linear requires positive values"
            )));
        }

        let rates: Vec<f64> = (0..xs.len() - 1)
            .map(|i| (ys[i + 1].ln() - ys[i].ln()) / (xs[i + 1] - xs[i]))
            .collect();

        let mut integrals = Vec::with_capacity(xs.len());
        integrals.push(0.0);
        for i in 0..xs.len() - 1 {
            let seg = segment_integral(ys[i], rates[i], xs[i + 1] - xs[i]);
            integrals.push(integrals[i] + seg);
        }

        Ok(Self {
            xs,
            ys,
            rates,
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

    /// Returns the original y values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.ys
    }
}

/// `∫_0^dx y0·exp(k s) ds`
fn segment_integral(y0: f64, k: f64, dx: f64) -> f64 {
    if (k * dx).abs() < 1e-12 {
        y0 * dx * (1.0 + 0.5 * k * dx)
    } else {
        y0 * (k * dx).exp_m1() / k
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);
        Ok(self.ys[i] * (self.rates[i] * (x - self.xs[i])).exp())
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        // d/dx [y_i exp(k (x - x_i))] = k y(x)
        let y = self.interpolate(x)?;
        Ok(self.rates[find_segment(&self.xs, x)] * y)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        let i = find_segment(&self.xs, x);
        Ok(self.integrals[i] + segment_integral(self.ys[i], self.rates[i], x - self.xs[i]))
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_forward_between_nodes() {
        let r: f64 = 0.03;
        let times = vec![0.0, 1.0, 2.0];
        let dfs: Vec<f64> = times.iter().map(|t| (-r * t).exp()).collect();
        let interp = LogLinearInterpolator::new(times, dfs).unwrap();

        for t in [0.3, 1.2, 1.9] {
            assert_relative_eq!(interp.interpolate(t).unwrap(), (-r * t).exp(), epsilon = 1e-15);
            let fwd = -interp.derivative(t).unwrap() / interp.interpolate(t).unwrap();
            assert_relative_eq!(fwd, r, epsilon = 1e-13);
        }
    }

    #[test]
    fn test_geometric_mean_at_midpoint() {
        let interp = LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.81]).unwrap();
        assert_relative_eq!(interp.interpolate(0.5).unwrap(), 0.9, epsilon = 1e-15);
    }

    #[test]
    fn test_extrapolation() {
        let interp = LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.9])
            .unwrap()
            .with_extrapolation();
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 0.81, epsilon = 1e-14);
    }
}
