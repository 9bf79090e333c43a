//! Backward-flat (piecewise constant) interpolation.

use crate::error::MathResult;
use crate::interpolation::{check_range, find_segment, validate, Interpolator};

/// Piecewise constant interpolation.
///
/// On `(x_i, x_{i+1}]` the value is `y_{i+1}`; at the first node it is
/// `y_0`. Beyond the last node the last value is held, before the first
/// node the first value.
///
/// Used on instantaneous forwards, this gives the classic piecewise flat
/// forward curve.
#[derive(Debug, Clone)]
pub struct BackwardFlatInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    integrals: Vec<f64>,
    allow_extrapolation: bool,
}

impl BackwardFlatInterpolator {
    /// Creates a new backward-flat interpolator.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;

        let mut integrals = Vec::with_capacity(xs.len());
        integrals.push(0.0);
        for i in 0..xs.len() - 1 {
            integrals.push(integrals[i] + (xs[i + 1] - xs[i]) * ys[i + 1]);
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
}

impl Interpolator for BackwardFlatInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        if x <= self.xs[0] {
            return Ok(self.ys[0]);
        }
        let i = find_segment(&self.xs, x);
        if x == self.xs[i] {
            Ok(self.ys[i])
        } else {
            Ok(self.ys[i + 1])
        }
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        Ok(0.0)
    }

    fn primitive(&self, x: f64) -> MathResult<f64> {
        check_range(&self.xs, x, self.allow_extrapolation)?;
        if x <= self.xs[0] {
            return Ok(self.ys[0] * (x - self.xs[0]));
        }
        let i = find_segment(&self.xs, x);
        Ok(self.integrals[i] + (x - self.xs[i]) * self.ys[i + 1])
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
    fn test_takes_right_node_value() {
        let interp =
            BackwardFlatInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.01, 0.02, 0.03]).unwrap();
        assert_eq!(interp.interpolate(0.0).unwrap(), 0.01);
        assert_eq!(interp.interpolate(0.5).unwrap(), 0.02);
        assert_eq!(interp.interpolate(1.0).unwrap(), 0.02);
        assert_eq!(interp.interpolate(1.000_001).unwrap(), 0.03);
        assert_eq!(interp.derivative(1.5).unwrap(), 0.0);
    }

    #[test]
    fn test_primitive_and_extrapolation() {
        let interp = BackwardFlatInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.01, 0.02, 0.03])
            .unwrap()
            .with_extrapolation();
        assert_relative_eq!(interp.primitive(1.5).unwrap(), 0.02 + 0.015, epsilon = 1e-15);
        assert_relative_eq!(interp.primitive(3.0).unwrap(), 0.02 + 0.06, epsilon = 1e-15);
        assert_eq!(interp.interpolate(5.0).unwrap(), 0.03);
    }
}
