//! Interpolation methods over curve nodes.

use pillar_math::interpolation::{
    BackwardFlatInterpolator, CubicSpline, Interpolator, LinearInterpolator,
    LogLinearInterpolator,
};
use serde::{Deserialize, Serialize};

use crate::error::CurveResult;

/// Interpolation applied to the values stored on curve nodes.
///
/// What the values are depends on the bootstrap trait: discount factors,
/// instantaneous forwards or zero rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationMethod {
    /// Linear between nodes.
    Linear,

    /// Linear on the logarithm of the node values.
    #[default]
    LogLinear,

    /// Piecewise constant, taking the value of the next node.
    BackwardFlat,

    /// Natural cubic spline.
    CubicSpline,
}

impl InterpolationMethod {
    /// Builds an interpolator over `(times, values)`.
    ///
    /// # Errors
    ///
    /// Propagates the interpolator's validation errors.
    pub fn build(
        &self,
        times: &[f64],
        values: &[f64],
        extrapolate: bool,
    ) -> CurveResult<Box<dyn Interpolator>> {
        let xs = times.to_vec();
        let ys = values.to_vec();
        let interpolator: Box<dyn Interpolator> = match (self, extrapolate) {
            (Self::Linear, false) => Box::new(LinearInterpolator::new(xs, ys)?),
            (Self::Linear, true) => Box::new(LinearInterpolator::new(xs, ys)?.with_extrapolation()),
            (Self::LogLinear, false) => Box::new(LogLinearInterpolator::new(xs, ys)?),
            (Self::LogLinear, true) => {
                Box::new(LogLinearInterpolator::new(xs, ys)?.with_extrapolation())
            }
            (Self::BackwardFlat, false) => Box::new(BackwardFlatInterpolator::new(xs, ys)?),
            (Self::BackwardFlat, true) => {
                Box::new(BackwardFlatInterpolator::new(xs, ys)?.with_extrapolation())
            }
            (Self::CubicSpline, false) => Box::new(CubicSpline::new(xs, ys)?),
            (Self::CubicSpline, true) => Box::new(CubicSpline::new(xs, ys)?.with_extrapolation()),
        };
        Ok(interpolator)
    }

    /// Returns true if a node only affects its two adjacent segments.
    ///
    /// A cubic spline couples every node with every segment, so a later node
    /// changes the curve before earlier pillars.
    #[must_use]
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::CubicSpline)
    }

    /// Returns true if the method needs strictly positive values.
    #[must_use]
    pub fn requires_positive_values(&self) -> bool {
        matches!(self, Self::LogLinear)
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::LogLinear => "Log-Linear",
            Self::BackwardFlat => "Backward-Flat",
            Self::CubicSpline => "Cubic Spline",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_build_each_method() {
        let times = [0.0, 1.0, 2.0];
        let values = [1.0, 0.97, 0.94];
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::LogLinear,
            InterpolationMethod::BackwardFlat,
            InterpolationMethod::CubicSpline,
        ] {
            let interp = method.build(&times, &values, false).unwrap();
            assert_relative_eq!(interp.interpolate(1.0).unwrap(), 0.97, epsilon = 1e-15);
            assert!(interp.interpolate(2.5).is_err());

            let extrapolating = method.build(&times, &values, true).unwrap();
            assert!(extrapolating.interpolate(2.5).is_ok());
        }
    }

    #[test]
    fn test_log_linear_rejects_negative_values() {
        let result = InterpolationMethod::LogLinear.build(&[0.0, 1.0], &[0.01, -0.01], false);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InterpolationMethod::BackwardFlat).unwrap();
        assert_eq!(json, "\"BackwardFlat\"");
        assert_eq!(InterpolationMethod::default(), InterpolationMethod::LogLinear);
        assert!(!InterpolationMethod::CubicSpline.is_local());
    }
}
