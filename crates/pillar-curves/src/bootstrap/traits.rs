//! What a curve stores on its nodes, and how the bootstrap searches for it.
//!
//! A trait decides the anchor value at the reference date, the starting
//! guess and bracket of each segment, and how an interpolated node value
//! turns into a discount factor.

use std::fmt;

use pillar_math::interpolation::Interpolator;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::interpolation::InterpolationMethod;

/// Rate used to seed the first segment.
pub const AVERAGE_RATE: f64 = 0.05;

/// Selector for the built-in bootstrap traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TraitKind {
    /// Nodes hold discount factors.
    #[default]
    Discount,
    /// Nodes hold instantaneous forward rates.
    ForwardRate,
    /// Nodes hold continuously compounded zero rates.
    ZeroYield,
}

impl TraitKind {
    /// Returns the trait as a boxed strategy.
    #[must_use]
    pub fn strategy(&self) -> Box<dyn BootstrapTrait> {
        match self {
            Self::Discount => Box::new(Discount),
            Self::ForwardRate => Box::new(ForwardRate),
            Self::ZeroYield => Box::new(ZeroYield),
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Discount => "discount factors",
            Self::ForwardRate => "instantaneous forwards",
            Self::ZeroYield => "zero yields",
        };
        write!(f, "{name}")
    }
}

/// Strategy describing the quantity stored on curve nodes.
///
/// `data` and `times` always include the anchor at index 0. When `guess`
/// and `bounds` are called for segment `i`, `times[i]` is already set and
/// `data[..i]` holds the solved nodes.
pub trait BootstrapTrait: Send + Sync + fmt::Debug + 'static {
    /// Which built-in trait this is.
    fn kind(&self) -> TraitKind;

    /// Value stored on the node at the reference date.
    fn initial_value(&self) -> f64;

    /// Starting point for segment `i`.
    fn guess(&self, i: usize, data: &[f64], times: &[f64]) -> f64;

    /// Search interval for segment `i`.
    fn bounds(&self, i: usize, data: &[f64], times: &[f64], max_rate: f64) -> (f64, f64);

    /// Stores a trial value for segment `i`.
    fn update_guess(&self, data: &mut [f64], value: f64, i: usize) {
        data[i] = value;
    }

    /// Discount factor at `t` from an interpolator over the node values.
    fn discount(&self, interpolator: &dyn Interpolator, t: f64) -> CurveResult<f64>;

    /// Checks that `interpolation` can be used on this trait's values.
    fn supports(&self, interpolation: InterpolationMethod) -> CurveResult<()> {
        let _ = interpolation;
        Ok(())
    }
}

/// Nodes hold discount factors; the anchor is `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discount;

impl BootstrapTrait for Discount {
    fn kind(&self) -> TraitKind {
        TraitKind::Discount
    }

    fn initial_value(&self) -> f64 {
        1.0
    }

    fn guess(&self, i: usize, data: &[f64], times: &[f64]) -> f64 {
        if i == 1 {
            return data[0] * (-AVERAGE_RATE * times[1]).exp();
        }
        // extend the previous segment's forward
        let r = (data[i - 2] / data[i - 1]).ln() / (times[i - 1] - times[i - 2]);
        data[i - 1] * (-r * (times[i] - times[i - 1])).exp()
    }

    fn bounds(&self, i: usize, data: &[f64], times: &[f64], max_rate: f64) -> (f64, f64) {
        let dt = times[i] - times[i - 1];
        let previous = data[i - 1];
        (
            previous * (-max_rate * dt).exp(),
            previous * (max_rate * dt).exp(),
        )
    }

    fn discount(&self, interpolator: &dyn Interpolator, t: f64) -> CurveResult<f64> {
        Ok(interpolator.interpolate(t)?)
    }

    // Flat discount factors carry a zero forward inside each segment.
    fn supports(&self, interpolation: InterpolationMethod) -> CurveResult<()> {
        if interpolation == InterpolationMethod::BackwardFlat {
            return Err(CurveError::unsupported_interpolation(
                self.kind().to_string(),
                interpolation.to_string(),
            ));
        }
        Ok(())
    }
}

/// Nodes hold instantaneous forward rates.
///
/// The discount factor is `exp(-∫₀ᵗ f)`, taken from the interpolator's
/// primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardRate;

impl BootstrapTrait for ForwardRate {
    fn kind(&self) -> TraitKind {
        TraitKind::ForwardRate
    }

    fn initial_value(&self) -> f64 {
        AVERAGE_RATE
    }

    fn guess(&self, i: usize, data: &[f64], times: &[f64]) -> f64 {
        rate_guess(i, data, times)
    }

    fn bounds(&self, _i: usize, _data: &[f64], _times: &[f64], max_rate: f64) -> (f64, f64) {
        (-max_rate, max_rate)
    }

    fn update_guess(&self, data: &mut [f64], value: f64, i: usize) {
        update_rate(data, value, i);
    }

    fn discount(&self, interpolator: &dyn Interpolator, t: f64) -> CurveResult<f64> {
        Ok((-interpolator.primitive(t)?).exp())
    }

    fn supports(&self, interpolation: InterpolationMethod) -> CurveResult<()> {
        reject_positive_only(self.kind(), interpolation)
    }
}

/// Nodes hold continuously compounded zero rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroYield;

impl BootstrapTrait for ZeroYield {
    fn kind(&self) -> TraitKind {
        TraitKind::ZeroYield
    }

    fn initial_value(&self) -> f64 {
        AVERAGE_RATE
    }

    fn guess(&self, i: usize, data: &[f64], times: &[f64]) -> f64 {
        rate_guess(i, data, times)
    }

    fn bounds(&self, _i: usize, _data: &[f64], _times: &[f64], max_rate: f64) -> (f64, f64) {
        (-max_rate, max_rate)
    }

    fn update_guess(&self, data: &mut [f64], value: f64, i: usize) {
        update_rate(data, value, i);
    }

    fn discount(&self, interpolator: &dyn Interpolator, t: f64) -> CurveResult<f64> {
        if t == 0.0 {
            return Ok(1.0);
        }
        Ok((-interpolator.interpolate(t)? * t).exp())
    }

    fn supports(&self, interpolation: InterpolationMethod) -> CurveResult<()> {
        reject_positive_only(self.kind(), interpolation)
    }
}

fn rate_guess(i: usize, data: &[f64], _times: &[f64]) -> f64 {
    if i == 1 {
        AVERAGE_RATE
    } else {
        data[i - 1]
    }
}

// The anchor follows the first segment so the curve is flat before it.
fn update_rate(data: &mut [f64], value: f64, i: usize) {
    data[i] = value;
    if i == 1 {
        data[0] = value;
    }
}

fn reject_positive_only(kind: TraitKind, interpolation: InterpolationMethod) -> CurveResult<()> {
    if interpolation.requires_positive_values() {
        return Err(CurveError::unsupported_interpolation(
            kind.to_string(),
            interpolation.to_string(),
        ));
    }
    Ok(())
}

impl BootstrapTrait for Box<dyn BootstrapTrait> {
    fn kind(&self) -> TraitKind {
        (**self).kind()
    }

    fn initial_value(&self) -> f64 {
        (**self).initial_value()
    }

    fn guess(&self, i: usize, data: &[f64], times: &[f64]) -> f64 {
        (**self).guess(i, data, times)
    }

    fn bounds(&self, i: usize, data: &[f64], times: &[f64], max_rate: f64) -> (f64, f64) {
        (**self).bounds(i, data, times, max_rate)
    }

    fn update_guess(&self, data: &mut [f64], value: f64, i: usize) {
        (**self).update_guess(data, value, i);
    }

    fn discount(&self, interpolator: &dyn Interpolator, t: f64) -> CurveResult<f64> {
        (**self).discount(interpolator, t)
    }

    fn supports(&self, interpolation: InterpolationMethod) -> CurveResult<()> {
        (**self).supports(interpolation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_guess_extends_forward() {
        let times = [0.0, 1.0, 2.0];
        let data = [1.0, (-0.03f64).exp()];
        let first = Discount.guess(1, &data, &times);
        assert_relative_eq!(first, (-0.05f64).exp(), epsilon = 1e-15);

        let second = Discount.guess(2, &data, &times);
        assert_relative_eq!(second, (-0.06f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_discount_bounds_bracket_previous() {
        let times = [0.0, 0.5];
        let data = [1.0];
        let (lo, hi) = Discount.bounds(1, &data, &times, 1.0);
        assert_relative_eq!(lo, (-0.5f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(hi, 0.5f64.exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_rate_traits_move_anchor_on_first_segment() {
        let mut data = vec![AVERAGE_RATE, 0.0, 0.0];
        ForwardRate.update_guess(&mut data, 0.031, 1);
        assert_eq!(data[0], 0.031);
        ZeroYield.update_guess(&mut data, 0.035, 2);
        assert_eq!(data[0], 0.031);
        assert_eq!(data[2], 0.035);
        assert_eq!(ZeroYield.bounds(2, &data, &[0.0, 1.0, 2.0], 0.5), (-0.5, 0.5));
    }

    #[test]
    fn test_rate_traits_reject_log_linear() {
        let err = ForwardRate.supports(InterpolationMethod::LogLinear).unwrap_err();
        assert!(err.is_configuration());
        assert!(ZeroYield.supports(InterpolationMethod::LogLinear).is_err());
        assert!(ZeroYield.supports(InterpolationMethod::Linear).is_ok());
        assert!(Discount.supports(InterpolationMethod::LogLinear).is_ok());
    }

    #[test]
    fn test_discount_rejects_backward_flat() {
        let err = Discount.supports(InterpolationMethod::BackwardFlat).unwrap_err();
        assert!(matches!(err, CurveError::UnsupportedInterpolation { .. }));
        assert!(err.is_configuration());
        assert!(Discount.supports(InterpolationMethod::CubicSpline).is_ok());
        assert!(ForwardRate.supports(InterpolationMethod::BackwardFlat).is_ok());
        assert!(ZeroYield.supports(InterpolationMethod::BackwardFlat).is_ok());
    }

    #[test]
    fn test_discount_mapping() {
        let forwards = InterpolationMethod::BackwardFlat
            .build(&[0.0, 1.0, 2.0], &[0.02, 0.02, 0.04], true)
            .unwrap();
        assert_relative_eq!(
            ForwardRate.discount(forwards.as_ref(), 1.5).unwrap(),
            (-(0.02 + 0.5 * 0.04f64)).exp(),
            epsilon = 1e-15
        );

        let zeros = InterpolationMethod::Linear
            .build(&[0.0, 1.0], &[0.03, 0.03], true)
            .unwrap();
        assert_eq!(ZeroYield.discount(zeros.as_ref(), 0.0).unwrap(), 1.0);
        assert_relative_eq!(
            ZeroYield.discount(zeros.as_ref(), 2.0).unwrap(),
            (-0.06f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_boxed_strategy_delegates() {
        let boxed = TraitKind::ZeroYield.strategy();
        assert_eq!(boxed.kind(), TraitKind::ZeroYield);
        assert_eq!(boxed.initial_value(), AVERAGE_RATE);
    }
}
