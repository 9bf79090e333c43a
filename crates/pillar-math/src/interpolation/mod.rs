//! Interpolation methods for yield curve construction.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Piecewise linear
//! - [`LogLinearInterpolator`]: Linear in `ln(y)`; piecewise flat forwards on discount factors
//! - [`BackwardFlatInterpolator`]: Piecewise constant, taking the right-hand node value
//! - [`CubicSpline`]: Natural cubic spline
//!
//! | Method | Smoothness | Positive values | Typical node quantity |
//! |--------|------------|-----------------|-----------------------|
//! | Linear | C0 | No | Zero rates, forwards |
//! | Log-Linear | C0 | Yes | Discount factors |
//! | Backward-Flat | none | No | Instantaneous forwards |
//! | Cubic Spline | C2 | No | Zero rates |
//!
//! Every interpolator also exposes [`Interpolator::primitive`], the
//! integral from the first node, which turns an instantaneous forward
//! curve into discount factors without numerical quadrature.

mod backward_flat;
mod cubic_spline;
mod linear;
mod log_linear;

pub use backward_flat::BackwardFlatInterpolator;
pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
///
/// All interpolation methods implement this trait, providing a unified
/// interface for curve construction.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns `∫_{x0}^{x} y(s) ds` where `x0` is the first node.
    fn primitive(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Checks lengths and strict monotonicity of the nodes.
pub(crate) fn validate(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.len() < 2 {
        return Err(MathError::insufficient_data(2, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("node values must be finite"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    Ok(())
}

/// Rejects `x` outside the node range unless extrapolation is allowed.
pub(crate) fn check_range(xs: &[f64], x: f64, allow_extrapolation: bool) -> MathResult<()> {
    if x.is_nan() {
        return Err(MathError::invalid_input("interpolation point is NaN"));
    }
    let (min, max) = (xs[0], xs[xs.len() - 1]);
    if !allow_extrapolation && (x < min || x > max) {
        return Err(MathError::ExtrapolationNotAllowed { x, min, max });
    }
    Ok(())
}

/// Finds the index i such that xs[i] <= x < xs[i+1], clamped to the
/// first and last segments.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    match xs.binary_search_by(|node| node.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)) {
        Ok(i) => i.min(xs.len() - 2),
        Err(i) => (i.saturating_sub(1)).min(xs.len() - 2),
    }
}
