//! Partial curve seen by a helper while its segment is solved.

use pillar_core::daycounts::DayCountConvention;
use pillar_core::types::Date;
use pillar_math::interpolation::Interpolator;

use super::BootstrapTrait;
use crate::error::CurveResult;
use crate::interpolation::InterpolationMethod;
use crate::jumps::JumpOverlay;
use crate::traits::{check_time, Curve};

/// A curve over the nodes solved so far plus the trial node.
///
/// The view always extrapolates: a helper may read dates just past its
/// pillar, and the last segment is extended to reach them.
pub struct BootstrapCurve<'a> {
    reference_date: Date,
    day_count: DayCountConvention,
    max_date: Date,
    max_time: f64,
    interpolator: Box<dyn Interpolator>,
    strategy: &'a dyn BootstrapTrait,
    jumps: &'a JumpOverlay,
}

impl<'a> BootstrapCurve<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        reference_date: Date,
        day_count: DayCountConvention,
        dates: &[Date],
        times: &[f64],
        data: &[f64],
        interpolation: InterpolationMethod,
        strategy: &'a dyn BootstrapTrait,
        jumps: &'a JumpOverlay,
    ) -> CurveResult<Self> {
        let interpolator = interpolation.build(times, data, true)?;
        Ok(Self {
            reference_date,
            day_count,
            max_date: dates[dates.len() - 1],
            max_time: times[times.len() - 1],
            interpolator,
            strategy,
            jumps,
        })
    }
}

impl Curve for BootstrapCurve<'_> {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    fn max_date(&self) -> CurveResult<Date> {
        Ok(self.max_date)
    }

    fn max_time(&self) -> CurveResult<f64> {
        Ok(self.max_time)
    }

    fn allows_extrapolation(&self) -> bool {
        true
    }

    fn discount_t(&self, t: f64, _extrapolate: bool) -> CurveResult<f64> {
        check_time(t, self.max_time, true)?;
        let discount = self.strategy.discount(self.interpolator.as_ref(), t)?;
        Ok(discount * self.jumps.factor(t)?)
    }
}
