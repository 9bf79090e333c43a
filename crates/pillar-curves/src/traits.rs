//! The read interface shared by curves and bootstrap views.
//!
//! Rate helpers price themselves against a `&dyn Curve`, which is either the
//! finished [`PiecewiseYieldCurve`](crate::PiecewiseYieldCurve) or the partial
//! view used while a segment is being solved.

use pillar_core::daycounts::DayCountConvention;
use pillar_core::types::{Compounding, Date, Frequency, InterestRate, Period};

use crate::error::{CurveError, CurveResult};

/// Time step used when a rate is requested over a zero-length period.
pub const ZERO_PERIOD_STEP: f64 = 1e-4;

/// The core trait for yield term structures.
///
/// # Required Methods
///
/// Implementations must provide:
/// - [`reference_date`](Curve::reference_date): date at which `t = 0`
/// - [`day_count`](Curve::day_count): convention converting dates to times
/// - [`max_date`](Curve::max_date) and [`max_time`](Curve::max_time): last node
/// - [`discount_t`](Curve::discount_t): the discount factor at a time
///
/// # Derived Methods
///
/// Everything else is built on `discount_t`:
/// - [`discount`](Curve::discount): discount factor at a date
/// - [`zero_rate`](Curve::zero_rate) / [`zero_rate_t`](Curve::zero_rate_t)
/// - [`forward_rate`](Curve::forward_rate) / [`forward_rate_t`](Curve::forward_rate_t)
/// - [`par_rate`](Curve::par_rate) / [`par_rate_t`](Curve::par_rate_t) /
///   [`par_rate_tenor`](Curve::par_rate_tenor)
///
/// # Example
///
/// ```rust,ignore
/// use pillar_curves::prelude::*;
///
/// let df = curve.discount(maturity, false)?;
/// let zero = curve.zero_rate(maturity, DayCountConvention::Act365Fixed,
///                            Compounding::Continuous, Frequency::Annual, false)?;
/// ```
pub trait Curve: Send + Sync {
    /// Date at which the curve time is zero.
    fn reference_date(&self) -> Date;

    /// Day count used to convert dates into curve times.
    fn day_count(&self) -> DayCountConvention;

    /// Date of the last curve node.
    fn max_date(&self) -> CurveResult<Date>;

    /// Time of the last curve node.
    fn max_time(&self) -> CurveResult<f64>;

    /// Discount factor at time `t`.
    ///
    /// # Errors
    ///
    /// Fails for negative times, and for `t > max_time` unless `extrapolate`
    /// is set or the curve allows extrapolation.
    fn discount_t(&self, t: f64, extrapolate: bool) -> CurveResult<f64>;

    /// Whether queries past the last node are allowed without the flag.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Time from the reference date to `date`.
    fn time_from_reference(&self, date: Date) -> f64 {
        self.day_count().year_fraction(self.reference_date(), date)
    }

    /// Checks that `t` may be queried.
    fn check_range(&self, t: f64, extrapolate: bool) -> CurveResult<()> {
        check_time(
            t,
            self.max_time()?,
            extrapolate || self.allows_extrapolation(),
        )
    }

    /// Discount factor at `date`.
    fn discount(&self, date: Date, extrapolate: bool) -> CurveResult<f64> {
        self.discount_t(self.time_from_reference(date), extrapolate)
    }

    /// Zero rate to `date`, quoted with the given conventions.
    fn zero_rate(
        &self,
        date: Date,
        day_count: DayCountConvention,
        compounding: Compounding,
        frequency: Frequency,
        extrapolate: bool,
    ) -> CurveResult<InterestRate> {
        let reference = self.reference_date();
        if date == reference {
            let compound = 1.0 / self.discount_t(ZERO_PERIOD_STEP, extrapolate)?;
            return Ok(InterestRate::implied_rate(
                compound,
                day_count,
                compounding,
                frequency,
                ZERO_PERIOD_STEP,
            )?);
        }
        let compound = 1.0 / self.discount(date, extrapolate)?;
        let t = day_count.year_fraction(reference, date);
        Ok(InterestRate::implied_rate(
            compound,
            day_count,
            compounding,
            frequency,
            t,
        )?)
    }

    /// Zero rate to time `t`, using the curve's day count.
    fn zero_rate_t(
        &self,
        t: f64,
        compounding: Compounding,
        frequency: Frequency,
        extrapolate: bool,
    ) -> CurveResult<InterestRate> {
        let t = if t == 0.0 { ZERO_PERIOD_STEP } else { t };
        let compound = 1.0 / self.discount_t(t, extrapolate)?;
        Ok(InterestRate::implied_rate(
            compound,
            self.day_count(),
            compounding,
            frequency,
            t,
        )?)
    }

    /// Forward rate between two dates.
    ///
    /// Equal dates give the rate over a short period starting at `d1`.
    fn forward_rate(
        &self,
        d1: Date,
        d2: Date,
        day_count: DayCountConvention,
        compounding: Compounding,
        frequency: Frequency,
        extrapolate: bool,
    ) -> CurveResult<InterestRate> {
        if d1 > d2 {
            return Err(CurveError::InvalidDateRange { start: d1, end: d2 });
        }
        if d1 == d2 {
            let t1 = self.time_from_reference(d1);
            let t2 = t1 + ZERO_PERIOD_STEP;
            let compound = self.discount_t(t1, extrapolate)? / self.discount_t(t2, extrapolate)?;
            return Ok(InterestRate::implied_rate(
                compound,
                day_count,
                compounding,
                frequency,
                ZERO_PERIOD_STEP,
            )?);
        }
        let compound = self.discount(d1, extrapolate)? / self.discount(d2, extrapolate)?;
        Ok(InterestRate::implied_rate(
            compound,
            day_count,
            compounding,
            frequency,
            day_count.year_fraction(d1, d2),
        )?)
    }

    /// Forward rate between two times, using the curve's day count.
    fn forward_rate_t(
        &self,
        t1: f64,
        t2: f64,
        compounding: Compounding,
        frequency: Frequency,
        extrapolate: bool,
    ) -> CurveResult<InterestRate> {
        if t2 < t1 {
            return Err(CurveError::invalid_input(format!(
                "forward start {t1} is after end {t2}"
            )));
        }
        let t2 = if t2 == t1 { t1 + ZERO_PERIOD_STEP } else { t2 };
        let compound = self.discount_t(t1, extrapolate)? / self.discount_t(t2, extrapolate)?;
        Ok(InterestRate::implied_rate(
            compound,
            self.day_count(),
            compounding,
            frequency,
            t2 - t1,
        )?)
    }

    /// Par rate of a bond paying on `dates[1..]`, starting at `dates[0]`.
    fn par_rate(&self, dates: &[Date], frequency: Frequency, extrapolate: bool) -> CurveResult<f64> {
        let times: Vec<f64> = dates.iter().map(|d| self.time_from_reference(*d)).collect();
        self.par_rate_t(&times, frequency, extrapolate)
    }

    /// Par rate over payment times: `(P(t0) - P(tn)) f / Σ_{i≥1} P(ti)`.
    fn par_rate_t(&self, times: &[f64], frequency: Frequency, extrapolate: bool) -> CurveResult<f64> {
        if times.len() < 2 {
            return Err(CurveError::invalid_input(format!(
                "par rate needs at least 2 dates, got {}",
                times.len()
            )));
        }
        let f = f64::from(frequency.periods_per_year());
        if f == 0.0 {
            return Err(CurveError::invalid_input(format!(
                "frequency {frequency} has no periods per year"
            )));
        }
        let mut annuity = 0.0;
        for t in &times[1..] {
            annuity += self.discount_t(*t, extrapolate)?;
        }
        let first = self.discount_t(times[0], extrapolate)?;
        let last = self.discount_t(times[times.len() - 1], extrapolate)?;
        Ok((first - last) * f / annuity)
    }

    /// Par rate of a `tenor_years` bond starting at `start`.
    ///
    /// Payment dates are `start + i·(12/f)` months, unadjusted.
    fn par_rate_tenor(
        &self,
        tenor_years: u32,
        start: Date,
        frequency: Frequency,
        extrapolate: bool,
    ) -> CurveResult<f64> {
        let f = frequency.periods_per_year();
        if f == 0 || 12 % f != 0 {
            return Err(CurveError::invalid_input(format!(
                "frequency {frequency} does not divide the year into whole months"
            )));
        }
        let step = Period::months((12 / f) as i32);
        let mut dates = Vec::with_capacity((tenor_years * f + 1) as usize);
        for i in 0..=tenor_years * f {
            dates.push(start.add_period(step.times(i as i32))?);
        }
        self.par_rate(&dates, frequency, extrapolate)
    }
}

/// Validates a query time against the last node time.
pub(crate) fn check_time(t: f64, max_time: f64, extrapolate: bool) -> CurveResult<()> {
    if !t.is_finite() || t < 0.0 {
        return Err(CurveError::InvalidTime { t });
    }
    if !extrapolate && t > max_time && !close_enough(t, max_time) {
        return Err(CurveError::ExtrapolationNotAllowed { t, max_time });
    }
    Ok(())
}

/// Equality up to a few ulps, scaled by magnitude.
pub(crate) fn close_enough(x: f64, y: f64) -> bool {
    if x == y {
        return true;
    }
    let diff = (x - y).abs();
    let tolerance = 42.0 * f64::EPSILON;
    diff <= tolerance * x.abs() && diff <= tolerance * y.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Flat continuously compounded curve.
    struct FlatCurve {
        reference: Date,
        rate: f64,
        max_time: f64,
    }

    impl Curve for FlatCurve {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Act365Fixed
        }

        fn max_date(&self) -> CurveResult<Date> {
            Ok(self.reference.add_days((self.max_time * 365.0) as i64))
        }

        fn max_time(&self) -> CurveResult<f64> {
            Ok(self.max_time)
        }

        fn discount_t(&self, t: f64, extrapolate: bool) -> CurveResult<f64> {
            self.check_range(t, extrapolate)?;
            Ok((-self.rate * t).exp())
        }
    }

    fn flat(rate: f64) -> FlatCurve {
        FlatCurve {
            reference: Date::from_ymd(2025, 1, 15).unwrap(),
            rate,
            max_time: 10.0,
        }
    }

    #[test]
    fn test_zero_rate_recovers_flat_rate() {
        let curve = flat(0.03);
        let date = curve.reference.add_days(730);
        let z = curve
            .zero_rate(
                date,
                DayCountConvention::Act365Fixed,
                Compounding::Continuous,
                Frequency::Annual,
                false,
            )
            .unwrap();
        assert_relative_eq!(z.rate(), 0.03, epsilon = 1e-14);

        let at_reference = curve
            .zero_rate_t(0.0, Compounding::Continuous, Frequency::Annual, false)
            .unwrap();
        assert_relative_eq!(at_reference.rate(), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_flat() {
        let curve = flat(0.025);
        let fwd = curve
            .forward_rate_t(1.0, 3.0, Compounding::Continuous, Frequency::Annual, false)
            .unwrap();
        assert_relative_eq!(fwd.rate(), 0.025, epsilon = 1e-14);

        let instant = curve
            .forward_rate_t(2.0, 2.0, Compounding::Continuous, Frequency::Annual, false)
            .unwrap();
        assert_relative_eq!(instant.rate(), 0.025, epsilon = 1e-10);
    }

    #[test]
    fn test_forward_rate_rejects_reversed_dates() {
        let curve = flat(0.02);
        let d1 = curve.reference.add_days(400);
        let d2 = curve.reference.add_days(200);
        let err = curve
            .forward_rate(
                d1,
                d2,
                DayCountConvention::Act365Fixed,
                Compounding::Simple,
                Frequency::Annual,
                false,
            )
            .unwrap_err();
        assert!(matches!(err, CurveError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_par_rate_matches_annual_compounding() {
        // On a flat continuous curve the annual par rate is e^r - 1 for
        // evenly spaced unit periods.
        let curve = flat(0.04);
        let times = [0.0, 1.0, 2.0, 3.0];
        let par = curve.par_rate_t(&times, Frequency::Annual, false).unwrap();
        assert_relative_eq!(par, 0.04f64.exp() - 1.0, epsilon = 1e-14);

        assert!(curve.par_rate_t(&[1.0], Frequency::Annual, false).is_err());
        assert!(curve.par_rate_t(&times, Frequency::Once, false).is_err());
    }

    #[test]
    fn test_par_rate_tenor_builds_dates() {
        let curve = flat(0.03);
        let par = curve
            .par_rate_tenor(2, curve.reference, Frequency::SemiAnnual, false)
            .unwrap();
        assert!(par > 0.029 && par < 0.031);
        assert!(curve
            .par_rate_tenor(2, curve.reference, Frequency::Weekly, false)
            .is_err());
    }

    #[test]
    fn test_check_range() {
        let curve = flat(0.03);
        assert!(matches!(
            curve.discount_t(10.5, false),
            Err(CurveError::ExtrapolationNotAllowed { .. })
        ));
        assert!(curve.discount_t(10.5, true).is_ok());
        assert!(matches!(
            curve.discount_t(-0.1, true),
            Err(CurveError::InvalidTime { .. })
        ));
        assert!(curve.discount_t(10.0 + 1e-15, false).is_ok());
    }
}
