//! Vanilla interest rate swap helper.

use std::fmt;
use std::sync::{Arc, Weak};

use pillar_core::calendars::{BusinessDayConvention, Calendar, WeekendCalendar};
use pillar_core::daycounts::DayCountConvention;
use pillar_core::observer::Observer;
use pillar_core::quotes::QuoteHandle;
use pillar_core::schedule::{DateGenerationRule, Schedule};
use pillar_core::types::{Date, Frequency, Period};
use pillar_core::CoreError;

use super::{check_dates, RateHelper};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Accrual period with its year fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Accrual {
    start: Date,
    end: Date,
    tau: f64,
}

fn accruals(schedule: &Schedule, day_count: DayCountConvention) -> Vec<Accrual> {
    schedule
        .periods()
        .map(|(start, end)| Accrual {
            start,
            end,
            tau: day_count.year_fraction(start, end),
        })
        .collect()
}

/// A fixed-vs-floating swap quoted as its fair fixed rate.
///
/// # Pricing Formula
///
/// ```text
///        Σⱼ τⱼ Fⱼ P(eⱼ) + s · Σⱼ τⱼ P(eⱼ)
/// rate = ────────────────────────────────
///               Σᵢ τᵢ P(pᵢ)
/// ```
///
/// with `i` over fixed periods paying at `pᵢ`, `j` over floating periods
/// ending at `eⱼ`, `Fⱼ` the simple forward of period `j` and `s` the
/// optional floating spread.
///
/// # Example
///
/// ```rust,ignore
/// let swap = SwapRateHelper::builder(quote, spot, Period::years(5))
///     .fixed_frequency(Frequency::SemiAnnual)
///     .fixed_day_count(DayCountConvention::Thirty360)
///     .float_tenor(Period::months(3))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SwapRateHelper {
    quote: QuoteHandle,
    spread: Option<QuoteHandle>,
    tenor: Period,
    fixed: Vec<Accrual>,
    floating: Vec<Accrual>,
    start: Date,
    latest: Date,
}

impl SwapRateHelper {
    /// Starts a builder for a `tenor` swap settling on `settlement`.
    #[must_use]
    pub fn builder(quote: QuoteHandle, settlement: Date, tenor: Period) -> SwapRateHelperBuilder {
        SwapRateHelperBuilder::new(quote, settlement, tenor)
    }

    /// Swap start date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start
    }

    /// Fixed leg payment dates.
    #[must_use]
    pub fn fixed_payment_dates(&self) -> Vec<Date> {
        self.fixed.iter().map(|a| a.end).collect()
    }

    /// Floating leg period end dates.
    #[must_use]
    pub fn floating_payment_dates(&self) -> Vec<Date> {
        self.floating.iter().map(|a| a.end).collect()
    }

    fn spread_value(&self) -> CurveResult<f64> {
        match &self.spread {
            Some(handle) => Ok(handle.value()?),
            None => Ok(0.0),
        }
    }
}

impl RateHelper for SwapRateHelper {
    fn quote(&self) -> &QuoteHandle {
        &self.quote
    }

    fn earliest_date(&self) -> Date {
        self.start
    }

    fn latest_date(&self) -> Date {
        self.latest
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let mut annuity = 0.0;
        for period in &self.fixed {
            annuity += period.tau * curve.discount(period.end, false)?;
        }

        let mut floating = 0.0;
        let mut spread_annuity = 0.0;
        for period in &self.floating {
            let end = curve.discount(period.end, false)?;
            let forward = (curve.discount(period.start, false)? / end - 1.0) / period.tau;
            floating += period.tau * forward * end;
            spread_annuity += period.tau * end;
        }

        let spread = self.spread_value()?;
        Ok((floating + spread * spread_annuity) / annuity)
    }

    fn register_observer(&self, observer: &Weak<dyn Observer>) {
        self.quote.register_observer(observer.clone());
        if let Some(spread) = &self.spread {
            spread.register_observer(observer.clone());
        }
    }

    fn description(&self) -> String {
        format!("Swap {} {} -> {}", self.tenor, self.start, self.latest)
    }
}

/// Builder for [`SwapRateHelper`].
///
/// Defaults: annual 30/360 fixed leg, 3M ACT/360 floating leg, Modified
/// Following on a weekend-only calendar, spot start, no spread.
pub struct SwapRateHelperBuilder {
    quote: QuoteHandle,
    settlement: Date,
    tenor: Period,
    calendar: Arc<dyn Calendar>,
    fixed_frequency: Frequency,
    fixed_convention: BusinessDayConvention,
    fixed_day_count: DayCountConvention,
    float_tenor: Period,
    float_convention: BusinessDayConvention,
    float_day_count: DayCountConvention,
    spread: Option<QuoteHandle>,
    forward_start: Period,
}

impl SwapRateHelperBuilder {
    fn new(quote: QuoteHandle, settlement: Date, tenor: Period) -> Self {
        Self {
            quote,
            settlement,
            tenor,
            calendar: Arc::new(WeekendCalendar),
            fixed_frequency: Frequency::Annual,
            fixed_convention: BusinessDayConvention::ModifiedFollowing,
            fixed_day_count: DayCountConvention::Thirty360,
            float_tenor: Period::months(3),
            float_convention: BusinessDayConvention::ModifiedFollowing,
            float_day_count: DayCountConvention::Act360,
            spread: None,
            forward_start: Period::days(0),
        }
    }

    /// Sets the calendar for both legs.
    #[must_use]
    pub fn calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the fixed leg payment frequency.
    #[must_use]
    pub fn fixed_frequency(mut self, frequency: Frequency) -> Self {
        self.fixed_frequency = frequency;
        self
    }

    /// Sets the fixed leg business day convention.
    #[must_use]
    pub fn fixed_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.fixed_convention = convention;
        self
    }

    /// Sets the fixed leg day count.
    #[must_use]
    pub fn fixed_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.fixed_day_count = day_count;
        self
    }

    /// Sets the floating index tenor.
    #[must_use]
    pub fn float_tenor(mut self, tenor: Period) -> Self {
        self.float_tenor = tenor;
        self
    }

    /// Sets the floating leg business day convention.
    #[must_use]
    pub fn float_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.float_convention = convention;
        self
    }

    /// Sets the floating leg day count.
    #[must_use]
    pub fn float_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.float_day_count = day_count;
        self
    }

    /// Adds a spread paid over the floating rate.
    #[must_use]
    pub fn spread(mut self, spread: QuoteHandle) -> Self {
        self.spread = Some(spread);
        self
    }

    /// Delays the start by `period` after settlement.
    #[must_use]
    pub fn forward_start(mut self, period: Period) -> Self {
        self.forward_start = period;
        self
    }

    /// Generates both schedules and builds the helper.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidHelper`] for a fixed frequency without
    /// a regular period, for schedules that cannot be generated, or when the
    /// start is not strictly before the maturity.
    pub fn build(self) -> CurveResult<SwapRateHelper> {
        let calendar = self.calendar.as_ref();
        let start = if self.forward_start.length() == 0 {
            self.settlement
        } else {
            calendar.advance(
                self.settlement,
                self.forward_start,
                self.float_convention,
                false,
            )?
        };
        let maturity = start.add_period(self.tenor)?;

        let fixed_period = self.fixed_frequency.period().ok_or_else(|| {
            CurveError::invalid_helper(format!(
                "swap fixed frequency {} has no regular period",
                self.fixed_frequency
            ))
        })?;
        let schedule_error =
            |e: CoreError| CurveError::invalid_helper(format!("swap {}: {e}", self.tenor));

        let fixed = Schedule::generate(
            start,
            maturity,
            fixed_period,
            calendar,
            self.fixed_convention,
            DateGenerationRule::Backward,
        )
        .map_err(schedule_error)?;
        let floating = Schedule::generate(
            start,
            maturity,
            self.float_tenor,
            calendar,
            self.float_convention,
            DateGenerationRule::Backward,
        )
        .map_err(schedule_error)?;

        let earliest = fixed.start_date().min(floating.start_date());
        let latest = fixed.end_date().max(floating.end_date());
        check_dates("swap", earliest, latest)?;

        Ok(SwapRateHelper {
            fixed: accruals(&fixed, self.fixed_day_count),
            floating: accruals(&floating, self.float_day_count),
            quote: self.quote,
            spread: self.spread,
            tenor: self.tenor,
            start: earliest,
            latest,
        })
    }
}

impl fmt::Debug for SwapRateHelperBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapRateHelperBuilder")
            .field("settlement", &self.settlement)
            .field("tenor", &self.tenor)
            .field("calendar", &self.calendar.name())
            .field("fixed_frequency", &self.fixed_frequency)
            .field("float_tenor", &self.float_tenor)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::FlatCurve;
    use approx::assert_relative_eq;
    use pillar_core::calendars::NullCalendar;
    use pillar_core::quotes::SimpleQuote;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn quote(v: f64) -> QuoteHandle {
        QuoteHandle::from(SimpleQuote::new(v))
    }

    #[test]
    fn test_schedules() {
        let swap = SwapRateHelper::builder(quote(0.03), d(2025, 1, 15), Period::years(2))
            .fixed_frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        assert_eq!(swap.fixed_payment_dates().len(), 4);
        assert_eq!(swap.floating_payment_dates().len(), 8);
        assert_eq!(swap.earliest_date(), d(2025, 1, 15));
        assert_eq!(swap.pillar_date(), d(2027, 1, 15));
    }

    #[test]
    fn test_floating_leg_telescopes() {
        // Same-curve projection: the floating leg is P(start) - P(end)
        let reference = d(2025, 1, 15);
        let curve = FlatCurve::new(reference, 0.04);
        let swap = SwapRateHelper::builder(quote(0.04), reference, Period::years(3))
            .calendar(Arc::new(NullCalendar))
            .fixed_day_count(DayCountConvention::Act365Fixed)
            .build()
            .unwrap();

        let dates = swap.fixed_payment_dates();
        let mut expected_annuity = 0.0;
        let mut previous = reference;
        for date in &dates {
            let tau = DayCountConvention::Act365Fixed.year_fraction(previous, *date);
            expected_annuity += tau * curve.discount(*date, false).unwrap();
            previous = *date;
        }
        let end = *dates.last().unwrap();
        let expected = (1.0 - curve.discount(end, false).unwrap()) / expected_annuity;
        assert_relative_eq!(swap.implied_quote(&curve).unwrap(), expected, epsilon = 1e-14);
    }

    #[test]
    fn test_spread_adds_to_rate() {
        let reference = d(2025, 1, 15);
        let curve = FlatCurve::new(reference, 0.03);
        let plain = SwapRateHelper::builder(quote(0.03), reference, Period::years(2))
            .build()
            .unwrap();
        let spread_quote = SimpleQuote::new(0.001);
        let spread = SwapRateHelper::builder(quote(0.03), reference, Period::years(2))
            .spread(QuoteHandle::from(spread_quote))
            .build()
            .unwrap();
        let diff = spread.implied_quote(&curve).unwrap() - plain.implied_quote(&curve).unwrap();
        // ACT/360 quarterly accruals against an annual 30/360 annuity
        assert!(diff > 0.001 && diff < 0.00105, "diff = {diff}");
    }

    #[test]
    fn test_forward_start() {
        let swap = SwapRateHelper::builder(quote(0.03), d(2025, 1, 15), Period::years(1))
            .forward_start(Period::months(6))
            .build()
            .unwrap();
        assert_eq!(swap.earliest_date(), d(2025, 7, 15));
        assert_eq!(swap.latest_date(), d(2026, 7, 15));
    }

    #[test]
    fn test_once_frequency_rejected() {
        let err = SwapRateHelper::builder(quote(0.03), d(2025, 1, 15), Period::years(1))
            .fixed_frequency(Frequency::Once)
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
