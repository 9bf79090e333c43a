//! Money market deposit helper.

use pillar_core::calendars::{BusinessDayConvention, Calendar};
use pillar_core::daycounts::DayCountConvention;
use pillar_core::quotes::QuoteHandle;
use pillar_core::types::{Date, Period};

use super::{check_dates, simple_forward, RateHelper};
use crate::error::CurveResult;
use crate::traits::Curve;

/// A deposit quoted as a simple rate.
///
/// # Pricing Formula
///
/// ```text
/// r = (P(start) / P(end) − 1) / τ(start, end)
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let helper = DepositRateHelper::from_tenor(
///     QuoteHandle::from(SimpleQuote::new(0.0525)),
///     today, Period::months(3), 2,
///     &WeekendCalendar, BusinessDayConvention::ModifiedFollowing,
///     DayCountConvention::Act360,
/// )?;
/// ```
#[derive(Debug, Clone)]
pub struct DepositRateHelper {
    quote: QuoteHandle,
    start: Date,
    end: Date,
    day_count: DayCountConvention,
    year_fraction: f64,
}

impl DepositRateHelper {
    /// Creates a deposit between explicit dates.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidHelper`](crate::CurveError::InvalidHelper)
    /// unless `start < end`. A same-day deposit has no accrual and is
    /// rejected too.
    pub fn new(
        quote: QuoteHandle,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        check_dates("deposit", start, end)?;
        Ok(Self {
            quote,
            start,
            end,
            day_count,
            year_fraction: day_count.year_fraction(start, end),
        })
    }

    /// Creates a deposit starting `fixing_days` business days after
    /// `reference` and running for `tenor`.
    pub fn from_tenor(
        quote: QuoteHandle,
        reference: Date,
        tenor: Period,
        fixing_days: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let start = calendar.advance_business_days(reference, fixing_days as i32);
        let end = calendar.advance(start, tenor, convention, false)?;
        Self::new(quote, start, end, day_count)
    }

    /// Value date of the deposit.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start
    }

    /// Maturity of the deposit.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end
    }

    /// Accrual fraction of the deposit.
    #[must_use]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }
}

impl RateHelper for DepositRateHelper {
    fn quote(&self) -> &QuoteHandle {
        &self.quote
    }

    fn earliest_date(&self) -> Date {
        self.start
    }

    fn latest_date(&self) -> Date {
        self.end
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        simple_forward(curve, self.start, self.end, self.year_fraction)
    }

    fn description(&self) -> String {
        format!("Deposit {} {} -> {}", self.day_count, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;
    use crate::helpers::test_support::FlatCurve;
    use approx::assert_relative_eq;
    use pillar_core::calendars::WeekendCalendar;
    use pillar_core::quotes::SimpleQuote;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_implied_rate_on_flat_curve() {
        let reference = d(2025, 1, 15);
        let curve = FlatCurve::new(reference, 0.03);
        let helper = DepositRateHelper::new(
            QuoteHandle::from(SimpleQuote::new(0.03)),
            reference,
            d(2025, 7, 15),
            DayCountConvention::Act365Fixed,
        )
        .unwrap();

        let tau = 181.0 / 365.0;
        let expected = ((0.03_f64 * tau).exp() - 1.0) / tau;
        assert_relative_eq!(helper.implied_quote(&curve).unwrap(), expected, epsilon = 1e-14);
        assert_relative_eq!(
            helper.quote_error(&curve).unwrap(),
            expected - 0.03,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_from_tenor_rolls_dates() {
        // Friday 2025-01-17 + 2 business days = Tuesday 2025-01-21
        let helper = DepositRateHelper::from_tenor(
            QuoteHandle::from(SimpleQuote::new(0.02)),
            d(2025, 1, 17),
            Period::months(3),
            2,
            &WeekendCalendar,
            BusinessDayConvention::ModifiedFollowing,
            DayCountConvention::Act360,
        )
        .unwrap();
        assert_eq!(helper.earliest_date(), d(2025, 1, 21));
        assert_eq!(helper.pillar_date(), d(2025, 4, 21));
    }

    #[test]
    fn test_rejects_inverted_dates() {
        let err = DepositRateHelper::new(
            QuoteHandle::from(SimpleQuote::new(0.02)),
            d(2025, 4, 1),
            d(2025, 1, 1),
            DayCountConvention::Act360,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_rejects_same_day_deposit() {
        let err = DepositRateHelper::new(
            QuoteHandle::from(SimpleQuote::new(0.02)),
            d(2025, 4, 1),
            d(2025, 4, 1),
            DayCountConvention::Act360,
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::InvalidHelper { .. }));
    }

    #[test]
    fn test_empty_quote_is_domain_error() {
        let reference = d(2025, 1, 15);
        let helper = DepositRateHelper::new(
            QuoteHandle::empty(),
            reference,
            d(2025, 4, 15),
            DayCountConvention::Act360,
        )
        .unwrap();
        let err = helper
            .quote_error(&FlatCurve::new(reference, 0.02))
            .unwrap_err();
        assert!(err.is_domain());
    }
}
