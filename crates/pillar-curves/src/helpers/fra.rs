//! Forward rate agreement helper.

use pillar_core::calendars::{BusinessDayConvention, Calendar};
use pillar_core::daycounts::DayCountConvention;
use pillar_core::quotes::QuoteHandle;
use pillar_core::types::{Date, Period};

use super::{check_dates, simple_forward, RateHelper};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// An FRA quoted as the simple forward rate over its accrual period.
#[derive(Debug, Clone)]
pub struct FraRateHelper {
    quote: QuoteHandle,
    start: Date,
    end: Date,
    day_count: DayCountConvention,
    year_fraction: f64,
}

impl FraRateHelper {
    /// Creates an FRA over explicit accrual dates.
    ///
    /// # Errors
    ///
    /// `InvalidHelper` unless `start < end`, so equal dates are rejected.
    pub fn new(
        quote: QuoteHandle,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        check_dates("FRA", start, end)?;
        Ok(Self {
            quote,
            start,
            end,
            day_count,
            year_fraction: day_count.year_fraction(start, end),
        })
    }

    /// Creates a `months_to_start` x `months_to_end` FRA off `spot`.
    pub fn from_months(
        quote: QuoteHandle,
        spot: Date,
        months_to_start: u32,
        months_to_end: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if months_to_end <= months_to_start {
            return Err(CurveError::invalid_helper(format!(
                "FRA {months_to_start}x{months_to_end}: end must be after start"
            )));
        }
        let start = calendar.advance(spot, Period::months(months_to_start as i32), convention, false)?;
        let end = calendar.advance(
            start,
            Period::months((months_to_end - months_to_start) as i32),
            convention,
            false,
        )?;
        Self::new(quote, start, end, day_count)
    }
}

impl RateHelper for FraRateHelper {
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
        format!("FRA {} {} -> {}", self.day_count, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::test_support::FlatCurve;
    use approx::assert_relative_eq;
    use pillar_core::calendars::WeekendCalendar;
    use pillar_core::quotes::SimpleQuote;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_3x6_dates_and_forward() {
        let spot = d(2025, 1, 15);
        let fra = FraRateHelper::from_months(
            QuoteHandle::from(SimpleQuote::new(0.03)),
            spot,
            3,
            6,
            &WeekendCalendar,
            BusinessDayConvention::ModifiedFollowing,
            DayCountConvention::Act360,
        )
        .unwrap();
        assert_eq!(fra.earliest_date(), d(2025, 4, 15));
        assert_eq!(fra.latest_date(), d(2025, 7, 15));

        let curve = FlatCurve::new(spot, 0.03);
        let t1 = 90.0 / 365.0;
        let t2 = 181.0 / 365.0;
        let tau = 91.0 / 360.0;
        let expected = ((0.03_f64 * (t2 - t1)).exp() - 1.0) / tau;
        assert_relative_eq!(fra.implied_quote(&curve).unwrap(), expected, epsilon = 1e-13);
    }

    #[test]
    fn test_rejects_empty_period() {
        let err = FraRateHelper::from_months(
            QuoteHandle::from(SimpleQuote::new(0.03)),
            d(2025, 1, 15),
            6,
            6,
            &WeekendCalendar,
            BusinessDayConvention::Following,
            DayCountConvention::Act360,
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::InvalidHelper { .. }));
    }
}
