//! Interest rate futures helper.

use std::sync::Weak;

use pillar_core::calendars::{BusinessDayConvention, Calendar};
use pillar_core::daycounts::DayCountConvention;
use pillar_core::observer::Observer;
use pillar_core::quotes::QuoteHandle;
use pillar_core::types::{Date, Period};

use super::{check_dates, simple_forward, RateHelper};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A rate future quoted as a price.
///
/// # Pricing Formula
///
/// ```text
/// price = 100 · (1 − (F + ca))
/// ```
///
/// where `F` is the simple forward over the contract period and `ca` the
/// optional convexity adjustment.
#[derive(Debug, Clone)]
pub struct FuturesRateHelper {
    price: QuoteHandle,
    convexity: Option<QuoteHandle>,
    start: Date,
    end: Date,
    year_fraction: f64,
}

impl FuturesRateHelper {
    /// Creates a future on the `months`-month rate starting at `start`.
    pub fn new(
        price: QuoteHandle,
        start: Date,
        months: u32,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        day_count: DayCountConvention,
        convexity: Option<QuoteHandle>,
    ) -> CurveResult<Self> {
        let end = calendar.advance(start, Period::months(months as i32), convention, false)?;
        Self::between(price, start, end, day_count, convexity)
    }

    /// Creates a future over explicit contract dates.
    ///
    /// # Errors
    ///
    /// `InvalidHelper` unless `start < end`, so equal dates are rejected.
    pub fn between(
        price: QuoteHandle,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
        convexity: Option<QuoteHandle>,
    ) -> CurveResult<Self> {
        check_dates("futures", start, end)?;
        Ok(Self {
            price,
            convexity,
            start,
            end,
            year_fraction: day_count.year_fraction(start, end),
        })
    }

    /// Current convexity adjustment, zero when none was given.
    ///
    /// # Errors
    ///
    /// `InvalidQuote` when the linked adjustment is negative.
    pub fn convexity_adjustment(&self) -> CurveResult<f64> {
        let Some(handle) = &self.convexity else {
            return Ok(0.0);
        };
        let adjustment = handle.value()?;
        if adjustment < 0.0 {
            return Err(CurveError::InvalidQuote {
                reason: format!("negative futures convexity adjustment {adjustment}"),
            });
        }
        Ok(adjustment)
    }
}

impl RateHelper for FuturesRateHelper {
    fn quote(&self) -> &QuoteHandle {
        &self.price
    }

    fn earliest_date(&self) -> Date {
        self.start
    }

    fn latest_date(&self) -> Date {
        self.end
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let forward = simple_forward(curve, self.start, self.end, self.year_fraction)?;
        Ok(100.0 * (1.0 - (forward + self.convexity_adjustment()?)))
    }

    fn register_observer(&self, observer: &Weak<dyn Observer>) {
        self.price.register_observer(observer.clone());
        if let Some(convexity) = &self.convexity {
            convexity.register_observer(observer.clone());
        }
    }

    fn description(&self) -> String {
        format!("Future {} -> {}", self.start, self.end)
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

    fn future(convexity: Option<QuoteHandle>) -> FuturesRateHelper {
        FuturesRateHelper::new(
            QuoteHandle::from(SimpleQuote::new(97.0)),
            d(2025, 3, 19),
            3,
            &WeekendCalendar,
            BusinessDayConvention::ModifiedFollowing,
            DayCountConvention::Act360,
            convexity,
        )
        .unwrap()
    }

    #[test]
    fn test_price_from_forward() {
        let curve = FlatCurve::new(d(2025, 1, 15), 0.03);
        let helper = future(None);
        assert_eq!(helper.latest_date(), d(2025, 6, 19));

        let forward = simple_forward(&curve, d(2025, 3, 19), d(2025, 6, 19), 92.0 / 360.0).unwrap();
        assert_relative_eq!(
            helper.implied_quote(&curve).unwrap(),
            100.0 * (1.0 - forward),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_convexity_lowers_price() {
        let curve = FlatCurve::new(d(2025, 1, 15), 0.03);
        let plain = future(None).implied_quote(&curve).unwrap();
        let adjusted = future(Some(QuoteHandle::from(SimpleQuote::new(0.0005))))
            .implied_quote(&curve)
            .unwrap();
        assert_relative_eq!(plain - adjusted, 0.05, epsilon = 1e-10);

        let negative = future(Some(QuoteHandle::from(SimpleQuote::new(-0.001))));
        let err = negative.implied_quote(&curve).unwrap_err();
        assert!(matches!(err, CurveError::InvalidQuote { .. }));
        assert!(err.is_domain());
    }
}
