//! Discount jumps such as turn-of-year effects.
//!
//! A jump multiplies every discount factor past its date by its value.

use std::sync::Weak;

use pillar_core::daycounts::DayCountConvention;
use pillar_core::observer::Observer;
use pillar_core::quotes::QuoteHandle;
use pillar_core::types::Date;

use crate::error::{CurveError, CurveResult};

/// Jump quotes with the dates and times they apply at.
#[derive(Debug, Clone, Default)]
pub struct JumpOverlay {
    quotes: Vec<QuoteHandle>,
    explicit_dates: Option<Vec<Date>>,
    dates: Vec<Date>,
    times: Vec<f64>,
    reference_date: Option<Date>,
}

impl JumpOverlay {
    /// Creates an overlay without jumps.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an overlay from jump quotes and optional dates.
    ///
    /// With no dates, jump `i` falls on December 31st of the reference
    /// year plus `i`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::JumpCountMismatch`] when dates are given and
    /// their number differs from the number of quotes.
    pub fn new(quotes: Vec<QuoteHandle>, dates: Vec<Date>) -> CurveResult<Self> {
        let explicit_dates = if dates.is_empty() {
            None
        } else {
            if dates.len() != quotes.len() {
                return Err(CurveError::JumpCountMismatch {
                    jumps: quotes.len(),
                    dates: dates.len(),
                });
            }
            Some(dates)
        };
        Ok(Self {
            quotes,
            explicit_dates,
            dates: Vec::new(),
            times: Vec::new(),
            reference_date: None,
        })
    }

    /// Number of jumps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if there are no jumps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Jump dates for the last reference date set.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Jump times for the last reference date set.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Reference date the jump times were computed for.
    #[must_use]
    pub fn reference_date(&self) -> Option<Date> {
        self.reference_date
    }

    /// Recomputes jump dates and times for `reference_date`.
    ///
    /// Returns false when the times were already computed for this date.
    ///
    /// # Errors
    ///
    /// Fails if a default jump date cannot be represented.
    pub fn set_jumps(
        &mut self,
        reference_date: Date,
        day_count: DayCountConvention,
    ) -> CurveResult<bool> {
        if self.reference_date == Some(reference_date) {
            return Ok(false);
        }
        let dates = match &self.explicit_dates {
            Some(dates) => dates.clone(),
            None => (0..self.quotes.len())
                .map(|i| Date::from_ymd(reference_date.year() + i as i32, 12, 31))
                .collect::<Result<Vec<_>, _>>()?,
        };
        self.times = dates
            .iter()
            .map(|d| day_count.year_fraction(reference_date, *d))
            .collect();
        self.dates = dates;
        self.reference_date = Some(reference_date);
        tracing::debug!(
            reference_date = %reference_date,
            jumps = self.quotes.len(),
            "jump times regenerated"
        );
        Ok(true)
    }

    /// Product of the jumps that fall strictly between the reference date and `t`.
    ///
    /// # Errors
    ///
    /// Fails on an empty handle, a quote without value, or a jump outside
    /// `(0, 1]`.
    pub fn factor(&self, t: f64) -> CurveResult<f64> {
        let mut factor = 1.0;
        for (i, (quote, time)) in self.quotes.iter().zip(&self.times).enumerate() {
            if *time > 0.0 && *time < t {
                factor *= jump_value(i, quote)?;
            }
        }
        Ok(factor)
    }

    /// Checks every jump value without applying it.
    pub fn validate(&self) -> CurveResult<()> {
        for (i, quote) in self.quotes.iter().enumerate() {
            jump_value(i, quote)?;
        }
        Ok(())
    }

    /// Subscribes `observer` to every jump quote.
    pub fn register_observer(&self, observer: &Weak<dyn Observer>) {
        for quote in &self.quotes {
            quote.register_observer(observer.clone());
        }
    }
}

fn jump_value(i: usize, quote: &QuoteHandle) -> CurveResult<f64> {
    let value = quote.value()?;
    if value <= 0.0 || value > 1.0 {
        return Err(CurveError::InvalidJump {
            index: i + 1,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pillar_core::quotes::SimpleQuote;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_default_dates_are_year_ends() {
        let quotes = vec![
            QuoteHandle::from(SimpleQuote::new(0.999)),
            QuoteHandle::from(SimpleQuote::new(0.998)),
        ];
        let mut jumps = JumpOverlay::new(quotes, vec![]).unwrap();
        assert!(jumps
            .set_jumps(d(2025, 6, 2), DayCountConvention::Act365Fixed)
            .unwrap());
        assert_eq!(jumps.dates(), &[d(2025, 12, 31), d(2026, 12, 31)]);
        assert_relative_eq!(jumps.times()[0], 212.0 / 365.0, epsilon = 1e-15);

        // Same reference date: nothing to do
        assert!(!jumps
            .set_jumps(d(2025, 6, 2), DayCountConvention::Act365Fixed)
            .unwrap());
    }

    #[test]
    fn test_count_mismatch() {
        let quotes = vec![QuoteHandle::from(SimpleQuote::new(0.999))];
        let err = JumpOverlay::new(quotes, vec![d(2025, 12, 31), d(2026, 12, 31)]).unwrap_err();
        assert_eq!(err, CurveError::JumpCountMismatch { jumps: 1, dates: 2 });
    }

    #[test]
    fn test_factor_uses_strict_inequality() {
        let quotes = vec![QuoteHandle::from(SimpleQuote::new(0.99))];
        let mut jumps = JumpOverlay::new(quotes, vec![d(2026, 1, 1)]).unwrap();
        jumps
            .set_jumps(d(2025, 1, 1), DayCountConvention::Act365Fixed)
            .unwrap();
        assert_eq!(jumps.factor(1.0).unwrap(), 1.0);
        assert_eq!(jumps.factor(1.0 + 1e-9).unwrap(), 0.99);
    }

    #[test]
    fn test_jump_bounds_are_enforced() {
        for bad in [0.0, -0.1, 1.0001] {
            let quotes = vec![QuoteHandle::from(SimpleQuote::new(bad))];
            let mut jumps = JumpOverlay::new(quotes, vec![]).unwrap();
            jumps
                .set_jumps(d(2025, 1, 1), DayCountConvention::Act365Fixed)
                .unwrap();
            let err = jumps.factor(2.0).unwrap_err();
            assert!(matches!(err, CurveError::InvalidJump { index: 1, .. }));
            assert!(err.is_domain());
        }

        let mut jumps = JumpOverlay::new(vec![QuoteHandle::empty()], vec![]).unwrap();
        jumps
            .set_jumps(d(2025, 1, 1), DayCountConvention::Act365Fixed)
            .unwrap();
        assert_eq!(jumps.validate().unwrap_err(), CurveError::EmptyHandle);
    }
}
