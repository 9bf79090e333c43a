//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and date rolling
//! - Business day adjustment conventions
//! - Weekend-only, null and explicit-holiday calendars

use std::collections::BTreeSet;

mod conventions;

pub use conventions::BusinessDayConvention;

use crate::error::CoreResult;
use crate::types::{Date, Period, TimeUnit};

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// Zero days rolls forward to the next business day.
    fn advance_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        if days == 0 {
            return self.adjust(result, BusinessDayConvention::Following);
        }

        let mut remaining = days.abs();
        let direction: i64 = if days > 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Advances a date by a period.
    ///
    /// Day periods count business days. Longer periods move the calendar
    /// date and then adjust it. With `end_of_month` set, a date on the last
    /// business day of its month stays on the last business day.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> CoreResult<Date> {
        match period.unit() {
            TimeUnit::Days => Ok(self.advance_business_days(date, period.length())),
            TimeUnit::Weeks => Ok(self.adjust(date.add_period(period)?, convention)),
            TimeUnit::Months | TimeUnit::Years => {
                let moved = date.add_period(period)?;
                if end_of_month && self.is_end_of_month(date) {
                    let eom = moved.end_of_month();
                    return Ok(self.adjust(eom, BusinessDayConvention::Preceding));
                }
                Ok(self.adjust(moved, convention))
            }
        }
    }

    /// Returns true if the date is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> bool {
        let next = self.advance_business_days(date, 1);
        next.month() != date.month()
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// A calendar in which every day is a business day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }
}

/// Weekends plus an explicit set of holidays.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    name: String,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a named calendar from a list of holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Adds a holiday.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Removes a holiday.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(&date);
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(!cal.is_business_day(d(2025, 1, 5)));
    }

    #[test]
    fn test_advance_business_days() {
        let cal = WeekendCalendar;
        assert_eq!(cal.advance_business_days(d(2025, 1, 3), 1), d(2025, 1, 6));
        assert_eq!(cal.advance_business_days(d(2025, 1, 6), -1), d(2025, 1, 3));
        assert_eq!(cal.advance_business_days(d(2025, 1, 4), 0), d(2025, 1, 6));
    }

    #[test]
    fn test_holiday_calendar() {
        let cal = HolidayCalendar::new("Test", [d(2025, 12, 25), d(2026, 1, 1)]);
        assert!(!cal.is_business_day(d(2025, 12, 25)));
        assert_eq!(cal.advance_business_days(d(2025, 12, 24), 1), d(2025, 12, 26));
        assert_eq!(cal.name(), "Test");
    }

    #[test]
    fn test_advance_months_modified_following() {
        let cal = WeekendCalendar;
        // 2025-05-31 is a Saturday; modified following rolls back to Friday
        let result = cal
            .advance(
                d(2025, 3, 31),
                Period::months(2),
                BusinessDayConvention::ModifiedFollowing,
                false,
            )
            .unwrap();
        assert_eq!(result, d(2025, 5, 30));
    }

    #[test]
    fn test_advance_end_of_month() {
        let cal = WeekendCalendar;
        // 2025-02-28 is the last business day of February
        let result = cal
            .advance(
                d(2025, 2, 28),
                Period::months(1),
                BusinessDayConvention::ModifiedFollowing,
                true,
            )
            .unwrap();
        assert_eq!(result, d(2025, 3, 31));
    }

    #[test]
    fn test_null_calendar() {
        let cal = NullCalendar;
        assert!(cal.is_business_day(d(2025, 1, 4)));
        assert_eq!(cal.advance_business_days(d(2025, 1, 4), 2), d(2025, 1, 6));
    }
}
