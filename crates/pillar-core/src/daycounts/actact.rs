//! Actual/Actual ISDA day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// Splits the period by calendar year, dividing each portion by the length
/// of its own year.
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl ActActIsda {
    fn positive_fraction(start: Date, end: Date) -> Decimal {
        let mut total = Decimal::ZERO;
        let mut current = start;

        while current.year() < end.year() {
            let next_year = match Date::from_ymd(current.year() + 1, 1, 1) {
                Ok(d) => d,
                Err(_) => break,
            };
            let days = current.days_between(&next_year);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
            current = next_year;
        }

        if current < end {
            let days = current.days_between(&end);
            total += Decimal::from(days) / Decimal::from(current.days_in_year());
        }

        total
    }
}

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        if start == end {
            Decimal::ZERO
        } else if start < end {
            Self::positive_fraction(start, end)
        } else {
            -Self::positive_fraction(end, start)
        }
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_actact_across_leap_boundary() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2023, 12, 1).unwrap();
        let end = Date::from_ymd(2024, 2, 1).unwrap();

        // 31 days in 2023, 31 days in 2024
        let expected = dec!(31) / dec!(365) + dec!(31) / dec!(366);
        assert_eq!(dc.year_fraction(start, end), expected);
    }

    #[test]
    fn test_actact_full_calendar_year_is_one() {
        let dc = ActActIsda;
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(dc.year_fraction(start, end), Decimal::ONE);
    }

    #[test]
    fn test_actact_antisymmetric() {
        let dc = ActActIsda;
        let a = Date::from_ymd(2023, 3, 10).unwrap();
        let b = Date::from_ymd(2025, 8, 20).unwrap();
        assert_eq!(dc.year_fraction(a, b), -dc.year_fraction(b, a));
    }
}
