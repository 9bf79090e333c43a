//! 30/360 US (Bond Basis) day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::types::Date;

/// 30/360 US day count convention.
///
/// Every month counts as 30 days and the year as 360 days.
///
/// - If D1 is 31, change D1 to 30
/// - If D2 is 31 and D1 is 30 or 31, change D2 to 30
///
/// $$\text{Days} = 360(Y_2-Y_1) + 30(M_2-M_1) + (D_2-D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCount for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        Decimal::from(self.day_count(start, end)) / Decimal::from(360)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        let years = i64::from(end.year() - start.year());
        let months = i64::from(end.month()) - i64::from(start.month());

        360 * years + 30 * months + (d2 - d1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty360_half_year() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 1, 15).unwrap();
        let end = Date::from_ymd(2025, 7, 15).unwrap();
        assert_eq!(dc.day_count(start, end), 180);
        assert_eq!(dc.year_fraction(start, end), dec!(0.5));
    }

    #[test]
    fn test_thirty360_month_end_rule() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 1, 31).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_eq!(dc.day_count(start, end), 60);
    }

    #[test]
    fn test_thirty360_d2_kept_when_d1_short() {
        let dc = Thirty360;
        let start = Date::from_ymd(2025, 3, 15).unwrap();
        let end = Date::from_ymd(2025, 3, 31).unwrap();
        assert_eq!(dc.day_count(start, end), 16);
    }
}
