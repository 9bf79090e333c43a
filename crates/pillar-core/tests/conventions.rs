//! Integration tests for dates, conventions and quote plumbing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use pillar_core::prelude::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

// ============================================================================
// Day counts
// ============================================================================

#[test]
fn test_reference_year_fractions() {
    use pillar_core::daycounts::{Act360, Act365Fixed, ActActIsda, Thirty360};

    assert_eq!(Act360.year_fraction(d(2025, 1, 1), d(2025, 4, 1)), dec!(0.25));
    assert_eq!(Act365Fixed.year_fraction(d(2025, 1, 1), d(2026, 1, 1)), dec!(1));
    assert_eq!(Thirty360.year_fraction(d(2025, 1, 31), d(2025, 4, 30)), dec!(0.25));

    let isda = ActActIsda.year_fraction_f64(d(2024, 7, 1), d(2025, 7, 1));
    assert_relative_eq!(isda, 184.0 / 366.0 + 181.0 / 365.0, epsilon = 1e-12);
}

#[test]
fn test_swap_leg_accruals_sum_to_tenor() {
    let schedule = Schedule::generate(
        d(2025, 1, 15),
        d(2030, 1, 15),
        Period::years(1),
        &NullCalendar,
        BusinessDayConvention::Unadjusted,
        DateGenerationRule::Backward,
    )
    .unwrap();
    let total: f64 = schedule
        .periods()
        .map(|(s, e)| DayCountConvention::Thirty360.year_fraction(s, e))
        .sum();
    assert_relative_eq!(total, 5.0, epsilon = 1e-12);
}

// ============================================================================
// Quotes and observers
// ============================================================================

struct Tally(AtomicUsize);

impl Observer for Tally {
    fn update(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_quote_and_evaluation_date_share_observer() {
    let tally = Arc::new(Tally(AtomicUsize::new(0)));
    let observer: Arc<dyn Observer> = tally.clone();

    let quote = SimpleQuote::new(0.02);
    let handle = QuoteHandle::from(quote.clone());
    handle.register_observer(Arc::downgrade(&observer));

    let today = EvaluationDate::new(d(2025, 1, 2));
    today.register_observer(Arc::downgrade(&observer));

    quote.set_value(0.021);
    today.set(d(2025, 1, 3));
    assert_eq!(tally.0.load(Ordering::SeqCst), 2);

    drop(observer);
    drop(tally);
    quote.set_value(0.022);
    assert_eq!(quote.observable().observer_count(), 0);
}

#[test]
fn test_empty_handle_registration_is_noop() {
    let tally: Arc<dyn Observer> = Arc::new(Tally(AtomicUsize::new(0)));
    let handle = QuoteHandle::empty();
    handle.register_observer(Arc::downgrade(&tally));
    assert!(handle.is_empty());
    assert_eq!(handle.value(), Err(CoreError::EmptyHandle));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_year_fraction_antisymmetric(a in 0i64..20_000, b in 0i64..20_000) {
        let base = d(2000, 1, 1);
        let (x, y) = (base.add_days(a), base.add_days(b));
        for dc in [DayCountConvention::Act360, DayCountConvention::Act365Fixed] {
            let fwd = dc.year_fraction(x, y);
            let back = dc.year_fraction(y, x);
            prop_assert!((fwd + back).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_adjusted_dates_are_business_days(offset in 0i64..3_000) {
        let date = d(2020, 1, 1).add_days(offset);
        for bdc in [
            BusinessDayConvention::Following,
            BusinessDayConvention::ModifiedFollowing,
            BusinessDayConvention::Preceding,
            BusinessDayConvention::ModifiedPreceding,
        ] {
            let adjusted = WeekendCalendar.adjust(date, bdc);
            prop_assert!(WeekendCalendar.is_business_day(adjusted));
            prop_assert!((adjusted - date).abs() <= 3);
        }
    }
}
