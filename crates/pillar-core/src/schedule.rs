//! Coupon schedule generation.

use serde::{Deserialize, Serialize};

use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Period};

/// Direction in which regular dates are rolled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateGenerationRule {
    /// Roll back from the termination date; any stub sits at the front.
    #[default]
    Backward,
    /// Roll forward from the effective date; any stub sits at the back.
    Forward,
}

/// An ordered sequence of adjusted accrual dates.
///
/// Regular dates are computed from the anchor (termination for
/// `Backward`, effective for `Forward`) as whole multiples of the tenor,
/// so month-end days do not drift.
///
/// # Example
///
/// ```rust
/// use pillar_core::calendars::{BusinessDayConvention, WeekendCalendar};
/// use pillar_core::schedule::{DateGenerationRule, Schedule};
/// use pillar_core::types::{Date, Period};
///
/// let schedule = Schedule::generate(
///     Date::from_ymd(2025, 1, 15).unwrap(),
///     Date::from_ymd(2026, 1, 15).unwrap(),
///     Period::months(6),
///     &WeekendCalendar,
///     BusinessDayConvention::ModifiedFollowing,
///     DateGenerationRule::Backward,
/// )
/// .unwrap();
/// assert_eq!(schedule.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<Date>,
    tenor: Period,
}

impl Schedule {
    /// Generates a schedule between `effective` and `termination`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ScheduleError` if the dates are not ordered or
    /// the tenor is not positive.
    pub fn generate(
        effective: Date,
        termination: Date,
        tenor: Period,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
        rule: DateGenerationRule,
    ) -> CoreResult<Self> {
        if effective >= termination {
            return Err(CoreError::schedule_error(format!(
                "effective date {effective} must precede termination date {termination}"
            )));
        }
        if tenor.length() <= 0 {
            return Err(CoreError::schedule_error(format!(
                "tenor must be positive: {tenor}"
            )));
        }

        let mut unadjusted = Vec::new();
        match rule {
            DateGenerationRule::Backward => {
                unadjusted.push(termination);
                let mut k = 1;
                loop {
                    let date = termination.add_period(tenor.times(-k))?;
                    if date <= effective {
                        break;
                    }
                    unadjusted.push(date);
                    k += 1;
                }
                unadjusted.push(effective);
                unadjusted.reverse();
            }
            DateGenerationRule::Forward => {
                unadjusted.push(effective);
                let mut k = 1;
                loop {
                    let date = effective.add_period(tenor.times(k))?;
                    if date >= termination {
                        break;
                    }
                    unadjusted.push(date);
                    k += 1;
                }
                unadjusted.push(termination);
            }
        }

        let mut dates: Vec<Date> = Vec::with_capacity(unadjusted.len());
        for date in unadjusted {
            let adjusted = calendar.adjust(date, convention);
            if dates.last().map_or(true, |last| adjusted > *last) {
                dates.push(adjusted);
            }
        }

        if dates.len() < 2 {
            return Err(CoreError::schedule_error(
                "schedule collapsed to a single date after adjustment",
            ));
        }

        Ok(Self { dates, tenor })
    }

    /// Returns the adjusted dates, start and end included.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates (periods + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the schedule has no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First (adjusted effective) date.
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.dates[0]
    }

    /// Last (adjusted termination) date.
    #[must_use]
    pub fn end_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Tenor used to generate the schedule.
    #[must_use]
    pub fn tenor(&self) -> Period {
        self.tenor
    }

    /// Iterates over accrual periods as `(start, end)` pairs.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }
}
