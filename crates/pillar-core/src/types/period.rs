//! Tenors and time units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Unit of a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Calendar days
    Days,
    /// Weeks (7 calendar days)
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

/// A tenor such as `3M` or `10Y`.
///
/// Parses the usual market shorthand, including the money-market
/// aliases `ON`, `TN` and `SN`.
///
/// ```rust
/// use pillar_core::types::{Period, TimeUnit};
///
/// let p: Period = "18M".parse().unwrap();
/// assert_eq!(p, Period::new(18, TimeUnit::Months));
/// assert_eq!(p.to_string(), "18M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    length: i32,
    unit: TimeUnit,
}

impl Period {
    /// Creates a new period.
    #[must_use]
    pub const fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Period of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// Period of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// Period of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// Period of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Returns the length in units.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Returns the period expressed in months, if it is month-based.
    #[must_use]
    pub fn total_months(&self) -> Option<i32> {
        match self.unit {
            TimeUnit::Months => Some(self.length),
            TimeUnit::Years => Some(self.length * 12),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }

    /// Returns true for day- or week-based periods.
    #[must_use]
    pub fn is_short(&self) -> bool {
        matches!(self.unit, TimeUnit::Days | TimeUnit::Weeks)
    }

    /// Returns the same period repeated `factor` times.
    #[must_use]
    pub const fn times(&self, factor: i32) -> Self {
        Self::new(self.length * factor, self.unit)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y',
        };
        write!(f, "{}{suffix}", self.length)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tenor = s.trim().to_uppercase();

        match tenor.as_str() {
            "ON" | "O/N" => return Ok(Self::days(1)),
            "TN" | "T/N" => return Ok(Self::days(2)),
            "SN" | "S/N" => return Ok(Self::days(3)),
            _ => {}
        }

        let Some(last) = tenor.chars().last() else {
            return Err(CoreError::invalid_period("empty tenor"));
        };
        let unit = match last {
            'D' => TimeUnit::Days,
            'W' => TimeUnit::Weeks,
            'M' => TimeUnit::Months,
            'Y' => TimeUnit::Years,
            _ => return Err(CoreError::invalid_period(format!("unknown unit in '{s}'"))),
        };

        let num_str = &tenor[..tenor.len() - 1];
        let length: i32 = num_str
            .parse()
            .map_err(|_| CoreError::invalid_period(format!("invalid length in '{s}'")))?;

        Ok(Self::new(length, unit))
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
