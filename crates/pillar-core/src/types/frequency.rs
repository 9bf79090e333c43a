//! Frequency and compounding types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Period;

/// Payment or compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Single payment at maturity
    Once,
    /// Annual payments (1 per year)
    #[default]
    Annual,
    /// Semi-annual payments (2 per year)
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Bimonthly payments (6 per year)
    Bimonthly,
    /// Monthly payments (12 per year)
    Monthly,
    /// Weekly payments (52 per year)
    Weekly,
    /// Daily payments (365 per year)
    Daily,
}

impl Frequency {
    /// Returns the number of periods per year.
    ///
    /// `Once` returns 0.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Once => 0,
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Bimonthly => 6,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
            Frequency::Daily => 365,
        }
    }

    /// Returns the period between two payments, if the frequency is regular.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        match self {
            Frequency::Once => None,
            Frequency::Annual => Some(Period::years(1)),
            Frequency::SemiAnnual => Some(Period::months(6)),
            Frequency::Quarterly => Some(Period::months(3)),
            Frequency::Bimonthly => Some(Period::months(2)),
            Frequency::Monthly => Some(Period::months(1)),
            Frequency::Weekly => Some(Period::weeks(1)),
            Frequency::Daily => Some(Period::days(1)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Once => "once",
            Frequency::Annual => "annual",
            Frequency::SemiAnnual => "semiannual",
            Frequency::Quarterly => "quarterly",
            Frequency::Bimonthly => "bimonthly",
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
            Frequency::Daily => "daily",
        };
        write!(f, "{name}")
    }
}

/// Interest compounding rule.
///
/// Combined with a [`Frequency`] for the `Compounded` and
/// `SimpleThenCompounded` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Simple interest: `1 + r t`
    Simple,
    /// Periodic compounding: `(1 + r/f)^(f t)`
    Compounded,
    /// Continuous compounding: `exp(r t)`
    #[default]
    Continuous,
    /// Simple up to one period, compounded beyond
    SimpleThenCompounded,
}

impl Compounding {
    /// Returns true if the rule needs a frequency.
    #[must_use]
    pub fn needs_frequency(&self) -> bool {
        matches!(
            self,
            Compounding::Compounded | Compounding::SimpleThenCompounded
        )
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compounding::Simple => "simple compounding",
            Compounding::Compounded => "compounded",
            Compounding::Continuous => "continuous compounding",
            Compounding::SimpleThenCompounded => "simple-then-compounded",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_periods() {
        assert_eq!(Frequency::Once.periods_per_year(), 0);
        assert_eq!(Frequency::Annual.periods_per_year(), 1);
        assert_eq!(Frequency::SemiAnnual.periods_per_year(), 2);
        assert_eq!(Frequency::Quarterly.periods_per_year(), 4);
        assert_eq!(Frequency::Monthly.periods_per_year(), 12);
    }

    #[test]
    fn test_frequency_period() {
        assert_eq!(Frequency::Quarterly.period(), Some(Period::months(3)));
        assert_eq!(Frequency::Annual.period(), Some(Period::years(1)));
        assert_eq!(Frequency::Once.period(), None);
    }

    #[test]
    fn test_needs_frequency() {
        assert!(Compounding::Compounded.needs_frequency());
        assert!(!Compounding::Continuous.needs_frequency());
    }
}
