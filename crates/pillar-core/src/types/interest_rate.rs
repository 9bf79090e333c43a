//! Interest rate with its quoting conventions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Compounding, Date, Frequency};
use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};

/// An interest rate together with the conventions needed to interpret it.
///
/// The rate converts between a year fraction `t` and a compound factor
/// `c(t)` according to its compounding rule:
///
/// | Compounding | `c(t)` |
/// |---|---|
/// | Simple | `1 + r t` |
/// | Compounded | `(1 + r/f)^(f t)` |
/// | Continuous | `exp(r t)` |
/// | SimpleThenCompounded | simple for `t <= 1/f`, compounded otherwise |
///
/// # Example
///
/// ```rust
/// use pillar_core::daycounts::DayCountConvention;
/// use pillar_core::types::{Compounding, Frequency, InterestRate};
///
/// let r = InterestRate::new(0.05, DayCountConvention::Act365Fixed, Compounding::Continuous, Frequency::Annual);
/// let annual = r.equivalent_rate(Compounding::Compounded, Frequency::Annual, 1.0).unwrap();
/// assert!((annual.rate() - (0.05f64.exp() - 1.0)).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    rate: f64,
    day_count: DayCountConvention,
    compounding: Compounding,
    frequency: Frequency,
}

impl InterestRate {
    /// Creates a new interest rate.
    #[must_use]
    pub fn new(
        rate: f64,
        day_count: DayCountConvention,
        compounding: Compounding,
        frequency: Frequency,
    ) -> Self {
        Self {
            rate,
            day_count,
            compounding,
            frequency,
        }
    }

    /// Returns the rate value.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the compounding rule.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Returns the compounding frequency.
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Compound factor `c(t)` for a year fraction `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is negative or the frequency is unusable
    /// for the compounding rule.
    pub fn compound_factor(&self, t: f64) -> CoreResult<f64> {
        if t < 0.0 {
            return Err(CoreError::invalid_input(format!("negative time: {t}")));
        }
        let r = self.rate;
        match self.compounding {
            Compounding::Simple => Ok(1.0 + r * t),
            Compounding::Continuous => Ok((r * t).exp()),
            Compounding::Compounded => {
                let f = periods(self.frequency)?;
                Ok((1.0 + r / f).powf(f * t))
            }
            Compounding::SimpleThenCompounded => {
                let f = periods(self.frequency)?;
                if t <= 1.0 / f {
                    Ok(1.0 + r * t)
                } else {
                    Ok((1.0 + r / f).powf(f * t))
                }
            }
        }
    }

    /// Compound factor between two dates using the rate's day count.
    pub fn compound_factor_between(&self, start: Date, end: Date) -> CoreResult<f64> {
        let t = self.day_count.to_day_count().year_fraction_f64(start, end);
        self.compound_factor(t)
    }

    /// Discount factor `1 / c(t)`.
    pub fn discount_factor(&self, t: f64) -> CoreResult<f64> {
        Ok(1.0 / self.compound_factor(t)?)
    }

    /// Rate implied by a compound factor over a year fraction `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `compound` is not positive, `t` is not positive,
    /// or the frequency is unusable for the compounding rule.
    pub fn implied_rate(
        compound: f64,
        day_count: DayCountConvention,
        compounding: Compounding,
        frequency: Frequency,
        t: f64,
    ) -> CoreResult<Self> {
        if compound <= 0.0 {
            return Err(CoreError::invalid_input(format!(
                "positive compound factor required: {compound}"
            )));
        }
        if t <= 0.0 {
            return Err(CoreError::invalid_input(format!(
                "positive time required: {t}"
            )));
        }

        let rate = if (compound - 1.0).abs() < f64::EPSILON {
            0.0
        } else {
            match compounding {
                Compounding::Simple => (compound - 1.0) / t,
                Compounding::Continuous => compound.ln() / t,
                Compounding::Compounded => {
                    let f = periods(frequency)?;
                    (compound.powf(1.0 / (f * t)) - 1.0) * f
                }
                Compounding::SimpleThenCompounded => {
                    let f = periods(frequency)?;
                    if t <= 1.0 / f {
                        (compound - 1.0) / t
                    } else {
                        (compound.powf(1.0 / (f * t)) - 1.0) * f
                    }
                }
            }
        };

        Ok(Self::new(rate, day_count, compounding, frequency))
    }

    /// Equivalent rate under different compounding over a year fraction `t`.
    pub fn equivalent_rate(
        &self,
        compounding: Compounding,
        frequency: Frequency,
        t: f64,
    ) -> CoreResult<Self> {
        let compound = self.compound_factor(t)?;
        Self::implied_rate(compound, self.day_count, compounding, frequency, t)
    }
}

fn periods(frequency: Frequency) -> CoreResult<f64> {
    match frequency.periods_per_year() {
        0 => Err(CoreError::invalid_input(format!(
            "frequency {frequency} not allowed for compounded rates"
        ))),
        n => Ok(f64::from(n)),
    }
}

impl fmt::Display for InterestRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} % {}", self.rate * 100.0, self.day_count)?;
        match self.compounding {
            Compounding::Simple | Compounding::Continuous => write!(f, " {}", self.compounding),
            Compounding::Compounded => write!(f, " {} compounding", self.frequency),
            Compounding::SimpleThenCompounded => write!(
                f,
                " simple compounding up to one period, then {} compounding",
                self.frequency
            ),
        }
    }
}
