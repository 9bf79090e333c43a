//! Repricing of the bootstrap helpers against the finished curve.
//!
//! A bootstrapped curve must give back every quote it was built from, to
//! within the bootstrap accuracy. [`RepricingReport`] records the check for
//! each helper.

use std::fmt;

use pillar_core::types::Date;

use crate::error::CurveResult;
use crate::helpers::RateHelper;
use crate::traits::Curve;

/// Result of repricing one helper.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Helper description
    pub description: String,

    /// Pillar date of the helper
    pub pillar: Date,

    /// Observed market quote
    pub quote: f64,

    /// Quote implied by the curve
    pub implied: f64,

    /// Absolute error `|implied − quote|`
    pub error: f64,

    /// Whether the error is within the tolerance
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check from observed and implied quotes.
    #[must_use]
    pub fn new(
        description: String,
        pillar: Date,
        quote: f64,
        implied: f64,
        tolerance: f64,
    ) -> Self {
        let error = (implied - quote).abs();
        Self {
            description,
            pillar,
            quote,
            implied,
            error,
            passed: error <= tolerance,
        }
    }

    /// Reprices `helper` on `curve`.
    pub fn from_helper(
        helper: &dyn RateHelper,
        curve: &dyn Curve,
        tolerance: f64,
    ) -> CurveResult<Self> {
        Ok(Self::new(
            helper.description(),
            helper.pillar_date(),
            helper.quote().value()?,
            helper.implied_quote(curve)?,
            tolerance,
        ))
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "✓" } else { "✗" };
        write!(
            f,
            "{} {} | pillar {} | quote {:.8} | implied {:.8} | error {:.2e}",
            status, self.description, self.pillar, self.quote, self.implied, self.error
        )
    }
}

/// Repricing checks for every helper of a curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    accuracy: f64,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>, accuracy: f64) -> Self {
        Self { checks, accuracy }
    }

    /// The individual checks, in pillar order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Tolerance the checks were made with.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Returns true if every helper repriced within tolerance.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Largest absolute error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0_f64, f64::max)
    }

    /// Checks outside tolerance.
    #[must_use]
    pub fn failed(&self) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Repricing report: {}/{} within {:.0e} (max error {:.2e})",
            self.checks.len() - self.failed().len(),
            self.checks.len(),
            self.accuracy,
            self.max_error()
        )?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(error: f64) -> RepricingCheck {
        RepricingCheck::new(
            "Deposit".into(),
            Date::from_ymd(2025, 4, 15).unwrap(),
            0.02,
            0.02 + error,
            1e-12,
        )
    }

    #[test]
    fn test_report_summary() {
        let report = RepricingReport::new(vec![check(0.0), check(5e-13), check(3e-9)], 1e-12);
        assert!(!report.all_passed());
        assert_eq!(report.failed().len(), 1);
        assert!((report.max_error() - 3e-9).abs() < 1e-15);

        let text = report.to_string();
        assert!(text.contains("2/3"));
        assert!(text.contains("✗"));
    }

    #[test]
    fn test_empty_report_passes() {
        let report = RepricingReport::new(vec![], 1e-12);
        assert!(report.all_passed());
        assert_eq!(report.max_error(), 0.0);
    }
}
