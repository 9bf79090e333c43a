//! Rate helpers: market instruments the curve is bootstrapped from.
//!
//! A helper knows its quote and how to compute the same quote from a
//! candidate curve. The bootstrap drives `quote_error` to zero segment by
//! segment, so a helper must be priceable from the nodes up to its own
//! pillar date.
//!
//! # Supported Instruments
//!
//! | Helper | Quote | Typical tenors |
//! |--------|-------|----------------|
//! | [`DepositRateHelper`] | simple rate | ON to 12M |
//! | [`FraRateHelper`] | simple forward rate | 1x4 to 12x24 |
//! | [`FuturesRateHelper`] | price `100·(1 − rate)` | first two years |
//! | [`SwapRateHelper`] | fair fixed rate | 2Y to 50Y |

mod deposit;
mod fra;
mod futures;
mod swap;

pub use deposit::DepositRateHelper;
pub use fra::FraRateHelper;
pub use futures::FuturesRateHelper;
pub use swap::{SwapRateHelper, SwapRateHelperBuilder};

use std::fmt;
use std::sync::Weak;

use pillar_core::observer::Observer;
use pillar_core::quotes::QuoteHandle;
use pillar_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A market instrument used as a bootstrap target.
pub trait RateHelper: Send + Sync + fmt::Debug {
    /// The observed market quote.
    fn quote(&self) -> &QuoteHandle;

    /// First date whose discount factor the helper reads.
    fn earliest_date(&self) -> Date;

    /// Last date whose discount factor the helper reads.
    fn latest_date(&self) -> Date;

    /// Date of the curve node this helper determines.
    fn pillar_date(&self) -> Date {
        self.latest_date()
    }

    /// Quote implied by `curve`.
    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64>;

    /// `implied_quote − quote`.
    fn quote_error(&self, curve: &dyn Curve) -> CurveResult<f64> {
        Ok(self.implied_quote(curve)? - self.quote().value()?)
    }

    /// Subscribes `observer` to every quote the helper reads.
    fn register_observer(&self, observer: &Weak<dyn Observer>) {
        self.quote().register_observer(observer.clone());
    }

    /// Short human-readable description.
    fn description(&self) -> String;
}

/// Checks the date order shared by all helpers.
///
/// Equal dates are rejected as well as inverted ones: they leave a zero
/// accrual period.
pub(crate) fn check_dates(kind: &str, earliest: Date, latest: Date) -> CurveResult<()> {
    if earliest >= latest {
        return Err(CurveError::invalid_helper(format!(
            "{kind} earliest date {earliest} is not before latest date {latest}"
        )));
    }
    Ok(())
}

/// Simple forward rate over `[start, end]`.
pub(crate) fn simple_forward(
    curve: &dyn Curve,
    start: Date,
    end: Date,
    year_fraction: f64,
) -> CurveResult<f64> {
    let ratio = curve.discount(start, false)? / curve.discount(end, false)?;
    Ok((ratio - 1.0) / year_fraction)
}

#[cfg(test)]
pub(crate) mod test_support {
    use pillar_core::daycounts::DayCountConvention;
    use pillar_core::types::Date;

    use crate::error::CurveResult;
    use crate::traits::{check_time, Curve};

    /// Flat continuously compounded ACT/365F curve.
    pub struct FlatCurve {
        pub reference: Date,
        pub rate: f64,
    }

    impl FlatCurve {
        pub fn new(reference: Date, rate: f64) -> Self {
            Self { reference, rate }
        }
    }

    impl Curve for FlatCurve {
        fn reference_date(&self) -> Date {
            self.reference
        }

        fn day_count(&self) -> DayCountConvention {
            DayCountConvention::Act365Fixed
        }

        fn max_date(&self) -> CurveResult<Date> {
            Ok(self.reference.add_days(365 * 60))
        }

        fn max_time(&self) -> CurveResult<f64> {
            Ok(60.0)
        }

        fn discount_t(&self, t: f64, extrapolate: bool) -> CurveResult<f64> {
            check_time(t, 60.0, extrapolate)?;
            Ok((-self.rate * t).exp())
        }
    }
}
