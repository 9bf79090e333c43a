//! Domain types for curve construction.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`Period`]: Tenors such as `3M` or `10Y`
//! - [`Frequency`], [`Compounding`]: Rate quoting conventions
//! - [`InterestRate`]: A rate with its day count and compounding

mod date;
mod frequency;
mod interest_rate;
mod period;

pub use date::Date;
pub use frequency::{Compounding, Frequency};
pub use interest_rate::InterestRate;
pub use period::{Period, TimeUnit};
