//! # Pillar Core
//!
//! Core types and market plumbing for the Pillar curve bootstrapping library.
//!
//! - **Types**: `Date`, `Period`, `Frequency`, `Compounding`, `InterestRate`
//! - **Day Count Conventions**: year fractions for helpers and curve time
//! - **Calendars**: business day calendars, adjustment rules and schedules
//! - **Quotes**: observable market values behind relinkable handles
//!
//! ## Example
//!
//! ```rust
//! use pillar_core::prelude::*;
//!
//! let quote = SimpleQuote::new(0.02);
//! let handle = QuoteHandle::from(quote.clone());
//! quote.set_value(0.021);
//! assert_eq!(handle.value().unwrap(), 0.021);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod observer;
pub mod quotes;
pub mod schedule;
pub mod settings;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BusinessDayConvention, Calendar, HolidayCalendar, NullCalendar, WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::observer::{Observable, Observer};
    pub use crate::quotes::{Quote, QuoteHandle, SimpleQuote};
    pub use crate::schedule::{DateGenerationRule, Schedule};
    pub use crate::settings::EvaluationDate;
    pub use crate::types::{Compounding, Date, Frequency, InterestRate, Period, TimeUnit};
}

pub use error::{CoreError, CoreResult};
pub use types::Date;
