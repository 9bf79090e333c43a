//! # Pillar Curves
//!
//! Piecewise yield curves bootstrapped from market instruments.
//!
//! This crate provides:
//!
//! - **Curve Trait**: the [`Curve`] read interface (discounts, zero, forward and par rates)
//! - **Rate Helpers**: deposits, FRAs, futures and swaps as bootstrap targets
//! - **Bootstrap Traits**: discount factors, instantaneous forwards or zero yields on the nodes
//! - **Piecewise Curve**: a lazy curve that re-bootstraps when its quotes change
//! - **Jumps**: turn-of-year style discount jumps
//! - **Repricing**: a report of every helper against the finished curve
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pillar_curves::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 15)?;
//! let deposit = DepositRateHelper::new(
//!     QuoteHandle::from(SimpleQuote::new(0.02)),
//!     today,
//!     Date::from_ymd(2025, 4, 15)?,
//!     DayCountConvention::Act360,
//! )?;
//! let swap = SwapRateHelper::builder(
//!     QuoteHandle::from(SimpleQuote::new(0.025)),
//!     today,
//!     Period::years(1),
//! )
//! .build()?;
//!
//! let curve = PiecewiseYieldCurve::builder(today)
//!     .add_helper(deposit)
//!     .add_helper(swap)
//!     .build()?;
//!
//! let df = curve.discount(Date::from_ymd(2025, 10, 15)?, false)?;
//! assert!(curve.repricing_report()?.all_passed());
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
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::similar_names)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod helpers;
pub mod interpolation;
pub mod jumps;
pub mod piecewise;
pub mod repricing;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{
        BootstrapCurve, BootstrapTrait, Discount, ForwardRate, TraitKind, ZeroYield,
    };
    pub use crate::config::{BootstrapConfig, CurveConfig};
    pub use crate::error::{CurveError, CurveResult, ErrorKind};
    pub use crate::helpers::{
        DepositRateHelper, FraRateHelper, FuturesRateHelper, RateHelper, SwapRateHelper,
        SwapRateHelperBuilder,
    };
    pub use crate::interpolation::InterpolationMethod;
    pub use crate::jumps::JumpOverlay;
    pub use crate::piecewise::{PiecewiseYieldCurve, PiecewiseYieldCurveBuilder, ReferenceDate};
    pub use crate::repricing::{RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;

    pub use pillar_core::prelude::*;
    pub use pillar_math::solvers::{
        BisectionSolver, BrentSolver, NewtonSolver, SecantSolver, Solver, SolverConfig,
    };
}

pub use error::{CurveError, CurveResult};
pub use piecewise::{PiecewiseYieldCurve, PiecewiseYieldCurveBuilder, ReferenceDate};
pub use traits::Curve;
