//! # Pillar Math
//!
//! Numerical building blocks for the Pillar curve bootstrapping library.
//!
//! This crate provides:
//!
//! - **Solvers**: One-dimensional root finders behind the [`Solver`](solvers::Solver) trait
//! - **Interpolation**: Node interpolators with value, derivative and primitive
//! - **Linear Algebra**: Tridiagonal systems for spline construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        BackwardFlatInterpolator, CubicSpline, Interpolator, LinearInterpolator,
        LogLinearInterpolator,
    };
    pub use crate::solvers::{
        bisection, brent, newton_raphson, newton_raphson_numerical, secant, BisectionSolver,
        BrentSolver, NewtonSolver, SecantSolver, Solver, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
