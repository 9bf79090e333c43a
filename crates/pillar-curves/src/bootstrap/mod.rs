//! Curve bootstrap algorithms.
//!
//! A bootstrap turns a sorted set of rate helpers into curve nodes, one
//! node per helper pillar.
//!
//! # Bootstrap Traits
//!
//! The quantity stored on the nodes is chosen by a [`BootstrapTrait`]:
//!
//! | Trait          | Node value              | Node 0 |
//! |----------------|-------------------------|--------|
//! | [`Discount`]   | discount factor         | 1.0    |
//! | [`ForwardRate`]| instantaneous forward   | anchor |
//! | [`ZeroYield`]  | continuous zero yield   | anchor |
//!
//! # Algorithm
//!
//! Segment `i` solves for the node value at the pillar of helper `i` so
//! that the helper reprices its quote on the curve made of nodes `0..=i`.
//! The solver brackets the root with the bounds of the trait and stops when
//! the quote error is within the configured accuracy. With a non-local
//! interpolation the whole set is re-swept until the node values settle.

mod sequential;
mod traits;
mod view;

pub(crate) use sequential::Bootstrapper;
pub use traits::{BootstrapTrait, Discount, ForwardRate, TraitKind, ZeroYield, AVERAGE_RATE};
pub use view::BootstrapCurve;
