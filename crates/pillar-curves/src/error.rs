//! Error types for curve construction and queries.
//!
//! Every variant belongs to one [`ErrorKind`]: configuration problems are
//! detected before any solving starts, convergence problems name the
//! segment that failed, and domain problems come from queries or market
//! data that the curve cannot honour.

use pillar_core::{CoreError, Date};
use pillar_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Broad classification of a [`CurveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid curve setup: instruments, jumps, interpolation or config.
    Configuration,
    /// A bootstrap segment could not be solved.
    Convergence,
    /// A query or a market value outside what the curve supports.
    Domain,
    /// Unexpected failure in a lower layer.
    Internal,
}

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough instruments to build a curve.
    #[error("Insufficient instruments: need at least {required}, got {got}")]
    InsufficientInstruments {
        /// Minimum number of instruments.
        required: usize,
        /// Number of instruments supplied.
        got: usize,
    },

    /// Two instruments share a pillar date.
    #[error("More than one instrument with pillar date {date}")]
    DuplicatePillar {
        /// The shared pillar date.
        date: Date,
    },

    /// A pillar does not lie after the previous node of the curve.
    #[error("Pillar {date} (t = {time:.6}) is not after the previous node (t = {previous:.6})")]
    NonIncreasingPillar {
        /// The offending pillar date.
        date: Date,
        /// Its time from the reference date.
        time: f64,
        /// Time of the previous node.
        previous: f64,
    },

    /// The number of jump dates does not match the number of jumps.
    #[error("Mismatch between number of jumps ({jumps}) and jump dates ({dates})")]
    JumpCountMismatch {
        /// Number of jump quotes.
        jumps: usize,
        /// Number of jump dates.
        dates: usize,
    },

    /// The interpolation cannot be used with the bootstrap trait.
    #[error("{interpolation} interpolation is not supported on {quantity}")]
    UnsupportedInterpolation {
        /// Quantity stored on the nodes.
        quantity: String,
        /// Requested interpolation.
        interpolation: String,
    },

    /// A rate helper was constructed with inconsistent inputs.
    #[error("Invalid helper: {reason}")]
    InvalidHelper {
        /// Description of the problem.
        reason: String,
    },

    /// A configuration value is out of range or could not be parsed.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// A bootstrap segment failed to bracket or converge.
    #[error(
        "Bootstrap failed at segment {segment} (pillar {pillar}) after {iterations} iterations \
         (residual: {residual:.2e}): {reason}"
    )]
    BootstrapFailure {
        /// One-based index of the segment.
        segment: usize,
        /// Pillar date of the segment.
        pillar: Date,
        /// Last known residual.
        residual: f64,
        /// Iterations used by the solver.
        iterations: u32,
        /// Description of the failure.
        reason: String,
    },

    /// A query beyond the last node without extrapolation enabled.
    #[error("Time {t:.6} is past the curve's max time {max_time:.6} and extrapolation is off")]
    ExtrapolationNotAllowed {
        /// The requested time.
        t: f64,
        /// The curve's last node time.
        max_time: f64,
    },

    /// A time before the reference date, or not a number.
    #[error("Invalid time {t}: must be finite and non-negative")]
    InvalidTime {
        /// The requested time.
        t: f64,
    },

    /// A date range given in the wrong order.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Start date.
        start: Date,
        /// End date.
        end: Date,
    },

    /// A jump quote outside `(0, 1]`.
    #[error("Invalid jump #{index}: value {value} is not in (0, 1]")]
    InvalidJump {
        /// One-based jump index.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A quote handle without a linked quote.
    #[error("Empty quote handle")]
    EmptyHandle,

    /// A linked quote without a usable value.
    #[error("Invalid quote: {reason}")]
    InvalidQuote {
        /// Description of the problem.
        reason: String,
    },

    /// Invalid arguments to a curve query.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem.
        reason: String,
    },

    /// Error from the math layer.
    #[error("Math error: {source}")]
    Math {
        /// The underlying error.
        source: MathError,
    },

    /// Error from the core layer.
    #[error("Core error: {source}")]
    Core {
        /// The underlying error.
        source: CoreError,
    },
}

impl CurveError {
    /// Creates a duplicate pillar error.
    #[must_use]
    pub fn duplicate_pillar(date: Date) -> Self {
        Self::DuplicatePillar { date }
    }

    /// Creates an invalid helper error.
    #[must_use]
    pub fn invalid_helper(reason: impl Into<String>) -> Self {
        Self::InvalidHelper {
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported interpolation error.
    #[must_use]
    pub fn unsupported_interpolation(
        quantity: impl Into<String>,
        interpolation: impl Into<String>,
    ) -> Self {
        Self::UnsupportedInterpolation {
            quantity: quantity.into(),
            interpolation: interpolation.into(),
        }
    }

    /// Creates a bootstrap failure error.
    #[must_use]
    pub fn bootstrap_failed(
        segment: usize,
        pillar: Date,
        residual: f64,
        iterations: u32,
        reason: impl Into<String>,
    ) -> Self {
        Self::BootstrapFailure {
            segment,
            pillar,
            residual,
            iterations,
            reason: reason.into(),
        }
    }

    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientInstruments { .. }
            | Self::DuplicatePillar { .. }
            | Self::NonIncreasingPillar { .. }
            | Self::JumpCountMismatch { .. }
            | Self::UnsupportedInterpolation { .. }
            | Self::InvalidHelper { .. }
            | Self::InvalidConfig { .. } => ErrorKind::Configuration,
            Self::BootstrapFailure { .. } => ErrorKind::Convergence,
            Self::ExtrapolationNotAllowed { .. }
            | Self::InvalidTime { .. }
            | Self::InvalidDateRange { .. }
            | Self::InvalidJump { .. }
            | Self::EmptyHandle
            | Self::InvalidQuote { .. }
            | Self::InvalidInput { .. }
            | Self::Core { .. } => ErrorKind::Domain,
            Self::Math { .. } => ErrorKind::Internal,
        }
    }

    /// Returns true for configuration errors.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Returns true for convergence errors.
    #[must_use]
    pub fn is_convergence(&self) -> bool {
        self.kind() == ErrorKind::Convergence
    }

    /// Returns true for domain errors.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

impl From<MathError> for CurveError {
    fn from(source: MathError) -> Self {
        Self::Math { source }
    }
}

impl From<CoreError> for CurveError {
    fn from(source: CoreError) -> Self {
        match source {
            CoreError::EmptyHandle => Self::EmptyHandle,
            CoreError::InvalidQuote { reason } => Self::InvalidQuote { reason },
            other => Self::Core { source: other },
        }
    }
}
