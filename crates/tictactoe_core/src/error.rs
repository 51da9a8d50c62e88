//! Error taxonomy for game state and move acquisition.

use crate::types::{Coordinate, Mark};
use derive_more::{Display, Error, From};
use std::time::Duration;
use tracing::instrument;

/// Which half of a coordinate failed the range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Axis {
    /// Row component.
    #[strum(serialize = "<ROW>")]
    Row,
    /// Column component.
    #[strum(serialize = "<COL>")]
    Col,
}

/// Why a proposed move was rejected by [`crate::GameState::validate`].
///
/// Checks run in declaration order and the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvalidMoveError {
    /// The proposal did not hold exactly two values.
    #[display(
        "Invalid move. Must be in the format (<ROW>, <COL>), got {} value(s)",
        arity
    )]
    MalformedCoordinate {
        /// How many values were proposed.
        arity: usize,
    },

    /// Row or column outside `1..=3`.
    #[display("Invalid move. {} must be between 1 and 3 inclusive, got {}", axis, value)]
    OutOfRange {
        /// Offending component.
        axis: Axis,
        /// Value that was proposed.
        value: i64,
    },

    /// Target cell already holds a mark.
    #[display("Invalid move. Square {} is already occupied by {}", coordinate, occupant)]
    CellOccupied {
        /// Target cell.
        coordinate: Coordinate,
        /// Mark already there.
        occupant: Mark,
    },
}

impl std::error::Error for InvalidMoveError {}

/// Failure of a move source to deliver a parseable candidate.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SourceError {
    /// Text could not be read as a list of integers.
    #[display("Could not parse a move from {:?}", input)]
    Unparsable {
        /// The offending text.
        input: String,
    },

    /// The underlying channel (terminal, completion service) failed.
    #[display("Move source unavailable: {}", message)]
    Unavailable {
        /// What went wrong.
        message: String,
    },

    /// The source did not answer in time.
    #[display("Move source timed out after {:?}", after)]
    TimedOut {
        /// Configured limit.
        after: Duration,
    },
}

impl std::error::Error for SourceError {}

impl SourceError {
    /// Shorthand for [`SourceError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// A single failed acquisition attempt. Every variant is retry-eligible.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum AttemptError {
    /// The source failed or produced unparsable text.
    #[display("{}", _0)]
    Source(SourceError),
    /// The candidate parsed but is not a legal move.
    #[display("{}", _0)]
    Invalid(InvalidMoveError),
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Source(e) => Some(e),
            AttemptError::Invalid(e) => Some(e),
        }
    }
}

/// Every attempt allowed for one move failed. Fatal to the current game.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(
    "{} could not produce a legal move in {} attempt(s): {}",
    mark,
    attempts,
    last_error
)]
pub struct AcquisitionExhausted {
    /// Mark that was on move.
    pub mark: Mark,
    /// Attempts made, equal to the configured limit.
    pub attempts: u32,
    /// Reason the final attempt failed.
    pub last_error: AttemptError,
}

impl std::error::Error for AcquisitionExhausted {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// A mark outside the two-symbol domain was supplied during setup.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid mark {:?}. Must be either X or O.", input)]
pub struct MarkError {
    /// Text that was supplied.
    pub input: String,
}

impl MarkError {
    /// Creates a new mark error.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Invalid game setup (retry limit, mark pairing).
#[derive(Debug, Clone, Display, Error)]
#[display("Setup error: {} at {}:{}", message, file, line)]
pub struct SetupError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SetupError {
    /// Creates a new setup error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        tracing::error!(error_message = %message, "Setup error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
