//! Tic-tac-toe game state and bounded-retry move acquisition.
//!
//! # Architecture
//!
//! - **GameState**: grid, move history, validation and terminal queries. It
//!   does not track turns.
//! - **Acquisition**: wraps any [`MoveSource`] with validation and a fixed
//!   attempt limit, yielding one legal [`Coordinate`] or
//!   [`AcquisitionExhausted`].
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{GameState, Mark, Outcome};
//!
//! let mut state = GameState::new();
//! let coordinate = state.validate(&[1, 1]).unwrap();
//! state.apply(Mark::X, coordinate).unwrap();
//! assert_eq!(state.snapshot().history.entries(), vec!["X: (1, 1)"]);
//! assert_eq!(state.outcome(Mark::X), Outcome::Ongoing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod acquisition;
mod error;
mod parse;
mod rules;
mod state;
mod types;

pub use acquisition::{Acquisition, DEFAULT_MAX_ATTEMPTS, MoveSource, RejectedAttempt};
pub use error::{
    AcquisitionExhausted, AttemptError, Axis, InvalidMoveError, MarkError, SetupError,
    SourceError,
};
pub use parse::parse_candidate;
pub use rules::{LINES, has_won, is_full, winner, winning_line};
pub use state::{GameState, Outcome, Snapshot};
pub use types::{Cell, Coordinate, Grid, History, Mark, Move, SIDE};
