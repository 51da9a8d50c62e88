//! Authoritative game state: grid, history and terminal queries.

use crate::error::{Axis, InvalidMoveError};
use crate::rules;
use crate::types::{Cell, Coordinate, Grid, History, Mark, Move, SIDE};
use serde::Serialize;
use tracing::{debug, instrument};

/// Verdict for a mark after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// The game continues.
    Ongoing,
    /// The mark completed a line.
    Win(Mark),
    /// Grid full, no line for the mark.
    Tie,
}

impl Outcome {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// Owned copy of the game state, safe to hand to move sources and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Copy of the grid.
    pub grid: Grid,
    /// Copy of the history.
    pub history: History,
}

/// Grid plus history of one game.
///
/// A passive validator: it does not know whose turn it is. Turn order belongs
/// to the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    history: History,
}

impl GameState {
    /// Creates an empty game.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a raw candidate and returns the coordinate it addresses.
    ///
    /// Arity is checked first, then row and column range, then occupancy.
    #[instrument(skip(self))]
    pub fn validate(&self, candidate: &[i64]) -> Result<Coordinate, InvalidMoveError> {
        let [row, col] = candidate else {
            return Err(InvalidMoveError::MalformedCoordinate {
                arity: candidate.len(),
            });
        };
        let row = in_range(*row, Axis::Row)?;
        let col = in_range(*col, Axis::Col)?;
        let coordinate = Coordinate::checked(row, col);
        self.check_empty(coordinate)?;
        Ok(coordinate)
    }

    /// Places `mark` at `coordinate` and records it in the history.
    ///
    /// Callers validate first; occupancy is re-checked so a stale coordinate
    /// can never overwrite a mark.
    #[instrument(skip(self))]
    pub fn apply(&mut self, mark: Mark, coordinate: Coordinate) -> Result<(), InvalidMoveError> {
        self.check_empty(coordinate)?;
        self.grid.set(coordinate, Cell::Occupied(mark));
        self.history.push(Move::new(mark, coordinate));
        debug!(%mark, %coordinate, moves = self.history.len(), "Move applied");
        Ok(())
    }

    /// Whether `mark` has completed any of the 8 lines.
    pub fn has_won(&self, mark: Mark) -> bool {
        rules::has_won(&self.grid, mark)
    }

    /// Whether every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.grid)
    }

    /// Win for `mark`, else tie on a full grid, else ongoing.
    #[instrument(skip(self))]
    pub fn outcome(&self, mark: Mark) -> Outcome {
        if self.has_won(mark) {
            Outcome::Win(mark)
        } else if self.is_full() {
            Outcome::Tie
        } else {
            Outcome::Ongoing
        }
    }

    /// Mark owning a completed line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::winner(&self.grid)
    }

    /// Copy of the grid.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Number of applied moves.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Owned copies of grid and history.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            history: self.history.clone(),
        }
    }

    fn check_empty(&self, coordinate: Coordinate) -> Result<(), InvalidMoveError> {
        match self.grid.get(coordinate) {
            Cell::Empty => Ok(()),
            Cell::Occupied(occupant) => Err(InvalidMoveError::CellOccupied {
                coordinate,
                occupant,
            }),
        }
    }
}

fn in_range(value: i64, axis: Axis) -> Result<u8, InvalidMoveError> {
    u8::try_from(value)
        .ok()
        .filter(|v| (1..=SIDE).contains(v))
        .ok_or(InvalidMoveError::OutOfRange { axis, value })
}
