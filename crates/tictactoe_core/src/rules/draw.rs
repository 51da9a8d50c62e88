//! Full-board detection for tic-tac-toe.

use crate::types::{Cell, Grid};
use tracing::instrument;

/// Checks if every cell is occupied.
///
/// A full grid with no completed line is a tie.
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.cells().iter().all(|c| *c != Cell::Empty)
}
