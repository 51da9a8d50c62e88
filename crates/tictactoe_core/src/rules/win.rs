//! Win detection for tic-tac-toe.

use crate::types::{Cell, Coordinate, Grid, Mark};
use tracing::instrument;

/// The 8 winning lines as row-major indices.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

fn line_is(grid: &Grid, line: &[usize; 3], mark: Mark) -> bool {
    let cells = grid.cells();
    line.iter().all(|&i| cells[i] == Cell::Occupied(mark))
}

/// Checks if `mark` fills any winning line. Stops at the first match.
#[instrument(skip(grid))]
pub fn has_won(grid: &Grid, mark: Mark) -> bool {
    LINES.iter().any(|line| line_is(grid, line, mark))
}

/// First line completed by `mark`, as coordinates.
#[instrument(skip(grid))]
pub fn winning_line(grid: &Grid, mark: Mark) -> Option<[Coordinate; 3]> {
    LINES
        .iter()
        .find(|line| line_is(grid, line, mark))
        .and_then(|[a, b, c]| {
            Some([
                Coordinate::from_index(*a)?,
                Coordinate::from_index(*b)?,
                Coordinate::from_index(*c)?,
            ])
        })
}

/// Returns the mark owning a completed line, if any.
#[instrument(skip(grid))]
pub fn winner(grid: &Grid) -> Option<Mark> {
    [Mark::X, Mark::O]
        .into_iter()
        .find(|mark| has_won(grid, *mark))
}
