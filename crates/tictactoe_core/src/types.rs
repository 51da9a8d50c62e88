//! Core domain types for tic-tac-toe.

use crate::error::MarkError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side of the board: 3 rows by 3 columns.
pub const SIDE: u8 = 3;

/// Mark placed by a participant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Parses a mark from user or config text, ignoring case and surrounding whitespace.
    ///
    /// Anything other than `X` or `O` is a setup error and must abort before a game starts.
    #[instrument]
    pub fn parse(text: &str) -> Result<Self, MarkError> {
        Mark::from_str(text.trim()).map_err(|_| MarkError::new(text))
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell holds a mark. Never overwritten.
    Occupied(Mark),
}

impl Cell {
    /// Single-character rendering, a space for empty cells.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Occupied(Mark::X) => 'X',
            Cell::Occupied(Mark::O) => 'O',
        }
    }
}

/// A (row, col) pair, both 1-indexed and always within `1..=3`.
///
/// There is no way to build an out-of-range coordinate; raw proposals go
/// through [`crate::GameState::validate`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinate {
    row: u8,
    col: u8,
}

impl Coordinate {
    /// All nine coordinates in row-major order.
    pub const ALL: [Coordinate; 9] = [
        Coordinate { row: 1, col: 1 },
        Coordinate { row: 1, col: 2 },
        Coordinate { row: 1, col: 3 },
        Coordinate { row: 2, col: 1 },
        Coordinate { row: 2, col: 2 },
        Coordinate { row: 2, col: 3 },
        Coordinate { row: 3, col: 1 },
        Coordinate { row: 3, col: 2 },
        Coordinate { row: 3, col: 3 },
    ];

    /// Creates a coordinate, or `None` if either part is outside `1..=3`.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let in_range = |v: u8| (1..=SIDE).contains(&v);
        (in_range(row) && in_range(col)).then_some(Self { row, col })
    }

    /// Caller has already range-checked both parts.
    pub(crate) fn checked(row: u8, col: u8) -> Self {
        debug_assert!((1..=SIDE).contains(&row) && (1..=SIDE).contains(&col));
        Self { row, col }
    }

    /// Creates a coordinate from a row-major grid index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row-major grid index (0-8).
    pub fn index(self) -> usize {
        usize::from(self.row - 1) * usize::from(SIDE) + usize::from(self.col - 1)
    }

    /// Row, 1-indexed.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column, 1-indexed.
    pub fn col(self) -> u8 {
        self.col
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A mark placed at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Where it goes.
    pub coordinate: Coordinate,
}

impl std::fmt::Display for Move {
    /// History entry format: `X: (1, 1)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.mark, self.coordinate)
    }
}

/// 3x3 grid of cells in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [Cell; 9],
}

impl Grid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at the coordinate.
    pub fn get(&self, coordinate: Coordinate) -> Cell {
        self.cells[coordinate.index()]
    }

    /// Whether the cell at the coordinate is empty.
    pub fn is_empty(&self, coordinate: Coordinate) -> bool {
        self.get(coordinate) == Cell::Empty
    }

    /// All cells, row-major.
    pub fn cells(&self) -> [Cell; 9] {
        self.cells
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_coordinates(&self) -> Vec<Coordinate> {
        Coordinate::ALL
            .iter()
            .copied()
            .filter(|c| self.is_empty(*c))
            .collect()
    }

    pub(crate) fn set(&mut self, coordinate: Coordinate, cell: Cell) {
        self.cells[coordinate.index()] = cell;
    }

    fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(SIDE))
    }

    /// Human-facing ASCII board.
    ///
    /// ```text
    /// -----------
    ///  X |   |
    /// -----------
    /// ```
    pub fn display(&self) -> String {
        let mut out = String::new();
        let mut rule = String::new();
        for row in self.rows() {
            let line = format!(
                " {} | {} | {} ",
                row[0].symbol(),
                row[1].symbol(),
                row[2].symbol()
            );
            rule = "-".repeat(line.len());
            out.push_str(&rule);
            out.push('\n');
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }

    /// Row-major list literal handed to the automated source, e.g.
    /// `[['X', ' ', ' '], [' ', ' ', ' '], [' ', ' ', ' ']]`.
    pub fn literal(&self) -> String {
        let rows: Vec<String> = self
            .rows()
            .map(|row| {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| quote(&cell.symbol().to_string()))
                    .collect();
                format!("[{}]", cells.join(", "))
            })
            .collect();
        format!("[{}]", rows.join(", "))
    }
}

/// Append-only record of applied moves.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    /// Moves in application order.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of applied moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Whether no move has been applied.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Entries rendered as `"<Mark>: (<row>, <col>)"`.
    pub fn entries(&self) -> Vec<String> {
        self.moves.iter().map(Move::to_string).collect()
    }

    /// List literal handed to the automated source, e.g. `['X: (1, 1)', 'O: (2, 2)']`.
    pub fn literal(&self) -> String {
        let quoted: Vec<String> = self.entries().iter().map(|e| quote(e)).collect();
        format!("[{}]", quoted.join(", "))
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text)
}
