//! Terminal-condition rules for tic-tac-toe.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{LINES, has_won, winner, winning_line};
