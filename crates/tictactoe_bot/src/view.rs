//! Plain-text rendering of game events.

use crate::orchestrator::{GameEvent, GameObserver};
use std::io::Write;
use tictactoe_core::Outcome;
use tracing::warn;

/// Writes game events as console text.
pub struct ConsoleView<W> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    /// Creates a view writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, event: &GameEvent) -> std::io::Result<()> {
        match event {
            GameEvent::Started { board } => {
                writeln!(self.out)?;
                writeln!(self.out, "Board:")?;
                write!(self.out, "{}", board)?;
            }
            GameEvent::AwaitingMove { mark, player } => {
                writeln!(self.out, "{}", "-".repeat(50))?;
                writeln!(self.out, "{} ({}) to move", player, mark)?;
            }
            GameEvent::MoveRejected {
                player,
                attempt,
                max_attempts,
                reason,
                ..
            } => {
                if attempt < max_attempts {
                    writeln!(
                        self.out,
                        "{}. {} trying again. (Attempt {}/{})",
                        reason,
                        player,
                        attempt + 1,
                        max_attempts
                    )?;
                } else {
                    writeln!(
                        self.out,
                        "{}. {} is out of attempts ({}/{}).",
                        reason, player, attempt, max_attempts
                    )?;
                }
            }
            GameEvent::MoveMade {
                mark,
                player,
                coordinate,
                board,
            } => {
                writeln!(self.out, "{} ({}) move: {}", player, mark, coordinate)?;
                writeln!(self.out)?;
                writeln!(self.out, "Board:")?;
                write!(self.out, "{}", board)?;
            }
            GameEvent::GameOver { outcome, .. } => match outcome {
                Outcome::Win(mark) => writeln!(self.out, "{} wins!", mark)?,
                Outcome::Tie => writeln!(self.out, "Tie!")?,
                Outcome::Ongoing => {}
            },
        }
        self.out.flush()
    }
}

impl<W: Write> GameObserver for ConsoleView<W> {
    fn on_event(&mut self, event: GameEvent) {
        if let Err(e) = self.render(&event) {
            warn!(error = %e, "Failed to write game event");
        }
    }
}
