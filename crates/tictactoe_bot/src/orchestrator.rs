//! Game orchestration between two move sources.

use derive_more::Display;
use tictactoe_core::{
    Acquisition, AcquisitionExhausted, Coordinate, GameState, InvalidMoveError, Mark, MoveSource,
    Outcome, RejectedAttempt, Snapshot,
};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Events emitted while a game is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Game started on an empty board.
    Started {
        /// Rendered board.
        board: String,
    },
    /// A player is being asked for a move.
    AwaitingMove {
        /// Mark on move.
        mark: Mark,
        /// Player name.
        player: String,
    },
    /// A proposal was rejected.
    MoveRejected {
        /// Mark on move.
        mark: Mark,
        /// Player name.
        player: String,
        /// 1-based attempt number.
        attempt: u32,
        /// Attempts allowed.
        max_attempts: u32,
        /// Why it was rejected.
        reason: String,
    },
    /// Move was made.
    MoveMade {
        /// Mark placed.
        mark: Mark,
        /// Player name.
        player: String,
        /// Where it was placed.
        coordinate: Coordinate,
        /// Rendered board after the move.
        board: String,
    },
    /// Game ended.
    GameOver {
        /// Final verdict.
        outcome: Outcome,
        /// Winner's name, `None` on a tie.
        winner: Option<String>,
    },
}

/// Receiver of [`GameEvent`]s.
pub trait GameObserver {
    /// Handles one event.
    fn on_event(&mut self, event: GameEvent);
}

impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn on_event(&mut self, event: GameEvent) {
        if let Err(e) = self.send(event) {
            warn!(event = ?e.0, "Game event receiver dropped");
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// Final verdict for the mark that moved last.
    pub outcome: Outcome,
    /// Final grid and history.
    pub snapshot: Snapshot,
}

/// Why a game stopped before reaching a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameError {
    /// A player ran out of attempts. The game is aborted.
    #[display("{} gave up: {}", player, cause)]
    Exhausted {
        /// Player name.
        player: String,
        /// Underlying failure.
        cause: AcquisitionExhausted,
    },
    /// An acquired move was refused when applied.
    #[display("Move could not be applied: {}", _0)]
    Rejected(InvalidMoveError),
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Exhausted { cause, .. } => Some(cause),
            GameError::Rejected(e) => Some(e),
        }
    }
}

impl From<InvalidMoveError> for GameError {
    fn from(err: InvalidMoveError) -> Self {
        GameError::Rejected(err)
    }
}

/// Orchestrates one game between two players. X moves first.
pub struct Orchestrator {
    state: GameState,
    player_x: Box<dyn MoveSource>,
    player_o: Box<dyn MoveSource>,
    acquisition: Acquisition,
}

impl Orchestrator {
    /// Creates an orchestrator for a fresh game.
    #[instrument(skip(player_x, player_o), fields(x = %player_x.name(), o = %player_o.name()))]
    pub fn new(
        player_x: Box<dyn MoveSource>,
        player_o: Box<dyn MoveSource>,
        acquisition: Acquisition,
    ) -> Self {
        Self {
            state: GameState::new(),
            player_x,
            player_o,
            acquisition,
        }
    }

    /// Plays the game to a verdict.
    ///
    /// Returns [`GameError::Exhausted`] if a player cannot produce a legal
    /// move within the attempt limit; no fallback move is made.
    #[instrument(skip_all)]
    pub async fn run(mut self, observer: &mut dyn GameObserver) -> Result<GameReport, GameError> {
        info!("Starting game orchestration");
        observer.on_event(GameEvent::Started {
            board: self.state.grid().display(),
        });

        let mut mark = Mark::X;
        loop {
            let player = match mark {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };
            let name = player.name().to_string();

            debug!(player = %name, %mark, "Waiting for move");
            observer.on_event(GameEvent::AwaitingMove {
                mark,
                player: name.clone(),
            });

            let coordinate = self
                .acquisition
                .acquire_observed(player, &self.state, mark, mark.opponent(), |r| {
                    observer.on_event(rejection(&name, r))
                })
                .await
                .map_err(|cause| GameError::Exhausted {
                    player: name.clone(),
                    cause,
                })?;

            self.state.apply(mark, coordinate)?;
            observer.on_event(GameEvent::MoveMade {
                mark,
                player: name.clone(),
                coordinate,
                board: self.state.grid().display(),
            });

            let outcome = self.state.outcome(mark);
            if outcome.is_terminal() {
                info!(?outcome, moves = self.state.move_count(), "Game over");
                let winner = matches!(outcome, Outcome::Win(_)).then_some(name);
                observer.on_event(GameEvent::GameOver { outcome, winner });
                return Ok(GameReport {
                    outcome,
                    snapshot: self.state.snapshot(),
                });
            }

            mark = mark.opponent();
        }
    }
}

fn rejection(player: &str, rejected: &RejectedAttempt) -> GameEvent {
    GameEvent::MoveRejected {
        mark: rejected.mark,
        player: player.to_string(),
        attempt: rejected.attempt,
        max_attempts: rejected.max_attempts,
        reason: rejected.error.to_string(),
    }
}
