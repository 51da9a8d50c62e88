//! Bounded-retry move acquisition.
//!
//! [`Acquisition`] wraps any [`MoveSource`] with validation against a
//! [`GameState`] and a fixed attempt limit. The loop does not care whether
//! the source is a person at a terminal or a completion service.

use crate::error::{AcquisitionExhausted, AttemptError, SetupError, SourceError};
use crate::state::{GameState, Snapshot};
use crate::types::{Coordinate, Mark};
use std::num::NonZeroU32;
use tracing::{debug, info, instrument, warn};

/// Default attempts per move.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Provider of raw move proposals.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Proposes one candidate for `mark` given a copy of the game state.
    ///
    /// Returns the integers read from the proposal; arity and range are
    /// checked by the caller.
    async fn propose(
        &mut self,
        snapshot: &Snapshot,
        mark: Mark,
        opponent: Mark,
    ) -> Result<Vec<i64>, SourceError>;

    /// Display name of this source.
    fn name(&self) -> &str;
}

#[async_trait::async_trait]
impl<S: MoveSource + ?Sized> MoveSource for Box<S> {
    async fn propose(
        &mut self,
        snapshot: &Snapshot,
        mark: Mark,
        opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        (**self).propose(snapshot, mark, opponent).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A rejected attempt, reported to the observer before the next try.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct RejectedAttempt {
    /// Mark on move.
    pub mark: Mark,
    /// 1-based attempt number.
    pub attempt: u32,
    /// Configured limit.
    pub max_attempts: u32,
    /// Why it was rejected.
    pub error: AttemptError,
}

impl RejectedAttempt {
    /// Whether another attempt follows this one.
    pub fn will_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }
}

/// Retry policy for turning proposals into legal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acquisition {
    max_attempts: NonZeroU32,
}

impl Default for Acquisition {
    fn default() -> Self {
        Self {
            max_attempts: NonZeroU32::MIN.saturating_add(DEFAULT_MAX_ATTEMPTS - 1),
        }
    }
}

impl Acquisition {
    /// Creates a policy allowing `max_attempts` tries per move.
    #[instrument]
    pub fn with_max_attempts(max_attempts: u32) -> Result<Self, SetupError> {
        let max_attempts = NonZeroU32::new(max_attempts)
            .ok_or_else(|| SetupError::new("max_attempts must be at least 1"))?;
        Ok(Self { max_attempts })
    }

    /// Attempts allowed per move.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    /// Acquires a legal coordinate for `mark`, logging each rejection.
    pub async fn acquire<S>(
        &self,
        source: &mut S,
        state: &GameState,
        mark: Mark,
        opponent: Mark,
    ) -> Result<Coordinate, AcquisitionExhausted>
    where
        S: MoveSource + ?Sized,
    {
        self.acquire_observed(source, state, mark, opponent, |_| {})
            .await
    }

    /// Acquires a legal coordinate for `mark`, reporting each rejection to `observer`.
    ///
    /// The source is called at most `max_attempts` times. A parse failure,
    /// a source failure and an illegal coordinate all count as one failed
    /// attempt.
    #[instrument(
        skip(self, source, state, observer),
        fields(source = %source.name(), max_attempts = self.max_attempts.get())
    )]
    pub async fn acquire_observed<S, F>(
        &self,
        source: &mut S,
        state: &GameState,
        mark: Mark,
        opponent: Mark,
        mut observer: F,
    ) -> Result<Coordinate, AcquisitionExhausted>
    where
        S: MoveSource + ?Sized,
        F: FnMut(&RejectedAttempt),
    {
        let max_attempts = self.max_attempts.get();
        let mut attempt = 1;

        loop {
            debug!(attempt, "Requesting candidate");
            let snapshot = state.snapshot();
            let result = match source.propose(&snapshot, mark, opponent).await {
                Ok(candidate) => state.validate(&candidate).map_err(AttemptError::from),
                Err(e) => Err(AttemptError::from(e)),
            };

            let error = match result {
                Ok(coordinate) => {
                    info!(attempt, %coordinate, "Move acquired");
                    return Ok(coordinate);
                }
                Err(error) => error,
            };

            warn!(attempt, max_attempts, %error, "Candidate rejected");
            let rejected = RejectedAttempt::new(mark, attempt, max_attempts, error);
            observer(&rejected);

            if !rejected.will_retry() {
                return Err(AcquisitionExhausted {
                    mark,
                    attempts: attempt,
                    last_error: rejected.error,
                });
            }
            attempt += 1;
        }
    }
}

