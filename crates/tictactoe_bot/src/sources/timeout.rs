//! Deadline wrapper for slow move sources.

use std::time::Duration;
use tictactoe_core::{Mark, MoveSource, Snapshot, SourceError};
use tracing::{instrument, warn};

/// Wraps a source so each proposal must arrive within `limit`.
///
/// An elapsed call is reported as [`SourceError::TimedOut`] and counts as one
/// failed attempt.
#[derive(Debug, derive_new::new)]
pub struct TimeoutSource<S> {
    inner: S,
    limit: Duration,
}

#[async_trait::async_trait]
impl<S: MoveSource> MoveSource for TimeoutSource<S> {
    #[instrument(skip(self, snapshot), fields(source = %self.inner.name(), limit = ?self.limit))]
    async fn propose(
        &mut self,
        snapshot: &Snapshot,
        mark: Mark,
        opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        let limit = self.limit;
        match tokio::time::timeout(limit, self.inner.propose(snapshot, mark, opponent)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?limit, "Move source timed out");
                Err(SourceError::TimedOut { after: limit })
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
