//! Automated move source backed by a text-completion service.

use crate::llm_client::TextCompletion;
use crate::prompt::{SYSTEM_PROMPT, user_message};
use std::sync::Arc;
use tictactoe_core::{Mark, MoveSource, Snapshot, SourceError, parse_candidate};
use tracing::{debug, info, instrument};

/// LLM opponent. Every response is untrusted text and goes through
/// [`parse_candidate`].
pub struct LlmSource {
    name: String,
    completion: Arc<dyn TextCompletion>,
}

impl LlmSource {
    /// Creates an LLM source over any completion backend.
    pub fn new(name: impl Into<String>, completion: Arc<dyn TextCompletion>) -> Self {
        let name = name.into();
        info!(bot = %name, "Creating LLM move source");
        Self { name, completion }
    }
}

impl std::fmt::Debug for LlmSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSource").field("name", &self.name).finish()
    }
}

#[async_trait::async_trait]
impl MoveSource for LlmSource {
    #[instrument(skip(self, snapshot), fields(bot = %self.name, moves = snapshot.history.len()))]
    async fn propose(
        &mut self,
        snapshot: &Snapshot,
        mark: Mark,
        opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        let message = user_message(snapshot, mark, opponent);
        debug!(message_length = message.len(), "Requesting move from LLM");

        let response = self
            .completion
            .complete(SYSTEM_PROMPT, &message)
            .await
            .map_err(|e| SourceError::unavailable(e.message))?;

        info!(response = %response.trim(), "LLM proposed move");
        parse_candidate(&response)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
