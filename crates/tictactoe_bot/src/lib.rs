//! Tic-tac-toe against an LLM opponent.
//!
//! Front-end glue around [`tictactoe_core`]:
//!
//! - **Sources**: a console player and an LLM player, both [`MoveSource`]s
//! - **Orchestrator**: alternates turns and reports events
//! - **Config**: TOML settings plus API keys from the environment
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_bot::{BotConfig, LlmClient, LlmSource, TimeoutSource};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = BotConfig::default();
//! let client = LlmClient::new(config.create_llm_config()?);
//! let bot = TimeoutSource::new(LlmSource::new("Bot", Arc::new(client)), config.move_timeout());
//! # Ok(())
//! # }
//! ```
//!
//! [`MoveSource`]: tictactoe_core::MoveSource

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod llm_client;
mod orchestrator;
mod prompt;
mod sources;
mod view;

// Crate-level exports - Configuration
pub use config::{BotConfig, ConfigError};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider, TextCompletion};

// Crate-level exports - Prompt
pub use prompt::{SYSTEM_PROMPT, user_message};

// Crate-level exports - Move sources
pub use sources::{ConsoleSource, LlmSource, TimeoutSource, prompt_mark};

// Crate-level exports - Orchestration
pub use orchestrator::{GameError, GameEvent, GameObserver, GameReport, Orchestrator};
pub use view::ConsoleView;
