//! Game and bot configuration loaded from TOML.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tictactoe_core::{Acquisition, DEFAULT_MAX_ATTEMPTS};
use tracing::{debug, info, instrument};

/// Configuration for a game against the bot.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct BotConfig {
    /// LLM provider (openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-20241022").
    #[serde(default = "default_model")]
    llm_model: String,

    /// Maximum tokens for LLM responses. A move is a handful of tokens.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    llm_temperature: f32,

    /// Attempts allowed per move before the game is aborted.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Seconds to wait for one bot proposal.
    #[serde(default = "default_move_timeout_secs")]
    move_timeout_secs: u64,

    /// Name shown for the bot.
    #[serde(default = "default_bot_name")]
    bot_name: String,

    /// Name shown for the human.
    #[serde(default = "default_human_name")]
    human_name: String,
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenAI
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    16
}

fn default_temperature() -> f32 {
    0.9
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_move_timeout_secs() -> u64 {
    30
}

fn default_bot_name() -> String {
    "Bot".to_string()
}

fn default_human_name() -> String {
    "Human".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_provider(),
            llm_model: default_model(),
            llm_max_tokens: default_max_tokens(),
            llm_temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            move_timeout_secs: default_move_timeout_secs(),
            bot_name: default_bot_name(),
            human_name: default_human_name(),
        }
    }
}

impl BotConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(provider = %config.llm_provider, model = %config.llm_model, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the attempt limit.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Overrides the per-move timeout.
    pub fn with_move_timeout_secs(mut self, secs: u64) -> Self {
        self.move_timeout_secs = secs;
        self
    }

    /// Per-move timeout for the bot.
    pub fn move_timeout(&self) -> Duration {
        Duration::from_secs(self.move_timeout_secs)
    }

    /// Retry policy built from `max_attempts`.
    #[instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub fn acquisition(&self) -> Result<Acquisition, ConfigError> {
        Acquisition::with_max_attempts(self.max_attempts)
            .map_err(|e| ConfigError::new(format!("Invalid max_attempts: {}", e.message)))
    }

    /// Creates LLM configuration from this config.
    /// Requires OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.
    #[instrument(skip(self), fields(provider = ?self.llm_provider, model = %self.llm_model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");

        let api_key = match self.llm_provider {
            LlmProvider::OpenAI => std::env::var("OPENAI_API_KEY").map_err(|_| {
                ConfigError::new("OPENAI_API_KEY environment variable not set".to_string())
            })?,
            LlmProvider::Anthropic => std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
                ConfigError::new("ANTHROPIC_API_KEY environment variable not set".to_string())
            })?,
        };

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.llm_model.clone(),
            self.llm_max_tokens,
            self.llm_temperature,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
