//! tictactoe_bot - play tic-tac-toe against an LLM.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use std::sync::Arc;
use tictactoe_bot::{
    BotConfig, ConsoleSource, ConsoleView, LlmClient, LlmSource, Orchestrator, TimeoutSource,
    prompt_mark,
};
use tictactoe_core::{Mark, MoveSource};
use tokio::io::BufReader;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play {
            config,
            mark,
            max_attempts,
            timeout_secs,
        } => run_play(config, mark, max_attempts, timeout_secs).await,
    }
}

/// Play one game: human at the terminal against the LLM.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    mark: Option<String>,
    max_attempts: Option<u32>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let mut config = BotConfig::load_or_default(&config_path)?;
    if let Some(n) = max_attempts {
        info!(max_attempts = n, "Overriding max attempts");
        config = config.with_max_attempts(n);
    }
    if let Some(secs) = timeout_secs {
        info!(timeout_secs = secs, "Overriding move timeout");
        config = config.with_move_timeout_secs(secs);
    }

    // Setup errors are fatal before the first move.
    let acquisition = config.acquisition()?;
    let client = LlmClient::new(config.create_llm_config()?);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let human_mark = match mark {
        Some(text) => Mark::parse(&text)?,
        None => prompt_mark(&mut stdin, &mut tokio::io::stdout()).await?,
    };
    info!(%human_mark, "Marks assigned");

    let human: Box<dyn MoveSource> = Box::new(ConsoleSource::stdio(config.human_name(), stdin));
    let bot: Box<dyn MoveSource> = Box::new(TimeoutSource::new(
        LlmSource::new(config.bot_name(), Arc::new(client)),
        config.move_timeout(),
    ));
    let (player_x, player_o) = match human_mark {
        Mark::X => (human, bot),
        Mark::O => (bot, human),
    };

    let orchestrator = Orchestrator::new(player_x, player_o, acquisition);
    let mut view = ConsoleView::new(std::io::stdout());

    match orchestrator.run(&mut view).await {
        Ok(report) => {
            info!(outcome = ?report.outcome, moves = report.snapshot.history.len(), "Game finished");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Game aborted");
            Err(e.into())
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,tictactoe_bot=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
