//! Command-line interface for tictactoe_bot.

use clap::{Parser, Subcommand};

/// Tic-tac-toe against an LLM opponent
#[derive(Parser, Debug)]
#[command(name = "tictactoe_bot")]
#[command(about = "Play tic-tac-toe against an LLM from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game against the bot
    Play {
        /// Path to the TOML config (defaults apply if it does not exist)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: std::path::PathBuf,

        /// Your mark (X or O). Asked interactively if omitted.
        #[arg(short, long)]
        mark: Option<String>,

        /// Override attempts allowed per move
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Override seconds to wait for each bot proposal
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}
