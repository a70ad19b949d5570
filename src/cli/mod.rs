//! Command-line interface for Debatron.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Debatron - Telegram moderation bot with LLM-scored messages.
#[derive(Parser, Debug)]
#[command(name = "debatron")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "debatron.toml")]
    pub config: PathBuf,

    /// Verbose mode.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Starts the bot polling loop.
    Run,

    /// Initializes configuration and criteria in the current directory.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Diagnoses configuration and connectivity problems.
    Doctor,

    /// Shows version.
    Version,
}
