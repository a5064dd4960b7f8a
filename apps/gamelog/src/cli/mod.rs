//! # gamelog CLI Module
//!
//! This module implements the CLI interface for gamelog.
//!
//! ## Available Commands
//!
//! - `run` - Replay, write the combined log and the report, then query (default)
//! - `merge` - Write only the combined log
//! - `report` - Write only the summary report
//! - `query` - Answer one item query, or start the interactive loop

mod commands;
mod interactive;

use crate::config::GamelogConfig;
use clap::{Parser, Subcommand};
use gamelog_core::GamelogError;
use std::path::PathBuf;

pub use commands::*;
pub use interactive::run_query_loop;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// gamelog - inventory and money log analyzer
///
/// Rebuilds player state from game-server inventory and money logs,
/// merges both logs chronologically and reports on the result.
#[derive(Parser, Debug)]
#[command(name = "gamelog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "gamelog.toml")]
    pub config: PathBuf,

    /// Directory holding the logs and reference files (overrides the config)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay both logs, write combined log and report, then query interactively
    Run {
        /// Skip the interactive query loop
        #[arg(long)]
        no_interactive: bool,
    },

    /// Write the chronologically merged log only
    Merge,

    /// Write the summary report only
    Report,

    /// Query item holdings
    Query {
        /// Item type id to look up; omit to start the interactive loop
        #[arg(short, long)]
        item: Option<i64>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GamelogError> {
    let mut config = GamelogConfig::load(&cli.config)?;
    if let Some(dir) = cli.dir {
        config.paths.base_dir = dir;
    }
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Run { no_interactive }) => cmd_run(&config, json_mode, !no_interactive),
        Some(Commands::Merge) => cmd_merge(&config, json_mode),
        Some(Commands::Report) => cmd_report(&config, json_mode),
        Some(Commands::Query { item }) => cmd_query(&config, json_mode, item),
        None => {
            // No subcommand - full pipeline with interactive mode
            cmd_run(&config, json_mode, true)
        }
    }
}
