//! # gamelog - Inventory and Money Log Analyzer
//!
//! The main binary for the gamelog replay engine.
//!
//! This application provides:
//! - Chronological merge of the inventory and money logs
//! - Summary report of top items, top players and distinct item mentions
//! - Interactive item holdings queries
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    apps/gamelog (THE BINARY)                │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────┐    ┌───────────────┐   │
//! │  │   CLI       │    │ File outputs │    │  Query loop   │   │
//! │  │  (clap)     │    │ (log/report) │    │ (stdin/out)   │   │
//! │  └──────┬──────┘    └──────┬───────┘    └───────┬───────┘   │
//! │         │                  │                    │           │
//! │         └──────────────────┼────────────────────┘           │
//! │                            ▼                                │
//! │                    ┌───────────────┐                        │
//! │                    │ gamelog-core  │                        │
//! │                    │ (THE ENGINE)  │                        │
//! │                    └───────────────┘                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Full pipeline in the current directory, then interactive queries
//! gamelog
//!
//! # Logs elsewhere, no prompt
//! gamelog --dir /var/log/game run --no-interactive
//!
//! # One-shot query as JSON
//! gamelog --json-mode query --item 42
//! ```

use clap::Parser;
use gamelog::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing - GAMELOG_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr; stdout carries the prompt and query answers.
    let log_format = std::env::var("GAMELOG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "gamelog=debug"
    } else {
        "gamelog=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the gamelog startup banner.
fn print_banner() {
    println!(
        r#"
  gamelog v{}
  inventory + money log replay
"#,
        env!("CARGO_PKG_VERSION")
    );
}
