//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands, plus the
//! pipeline steps they share (reference loading, replay, file outputs).

use super::interactive::run_query_loop;
use crate::config::{GamelogConfig, ResolvedPaths};
use gamelog_core::{
    ChronoMerger, GamelogError, ItemCatalog, ItemHoldings, ItemTypeId, Ledger, LogFile,
    PlayerDirectory, StateReplayer, Summary, write_merged,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// =============================================================================
// PIPELINE STEPS
// =============================================================================

/// Both display-name lookups.
#[derive(Debug, Clone, Default)]
pub struct References {
    pub players: PlayerDirectory,
    pub items: ItemCatalog,
}

/// Load the reference stores. Failures are logged and degrade to empty lookups.
pub fn load_references(paths: &ResolvedPaths) -> References {
    let players = PlayerDirectory::load(&paths.players).unwrap_or_else(|e| {
        tracing::warn!("{}; player names fall back to Player_<id>", e);
        PlayerDirectory::default()
    });
    let items = ItemCatalog::load(&paths.items).unwrap_or_else(|e| {
        tracing::warn!("{}; item names fall back to Item <id>", e);
        ItemCatalog::default()
    });

    tracing::info!(
        players = players.len(),
        items = items.len(),
        "Reference stores loaded"
    );
    References { players, items }
}

/// Replay the inventory log, then the money log.
pub fn replay_logs(
    paths: &ResolvedPaths,
    directory: &PlayerDirectory,
) -> Result<Ledger, GamelogError> {
    let inventory = LogFile::new(&paths.inventory_log);
    let money = LogFile::new(&paths.money_log);
    for log in [&inventory, &money] {
        if !log.path().exists() {
            tracing::warn!("{} not found, treating as empty", log.path().display());
        }
    }

    let mut replayer = StateReplayer::new(directory);
    replayer.replay_inventory_file(&inventory)?;
    replayer.replay_money_file(&money)?;
    let ledger = replayer.finish();

    let stats = ledger.stats();
    tracing::info!(
        inventory_events = stats.inventory_events,
        inventory_skipped = stats.inventory_skipped,
        money_events = stats.money_events,
        money_skipped = stats.money_skipped,
        players = ledger.players().len(),
        "Replay complete"
    );
    Ok(ledger)
}

/// Re-read both logs and write the chronological merge. Returns the line count.
pub fn write_combined_log(paths: &ResolvedPaths) -> Result<usize, GamelogError> {
    let merged = ChronoMerger::merge_files(
        &LogFile::new(&paths.inventory_log),
        &LogFile::new(&paths.money_log),
    )?;

    let mut out = create_output(&paths.combined_log)?;
    write_merged(&merged, &mut out)
        .and_then(|()| out.flush())
        .map_err(|e| io_error(&paths.combined_log, e))?;

    tracing::info!(
        lines = merged.len(),
        "Combined log written to {}",
        paths.combined_log.display()
    );
    Ok(merged.len())
}

/// Render and write the summary report.
pub fn write_report(
    path: &Path,
    summary: &Summary,
    catalog: &ItemCatalog,
) -> Result<(), GamelogError> {
    let mut out = create_output(path)?;
    out.write_all(summary.render(catalog).as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| io_error(path, e))?;

    tracing::info!("Report written to {}", path.display());
    Ok(())
}

fn create_output(path: &Path) -> Result<BufWriter<File>, GamelogError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, e: std::io::Error) -> GamelogError {
    GamelogError::Io(format!("{}: {}", path.display(), e))
}

/// Start the interactive loop on stdin/stdout if there is anything to query.
fn start_interactive(
    ledger: &Ledger,
    catalog: &ItemCatalog,
    top_n: usize,
) -> Result<(), GamelogError> {
    if !ledger.has_item_activity() {
        println!("Interactive mode unavailable: no item data");
        return Ok(());
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_query_loop(ledger, catalog, top_n, stdin.lock(), &mut stdout.lock())
        .map_err(|e| GamelogError::Io(format!("Interactive query: {}", e)))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// RUN COMMAND
// =============================================================================

/// Full pipeline: replay, combined log, report, then optional query loop.
///
/// In JSON mode the interactive loop is never started.
pub fn cmd_run(
    config: &GamelogConfig,
    json_mode: bool,
    interactive: bool,
) -> Result<(), GamelogError> {
    let paths = config.paths.resolve();
    let top_n = config.report.top_n;

    let references = load_references(&paths);
    let ledger = replay_logs(&paths, &references.players)?;
    let combined_lines = write_combined_log(&paths)?;
    let summary = Summary::from_ledger(&ledger, top_n);
    write_report(&paths.report, &summary, &references.items)?;

    if json_mode {
        print_json(&serde_json::json!({
            "combined_log": paths.combined_log.to_string_lossy(),
            "combined_lines": combined_lines,
            "report": paths.report.to_string_lossy(),
            "players": ledger.players().len(),
            "stats": ledger.stats(),
        }));
        return Ok(());
    }

    println!(
        "Combined log: {} ({} lines)",
        paths.combined_log.display(),
        combined_lines
    );
    println!("Report:       {}", paths.report.display());

    if interactive {
        start_interactive(&ledger, &references.items, top_n)?;
    }

    Ok(())
}

// =============================================================================
// MERGE COMMAND
// =============================================================================

/// Write only the combined log. No replay happens.
pub fn cmd_merge(config: &GamelogConfig, json_mode: bool) -> Result<(), GamelogError> {
    let paths = config.paths.resolve();
    let combined_lines = write_combined_log(&paths)?;

    if json_mode {
        print_json(&serde_json::json!({
            "combined_log": paths.combined_log.to_string_lossy(),
            "combined_lines": combined_lines,
        }));
    } else {
        println!(
            "Combined log: {} ({} lines)",
            paths.combined_log.display(),
            combined_lines
        );
    }

    Ok(())
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Replay and write only the report.
pub fn cmd_report(config: &GamelogConfig, json_mode: bool) -> Result<(), GamelogError> {
    let paths = config.paths.resolve();

    let references = load_references(&paths);
    let ledger = replay_logs(&paths, &references.players)?;
    let summary = Summary::from_ledger(&ledger, config.report.top_n);
    write_report(&paths.report, &summary, &references.items)?;

    if json_mode {
        print_json(&serde_json::json!({
            "report": paths.report.to_string_lossy(),
            "summary": summary,
        }));
    } else {
        println!("Report: {}", paths.report.display());
    }

    Ok(())
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

/// Replay, then answer one item query or start the interactive loop.
pub fn cmd_query(
    config: &GamelogConfig,
    json_mode: bool,
    item: Option<i64>,
) -> Result<(), GamelogError> {
    let paths = config.paths.resolve();
    let top_n = config.report.top_n;

    let references = load_references(&paths);
    let ledger = replay_logs(&paths, &references.players)?;

    match item {
        Some(id) => {
            let holdings = ItemHoldings::compute(&ledger, &references.items, ItemTypeId(id), top_n);
            if json_mode {
                print_json(&serde_json::json!(holdings));
            } else {
                print!("{}", holdings.render(top_n));
            }
            Ok(())
        }
        None => start_interactive(&ledger, &references.items, top_n),
    }
}
