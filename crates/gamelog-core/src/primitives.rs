//! # Log Primitives
//!
//! Hardcoded tokens and limits shared by the parsers, the replayer and the
//! report. These are part of the log format and never change at runtime.

/// Inventory action token that adds items to a player's inventory.
pub const ITEM_ADD: &str = "ITEM_ADD";

/// Inventory action token that removes items from a player's inventory.
pub const ITEM_REMOVE: &str = "ITEM_REMOVE";

/// Money action token that credits a player's balance.
pub const MONEY_ADD: &str = "MONEY_ADD";

/// Money action token that debits a player's balance.
pub const MONEY_REMOVE: &str = "MONEY_REMOVE";

/// Merge tie-break rank for inventory-sourced lines.
///
/// At equal timestamps, inventory lines sort before money lines.
pub const INVENTORY_RANK: u8 = 0;

/// Merge tie-break rank for money-sourced lines.
pub const MONEY_RANK: u8 = 1;

/// `strftime` pattern for every timestamp the tool prints.
pub const TIMESTAMP_FORMAT: &str = "[%y-%m-%d %H:%M:%S]";

/// Earliest calendar year a log timestamp may fall in (local time).
pub const MIN_YEAR: i32 = 1;

/// Latest calendar year a log timestamp may fall in (local time).
pub const MAX_YEAR: i32 = 9999;

/// Number of entries in each report ranking and in the query top list.
pub const DEFAULT_TOP_N: usize = 10;

/// Token that ends the interactive query loop (compared case-insensitively).
pub const EXIT_TOKEN: &str = "exit";

// =============================================================================
// DEFAULT FILE NAMES
// =============================================================================

/// Default inventory log file.
pub const DEFAULT_INVENTORY_LOG: &str = "inventory_logs.txt";

/// Default money log file.
pub const DEFAULT_MONEY_LOG: &str = "money_logs.txt";

/// Default player reference store (JSON).
pub const DEFAULT_PLAYERS_FILE: &str = "db.json";

/// Default item reference store (XML).
pub const DEFAULT_ITEMS_FILE: &str = "items.xml";

/// Default merged output file.
pub const DEFAULT_COMBINED_LOG: &str = "combined_log.txt";

/// Default summary report file.
pub const DEFAULT_REPORT: &str = "output.txt";
