//! # Core Type Definitions
//!
//! This module contains all core types for the gamelog replay engine:
//! - Identifiers and time (`PlayerId`, `ItemTypeId`, `Timestamp`)
//! - Parsed log events (`InventoryEvent`, `MoneyEvent`)
//! - Replay bookkeeping (`ItemMention`, `LogSource`)
//! - Error types (`GamelogError`)
//!
//! ## Determinism Guarantees
//!
//! All identifier types implement `Ord` so they can key `BTreeMap`s, and all
//! arithmetic on quantities and balances is integer-only.

use crate::primitives::{
    INVENTORY_RANK, ITEM_ADD, ITEM_REMOVE, MAX_YEAR, MIN_YEAR, MONEY_ADD, MONEY_RANK,
    MONEY_REMOVE, TIMESTAMP_FORMAT,
};
use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Player identifier, shared by both log sources.
///
/// Opaque: a player id does not have to exist in the player reference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemTypeId(pub i64);

impl fmt::Display for ItemTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// An absolute point in time, stored as Unix epoch seconds.
///
/// Ordering is the integer ordering of the epoch value. Rendering goes
/// through the local time zone, e.g. `[23-11-14 22:13:20]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Build a timestamp from epoch seconds. Values whose local date falls
    /// outside years `MIN_YEAR..=MAX_YEAR` are rejected.
    #[must_use]
    pub fn from_unix(secs: i64) -> Option<Self> {
        let ts = Self(secs);
        let year = ts.to_local()?.year();
        (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(ts)
    }

    /// Epoch seconds.
    #[must_use]
    pub const fn unix(self) -> i64 {
        self.0
    }

    /// The timestamp as a local date-time.
    #[must_use]
    pub fn to_local(self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp(self.0, 0).map(|dt| dt.with_timezone(&Local))
    }

    /// Render as `[YY-MM-DD HH:MM:SS]` in local time.
    #[must_use]
    pub fn bracketed(self) -> String {
        match self.to_local() {
            Some(dt) => dt.format(TIMESTAMP_FORMAT).to_string(),
            None => format!("[{}]", self.0),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bracketed())
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// Action of an inventory event.
///
/// Unrecognized tokens are kept verbatim: the event is still valid and still
/// counts towards histograms and seen-timestamps, it just moves no items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InventoryAction {
    /// `ITEM_ADD`
    Add,
    /// `ITEM_REMOVE`
    Remove,
    /// Any other token.
    Other(String),
}

impl InventoryAction {
    /// Classify a raw action token. Comparison is exact and case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            ITEM_ADD => Self::Add,
            ITEM_REMOVE => Self::Remove,
            other => Self::Other(other.to_string()),
        }
    }

    /// The token as it appears in the log.
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Add => ITEM_ADD,
            Self::Remove => ITEM_REMOVE,
            Self::Other(token) => token,
        }
    }
}

/// Action of a money event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoneyAction {
    /// `MONEY_ADD`
    Add,
    /// `MONEY_REMOVE`
    Remove,
    /// Any other token. Updates seen-timestamps only.
    Other(String),
}

impl MoneyAction {
    /// Classify a raw action token. Comparison is exact and case-sensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            MONEY_ADD => Self::Add,
            MONEY_REMOVE => Self::Remove,
            other => Self::Other(other.to_string()),
        }
    }

    /// The token as it appears in the log.
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Add => MONEY_ADD,
            Self::Remove => MONEY_REMOVE,
            Self::Other(token) => token,
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// One (item, amount) pair inside an inventory event.
///
/// The amount is unsigned in intent; the sign comes from the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemDelta {
    /// Item type being moved.
    pub item: ItemTypeId,
    /// Quantity as written in the log.
    pub amount: i64,
}

impl ItemDelta {
    /// Create a new item delta.
    #[must_use]
    pub const fn new(item: ItemTypeId, amount: i64) -> Self {
        Self { item, amount }
    }
}

/// One parsed inventory-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEvent {
    pub timestamp: Timestamp,
    pub action: InventoryAction,
    pub player: PlayerId,
    /// Items in line order. May be empty.
    pub items: Vec<ItemDelta>,
}

/// One parsed money-log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyEvent {
    pub timestamp: Timestamp,
    pub action: MoneyAction,
    pub player: PlayerId,
    pub amount: i64,
    /// Free text after the amount, commas preserved. Empty when absent.
    pub reason: String,
}

/// A single occurrence of an item inside an inventory event, in file-read order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemMention {
    pub item: ItemTypeId,
    pub timestamp: Timestamp,
}

impl ItemMention {
    /// Create a new mention.
    #[must_use]
    pub const fn new(item: ItemTypeId, timestamp: Timestamp) -> Self {
        Self { item, timestamp }
    }
}

/// Which log a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogSource {
    Inventory,
    Money,
}

impl LogSource {
    /// Tie-break rank used by the chronological merge.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Inventory => INVENTORY_RANK,
            Self::Money => MONEY_RANK,
        }
    }

    /// Lower-case name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Money => "money",
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can reach a caller of the engine.
///
/// Malformed log lines are NOT errors: parsers return `None` and the line is
/// skipped. These variants cover the surrounding files only.
#[derive(Debug, Error)]
pub enum GamelogError {
    /// An I/O error occurred on an input or output file.
    #[error("I/O error: {0}")]
    Io(String),

    /// A reference store (player directory or item catalog) could not be loaded.
    #[error("Reference store error: {0}")]
    Reference(String),

    /// The configuration file could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================
