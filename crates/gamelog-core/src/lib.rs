//! # gamelog-core
//!
//! The log replay engine for gamelog - THE ENGINE.
//!
//! This crate reconstructs per-player state from two independent,
//! line-oriented game-server logs (inventory mutations and money mutations)
//! and merges both logs into one chronological stream.
//!
//! ## Pipeline
//!
//! ```text
//! inventory_logs.txt ─┐                    ┌─> Ledger ─> Summary / ItemHoldings
//!                     ├─> parser ─> replay ┤
//! money_logs.txt ─────┘                    └─ (second, independent read)
//!                                               parser ─> merge ─> combined log
//! ```
//!
//! ## Architectural Constraints
//!
//! - Parsers are tolerant: a malformed line is skipped, never an error
//! - Replay and merge are two distinct read traversals, never fused
//! - BTreeMap everywhere: iteration order is deterministic by id
//! - No async, no logging, no network

// =============================================================================
// MODULES
// =============================================================================

pub mod merge;
pub mod parser;
pub mod player;
pub mod primitives;
pub mod query;
pub mod reference;
pub mod replay;
pub mod report;
pub mod source;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    GamelogError, InventoryAction, InventoryEvent, ItemDelta, ItemMention, ItemTypeId, LogSource,
    MoneyAction, MoneyEvent, PlayerId, Timestamp,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use merge::{ChronoMerger, MergeFormat, MergedLine, write_merged};
pub use parser::{LogRecord, parse_inventory_line, parse_money_line};
pub use player::PlayerState;
pub use query::{Holder, ItemHoldings, QueryCommand};
pub use reference::{ItemCatalog, PlayerDirectory};
pub use replay::{Ledger, ReplayStats, StateReplayer};
pub use report::{ItemCount, PlayerStanding, Summary};
pub use source::LogFile;
