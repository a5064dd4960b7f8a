//! # Query Module
//!
//! Read-only item queries over a finished [`Ledger`].
//!
//! - Map one line of user input to a structured command (no guessing)
//! - Aggregate how much of an item is held and by whom

use crate::primitives::EXIT_TOKEN;
use crate::{ItemCatalog, ItemTypeId, Ledger, PlayerId};
use serde::Serialize;
use std::cmp::Reverse;

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Leave the query loop.
    Exit,
    /// Look up one item type.
    Item(ItemTypeId),
    /// Anything else; carries the trimmed input.
    Invalid(String),
}

impl QueryCommand {
    /// Parse one line of input. The exit token is case-insensitive.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.eq_ignore_ascii_case(EXIT_TOKEN) {
            return Self::Exit;
        }
        match input.parse::<i64>() {
            Ok(id) => Self::Item(ItemTypeId(id)),
            Err(_) => Self::Invalid(input.to_string()),
        }
    }
}

/// A player holding the queried item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holder {
    pub player: PlayerId,
    pub name: String,
    pub quantity: i64,
}

/// Aggregate holdings of one item across all players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemHoldings {
    pub item: ItemTypeId,
    pub name: String,
    /// Sum of quantities over all players.
    pub total: i64,
    /// Number of distinct players holding any.
    pub holders: usize,
    /// Largest holders first, ties in first-appearance order.
    pub top: Vec<Holder>,
}

impl ItemHoldings {
    /// Aggregate `item` over every player, keeping `top_n` top holders.
    #[must_use]
    pub fn compute(ledger: &Ledger, catalog: &ItemCatalog, item: ItemTypeId, top_n: usize) -> Self {
        let mut holders: Vec<Holder> = ledger
            .players_by_appearance()
            .filter_map(|p| {
                p.quantity(item).map(|quantity| Holder {
                    player: p.id(),
                    name: p.name().to_string(),
                    quantity,
                })
            })
            .collect();

        let total = holders
            .iter()
            .fold(0i64, |acc, h| acc.saturating_add(h.quantity));
        let count = holders.len();

        holders.sort_by_key(|h| Reverse(h.quantity));
        holders.truncate(top_n);

        Self {
            item,
            name: catalog.display_name(item),
            total,
            holders: count,
            top: holders,
        }
    }

    /// Render the answer as printed by the interactive loop.
    #[must_use]
    pub fn render(&self, top_n: usize) -> String {
        let mut out = String::new();
        out.push_str(&format!("Item name: {}\n", self.name));
        out.push_str(&format!("Total quantity: {}\n", self.total));
        out.push_str(&format!("Players holding: {}\n", self.holders));
        if self.top.is_empty() {
            out.push_str("  Nobody holds this item\n");
        } else {
            out.push_str(&format!("Top {} players:\n", top_n));
            for holder in &self.top {
                out.push_str(&format!("  {}: {}\n", holder.name, holder.quantity));
            }
        }
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
