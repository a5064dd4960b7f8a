//! # Summary Report
//!
//! Rankings computed from a finished [`Ledger`] and their text rendering.
//!
//! Four sections, always in this order:
//! 1. Top items by occurrence count
//! 2. Top players by money (players with at least one money event)
//! 3. First distinct items in mention order
//! 4. Last distinct items in mention order
//!
//! Ties keep first-appearance order: the rankings stable-sort items in the
//! order they were first mentioned and players in the order they were first
//! created during replay.

use crate::{ItemCatalog, ItemMention, ItemTypeId, Ledger, PlayerId, Timestamp};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeSet;

/// Placeholder printed for an empty section.
pub const NO_DATA: &str = "No data";

/// Placeholder for an unset seen-timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the item ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemCount {
    pub item: ItemTypeId,
    pub count: u64,
}

/// One row of the player ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub money: i64,
    pub first_seen: Option<Timestamp>,
    pub last_seen: Option<Timestamp>,
}

/// All four report sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub top_n: usize,
    pub top_items: Vec<ItemCount>,
    pub top_players: Vec<PlayerStanding>,
    pub first_items: Vec<ItemMention>,
    pub last_items: Vec<ItemMention>,
}

impl Summary {
    /// Compute every section with `top_n` rows at most.
    #[must_use]
    pub fn from_ledger(ledger: &Ledger, top_n: usize) -> Self {
        Self {
            top_n,
            top_items: top_items(ledger, top_n),
            top_players: top_players(ledger, top_n),
            first_items: first_distinct(ledger.mentions(), top_n),
            last_items: last_distinct(ledger.mentions(), top_n),
        }
    }

    /// Render the report text, newline-terminated.
    #[must_use]
    pub fn render(&self, catalog: &ItemCatalog) -> String {
        let n = self.top_n;

        let items = self
            .top_items
            .iter()
            .map(|row| format!("{}, {}", catalog.display_name(row.item), row.count));

        let players = self.top_players.iter().map(|row| {
            format!(
                "{}, {}, {}, {}",
                row.name,
                row.money,
                seen_or_na(row.first_seen),
                seen_or_na(row.last_seen)
            )
        });

        let mention_row =
            |m: &ItemMention| format!("{}, {}", catalog.display_name(m.item), m.timestamp);

        let sections = [
            section(&format!("Top {} items by occurrence:", n), items),
            section(&format!("Top {} players by money:", n), players),
            section(
                &format!("First {} distinct items in source order:", n),
                self.first_items.iter().map(mention_row),
            ),
            section(
                &format!("Last {} distinct items in source order:", n),
                self.last_items.iter().map(mention_row),
            ),
        ];

        sections.join("\n")
    }
}

fn section(heading: &str, rows: impl Iterator<Item = String>) -> String {
    let mut out = format!("{}\n", heading);
    let mut empty = true;
    for row in rows {
        out.push_str(&row);
        out.push('\n');
        empty = false;
    }
    if empty {
        out.push_str(NO_DATA);
        out.push('\n');
    }
    out
}

fn seen_or_na(ts: Option<Timestamp>) -> String {
    ts.map_or_else(|| NOT_AVAILABLE.to_string(), Timestamp::bracketed)
}

// =============================================================================
// RANKINGS
// =============================================================================

/// Items by occurrence count, descending.
#[must_use]
pub fn top_items(ledger: &Ledger, n: usize) -> Vec<ItemCount> {
    let mut rows: Vec<ItemCount> = ledger
        .items_by_appearance()
        .map(|(item, count)| ItemCount { item, count })
        .collect();
    rows.sort_by_key(|row| Reverse(row.count));
    rows.truncate(n);
    rows
}

/// Players with money activity by balance, descending.
#[must_use]
pub fn top_players(ledger: &Ledger, n: usize) -> Vec<PlayerStanding> {
    let mut rows: Vec<PlayerStanding> = ledger
        .players_by_appearance()
        .filter(|p| p.has_money_activity())
        .map(|p| PlayerStanding {
            id: p.id(),
            name: p.name().to_string(),
            money: p.money(),
            first_seen: p.first_seen(),
            last_seen: p.last_seen(),
        })
        .collect();
    rows.sort_by_key(|row| Reverse(row.money));
    rows.truncate(n);
    rows
}

/// The first `n` distinct items walking the mentions forwards, each with the
/// timestamp of its first occurrence.
#[must_use]
pub fn first_distinct(mentions: &[ItemMention], n: usize) -> Vec<ItemMention> {
    distinct(mentions.iter(), n)
}

/// The first `n` distinct items walking the mentions backwards, each with the
/// timestamp of its last occurrence, returned in forward order.
#[must_use]
pub fn last_distinct(mentions: &[ItemMention], n: usize) -> Vec<ItemMention> {
    let mut rows = distinct(mentions.iter().rev(), n);
    rows.reverse();
    rows
}

fn distinct<'a>(mentions: impl Iterator<Item = &'a ItemMention>, n: usize) -> Vec<ItemMention> {
    let mut seen = BTreeSet::new();
    mentions
        .filter(|m| seen.insert(m.item))
        .take(n)
        .copied()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
