//! # State Replayer
//!
//! Folds both logs into per-player state.
//!
//! Replay order is source order, not time order: the whole inventory log is
//! applied first, then the whole money log, each in on-disk line order.
//!
//! ## Per inventory event
//!
//! 1. Get or create the player (name from the directory, else `Player_<id>`)
//! 2. Widen the player's seen interval
//! 3. For each item pair: bump the histogram, append a mention, and move
//!    the items only if the action is `ITEM_ADD` / `ITEM_REMOVE`
//!
//! ## Per money event
//!
//! 1. Get or create the player, widen the seen interval
//! 2. Credit on `MONEY_ADD`, debit on `MONEY_REMOVE`, nothing otherwise

use crate::parser::{parse_inventory_line, parse_money_line};
use crate::{
    GamelogError, InventoryAction, InventoryEvent, ItemMention, ItemTypeId, LogFile, MoneyAction,
    MoneyEvent, PlayerDirectory, PlayerId, PlayerState, Timestamp,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-source line counters for one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    /// Inventory lines that decoded into an event.
    pub inventory_events: usize,
    /// Non-blank inventory lines that did not decode.
    pub inventory_skipped: usize,
    /// Money lines that decoded into an event.
    pub money_events: usize,
    /// Non-blank money lines that did not decode.
    pub money_skipped: usize,
}

/// Everything a replay reconstructs. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    players: BTreeMap<PlayerId, PlayerState>,
    /// Player ids in the order they were first created.
    player_order: Vec<PlayerId>,
    histogram: BTreeMap<ItemTypeId, u64>,
    /// Item ids in the order they were first mentioned.
    item_order: Vec<ItemTypeId>,
    mentions: Vec<ItemMention>,
    stats: ReplayStats,
}

impl Ledger {
    /// All players seen in either log.
    #[must_use]
    pub fn players(&self) -> &BTreeMap<PlayerId, PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    /// Players in first-appearance order: inventory log first, then money log.
    pub fn players_by_appearance(&self) -> impl Iterator<Item = &PlayerState> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
    }

    /// Item id → number of occurrences across all inventory events.
    #[must_use]
    pub fn histogram(&self) -> &BTreeMap<ItemTypeId, u64> {
        &self.histogram
    }

    /// Occurrences of one item, zero if never mentioned.
    #[must_use]
    pub fn item_count(&self, item: ItemTypeId) -> u64 {
        self.histogram.get(&item).copied().unwrap_or(0)
    }

    /// `(item, count)` in the order each item was first mentioned.
    pub fn items_by_appearance(&self) -> impl Iterator<Item = (ItemTypeId, u64)> {
        self.item_order
            .iter()
            .map(|&item| (item, self.item_count(item)))
    }

    /// Every item occurrence in file-read order.
    #[must_use]
    pub fn mentions(&self) -> &[ItemMention] {
        &self.mentions
    }

    #[must_use]
    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Whether any inventory event mentioned at least one item.
    #[must_use]
    pub fn has_item_activity(&self) -> bool {
        !self.histogram.is_empty()
    }
}

/// Builds a [`Ledger`] one line or event at a time.
pub struct StateReplayer<'a> {
    directory: &'a PlayerDirectory,
    ledger: Ledger,
}

impl<'a> StateReplayer<'a> {
    /// Start an empty replay resolving player names through `directory`.
    #[must_use]
    pub fn new(directory: &'a PlayerDirectory) -> Self {
        Self {
            directory,
            ledger: Ledger::default(),
        }
    }

    /// Feed one raw inventory line. Returns whether it decoded.
    ///
    /// Blank lines are ignored without counting as skipped.
    pub fn ingest_inventory_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        match parse_inventory_line(line) {
            Some(event) => {
                self.apply_inventory(&event);
                true
            }
            None => {
                self.ledger.stats.inventory_skipped += 1;
                false
            }
        }
    }

    /// Feed one raw money line. Returns whether it decoded.
    pub fn ingest_money_line(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        match parse_money_line(line) {
            Some(event) => {
                self.apply_money(&event);
                true
            }
            None => {
                self.ledger.stats.money_skipped += 1;
                false
            }
        }
    }

    /// Feed a sequence of raw inventory lines in order.
    pub fn replay_inventory<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.ingest_inventory_line(line.as_ref());
        }
    }

    /// Feed a sequence of raw money lines in order.
    pub fn replay_money<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.ingest_money_line(line.as_ref());
        }
    }

    /// Read an inventory log from disk in one pass.
    pub fn replay_inventory_file(&mut self, log: &LogFile) -> Result<(), GamelogError> {
        for line in log.lines()? {
            self.ingest_inventory_line(&line?);
        }
        Ok(())
    }

    /// Read a money log from disk in one pass.
    pub fn replay_money_file(&mut self, log: &LogFile) -> Result<(), GamelogError> {
        for line in log.lines()? {
            self.ingest_money_line(&line?);
        }
        Ok(())
    }

    /// Apply one decoded inventory event.
    pub fn apply_inventory(&mut self, event: &InventoryEvent) {
        self.ledger.stats.inventory_events += 1;

        let Ledger {
            players,
            player_order,
            histogram,
            item_order,
            mentions,
            ..
        } = &mut self.ledger;

        let player = touch_player(
            players,
            player_order,
            self.directory,
            event.player,
            event.timestamp,
        );

        for delta in &event.items {
            let count = histogram.entry(delta.item).or_insert_with(|| {
                item_order.push(delta.item);
                0
            });
            *count += 1;
            mentions.push(ItemMention::new(delta.item, event.timestamp));

            match event.action {
                InventoryAction::Add => player.add_item(delta.item, delta.amount),
                InventoryAction::Remove => player.remove_item(delta.item, delta.amount),
                InventoryAction::Other(_) => {}
            }
        }
    }

    /// Apply one decoded money event.
    pub fn apply_money(&mut self, event: &MoneyEvent) {
        self.ledger.stats.money_events += 1;

        let player = touch_player(
            &mut self.ledger.players,
            &mut self.ledger.player_order,
            self.directory,
            event.player,
            event.timestamp,
        );
        player.record_money_event();

        match event.action {
            MoneyAction::Add => player.credit(event.amount),
            MoneyAction::Remove => player.debit(event.amount),
            MoneyAction::Other(_) => {}
        }
    }

    /// The state built so far.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Finish the replay.
    #[must_use]
    pub fn finish(self) -> Ledger {
        self.ledger
    }
}

/// Get or lazily create a player, then record that it was seen at `timestamp`.
fn touch_player<'p>(
    players: &'p mut BTreeMap<PlayerId, PlayerState>,
    order: &mut Vec<PlayerId>,
    directory: &PlayerDirectory,
    id: PlayerId,
    timestamp: Timestamp,
) -> &'p mut PlayerState {
    let player = players.entry(id).or_insert_with(|| {
        order.push(id);
        PlayerState::new(id, directory.display_name(id))
    });
    player.update_seen(timestamp);
    player
}

// =============================================================================
// TESTS
// =============================================================================
