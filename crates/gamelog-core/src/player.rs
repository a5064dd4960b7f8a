//! # Player State
//!
//! Per-player record rebuilt by replaying the logs.
//!
//! The inventory is sparse: a key is present only while its quantity is
//! strictly positive. Both `add_item` and `remove_item` funnel through one
//! adjustment routine that deletes the key when the quantity drops to zero
//! or below.

use crate::{ItemTypeId, PlayerId, Timestamp};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mutable state of a single player, owned by the replayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    id: PlayerId,
    name: String,
    money: i64,
    inventory: BTreeMap<ItemTypeId, i64>,
    first_seen: Option<Timestamp>,
    last_seen: Option<Timestamp>,
    money_events: u64,
}

impl PlayerState {
    /// Create an empty player with a resolved display name.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            money: 0,
            inventory: BTreeMap::new(),
            first_seen: None,
            last_seen: None,
            money_events: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance. May be negative.
    #[must_use]
    pub fn money(&self) -> i64 {
        self.money
    }

    /// Items held, every quantity strictly positive.
    #[must_use]
    pub fn inventory(&self) -> &BTreeMap<ItemTypeId, i64> {
        &self.inventory
    }

    /// Quantity held of one item, `None` if the player holds none.
    #[must_use]
    pub fn quantity(&self, item: ItemTypeId) -> Option<i64> {
        self.inventory.get(&item).copied()
    }

    #[must_use]
    pub fn first_seen(&self) -> Option<Timestamp> {
        self.first_seen
    }

    #[must_use]
    pub fn last_seen(&self) -> Option<Timestamp> {
        self.last_seen
    }

    /// Whether any money event (recognized or not) touched this player.
    #[must_use]
    pub fn has_money_activity(&self) -> bool {
        self.money_events > 0
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Widen the seen interval to include `timestamp`.
    pub fn update_seen(&mut self, timestamp: Timestamp) {
        self.first_seen = Some(self.first_seen.map_or(timestamp, |t| t.min(timestamp)));
        self.last_seen = Some(self.last_seen.map_or(timestamp, |t| t.max(timestamp)));
    }

    /// Add `amount` of `item`.
    pub fn add_item(&mut self, item: ItemTypeId, amount: i64) {
        self.adjust_item(item, amount);
    }

    /// Remove `amount` of `item`. Removing more than is held drops the key.
    pub fn remove_item(&mut self, item: ItemTypeId, amount: i64) {
        self.adjust_item(item, amount.saturating_neg());
    }

    fn adjust_item(&mut self, item: ItemTypeId, delta: i64) {
        let quantity = self.inventory.entry(item).or_insert(0);
        *quantity = quantity.saturating_add(delta);
        if *quantity <= 0 {
            self.inventory.remove(&item);
        }
    }

    /// Count one money event against this player, whatever its action.
    pub fn record_money_event(&mut self) {
        self.money_events = self.money_events.saturating_add(1);
    }

    /// Increase the balance.
    pub fn credit(&mut self, amount: i64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Decrease the balance. The balance may go negative.
    pub fn debit(&mut self, amount: i64) {
        self.money = self.money.saturating_sub(amount);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(PlayerId(7), "Player_7")
    }

    #[test]
    fn add_then_remove_to_zero_drops_key() {
        let mut p = player();
        p.add_item(ItemTypeId(42), 3);
        assert_eq!(p.quantity(ItemTypeId(42)), Some(3));

        p.remove_item(ItemTypeId(42), 3);
        assert_eq!(p.quantity(ItemTypeId(42)), None);
        assert!(p.inventory().is_empty());
    }

    #[test]
    fn over_removal_drops_key() {
        let mut p = player();
        p.add_item(ItemTypeId(42), 3);
        p.remove_item(ItemTypeId(42), 5);
        assert!(!p.inventory().contains_key(&ItemTypeId(42)));

        // The deficit is not remembered.
        p.add_item(ItemTypeId(42), 1);
        assert_eq!(p.quantity(ItemTypeId(42)), Some(1));
    }

    #[test]
    fn removing_unknown_item_stores_nothing() {
        let mut p = player();
        p.remove_item(ItemTypeId(1), 4);
        assert!(p.inventory().is_empty());
    }

    #[test]
    fn update_seen_widens_interval() {
        let mut p = player();
        assert_eq!(p.first_seen(), None);

        p.update_seen(Timestamp(200));
        assert_eq!(p.first_seen(), Some(Timestamp(200)));
        assert_eq!(p.last_seen(), Some(Timestamp(200)));

        p.update_seen(Timestamp(100));
        p.update_seen(Timestamp(300));
        p.update_seen(Timestamp(250));
        assert_eq!(p.first_seen(), Some(Timestamp(100)));
        assert_eq!(p.last_seen(), Some(Timestamp(300)));
    }

    #[test]
    fn money_can_go_negative() {
        let mut p = player();
        p.credit(50);
        p.debit(80);
        assert_eq!(p.money(), -30);
    }

    #[test]
    fn money_activity_is_tracked_separately_from_balance() {
        let mut p = player();
        assert!(!p.has_money_activity());
        p.record_money_event();
        assert!(p.has_money_activity());
        assert_eq!(p.money(), 0);
    }
}
