//! # Line Parsers
//!
//! Best-effort decoders for the two log grammars.
//!
//! Neither parser ever fails loudly: a line either decodes into an event or
//! yields `None` and the caller skips it. Inside an inventory line, a single
//! malformed item pair is dropped while the rest of the line still counts.
//!
//! ## Inventory grammar
//!
//! ```text
//! [1700000000]ITEM_ADD|7,(42, 3, 43, 1)
//!  ^timestamp ^action  ^player ^items (optional parentheses)
//! ```
//!
//! ## Money grammar
//!
//! ```text
//! 1700000000|7|MONEY_ADD,500,quest reward, chapter 2
//! ^timestamp ^player ^action ^amount ^reason (commas preserved)
//! ```

use crate::{
    InventoryAction, InventoryEvent, ItemDelta, ItemTypeId, LogSource, MoneyAction, MoneyEvent,
    PlayerId, Timestamp,
};

/// A log line type that can be decoded from one raw line.
pub trait LogRecord: Sized {
    /// Which log this record type comes from.
    const SOURCE: LogSource;

    /// Decode one raw line, or `None` if it is not parseable.
    fn parse(line: &str) -> Option<Self>;

    /// When the event happened.
    fn timestamp(&self) -> Timestamp;
}

impl LogRecord for InventoryEvent {
    const SOURCE: LogSource = LogSource::Inventory;

    fn parse(line: &str) -> Option<Self> {
        parse_inventory_line(line)
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl LogRecord for MoneyEvent {
    const SOURCE: LogSource = LogSource::Money;

    fn parse(line: &str) -> Option<Self> {
        parse_money_line(line)
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

// =============================================================================
// INVENTORY
// =============================================================================

/// Decode one inventory-log line.
pub fn parse_inventory_line(line: &str) -> Option<InventoryEvent> {
    if !line.contains(']') || !line.contains('|') {
        return None;
    }

    let close = line.find(']')?;
    // The first character is the opening marker, whatever it is.
    let marker_len = line.chars().next()?.len_utf8();
    if close < marker_len {
        return None;
    }
    let timestamp = parse_timestamp(&line[marker_len..close])?;

    let rest = line[close + 1..].trim();
    let (action, player_and_items) = rest.split_once('|')?;
    let action = InventoryAction::from_token(action.trim());

    let (player, items_blob) = player_and_items.trim().split_once(',')?;
    let player = PlayerId(parse_int(player)?);
    let items = parse_item_pairs(strip_parens(items_blob.trim()));

    Some(InventoryEvent {
        timestamp,
        action,
        player,
        items,
    })
}

/// Strip exactly one layer of `(...)`.
fn strip_parens(blob: &str) -> &str {
    blob.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(blob)
}

/// Read alternating `item, amount` tokens. Bad pairs and a trailing
/// unpaired token are dropped.
fn parse_item_pairs(blob: &str) -> Vec<ItemDelta> {
    let tokens: Vec<&str> = blob.split(',').collect();
    tokens
        .chunks_exact(2)
        .filter_map(|pair| {
            let item = parse_int(pair[0])?;
            let amount = parse_int(pair[1])?;
            Some(ItemDelta::new(ItemTypeId(item), amount))
        })
        .collect()
}

// =============================================================================
// MONEY
// =============================================================================

/// Decode one money-log line.
pub fn parse_money_line(line: &str) -> Option<MoneyEvent> {
    let mut fields = line.trim().split('|');
    let (Some(timestamp), Some(player), Some(action_blob)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return None;
    };

    let timestamp = parse_timestamp(timestamp)?;
    let player = PlayerId(parse_int(player)?);

    let mut parts = action_blob.splitn(3, ',');
    let action = MoneyAction::from_token(parts.next()?.trim());
    let amount = parse_int(parts.next()?)?;
    let reason = parts.next().unwrap_or_default().to_string();

    Some(MoneyEvent {
        timestamp,
        action,
        player,
        amount,
        reason,
    })
}

// =============================================================================
// SHARED
// =============================================================================

fn parse_int(token: &str) -> Option<i64> {
    token.trim().parse().ok()
}

fn parse_timestamp(token: &str) -> Option<Timestamp> {
    Timestamp::from_unix(parse_int(token)?)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(item: i64, amount: i64) -> ItemDelta {
        ItemDelta::new(ItemTypeId(item), amount)
    }

    #[test]
    fn inventory_parses_parenthesized_items() {
        let event = parse_inventory_line("[1700000000]ITEM_ADD|7,(42, 3, 43, 1)").expect("parse");

        assert_eq!(event.timestamp, Timestamp(1_700_000_000));
        assert_eq!(event.action, InventoryAction::Add);
        assert_eq!(event.player, PlayerId(7));
        assert_eq!(event.items, vec![delta(42, 3), delta(43, 1)]);
    }

    #[test]
    fn inventory_parses_bare_items() {
        let event = parse_inventory_line("[1700000000] ITEM_REMOVE | 9, 5, 2").expect("parse");

        assert_eq!(event.action, InventoryAction::Remove);
        assert_eq!(event.player, PlayerId(9));
        assert_eq!(event.items, vec![delta(5, 2)]);
    }

    #[test]
    fn inventory_rejects_missing_delimiters() {
        assert!(parse_inventory_line("garbage no brackets or pipe").is_none());
        assert!(parse_inventory_line("[1700000000]ITEM_ADD 7,(42, 3)").is_none());
        assert!(parse_inventory_line("1700000000 ITEM_ADD|7,(42, 3)").is_none());
    }

    #[test]
    fn inventory_rejects_bad_header_fields() {
        // non-integer timestamp
        assert!(parse_inventory_line("[soon]ITEM_ADD|7,(42, 3)").is_none());
        // past year 9999
        assert!(parse_inventory_line("[300000000000]ITEM_ADD|7,(42, 3)").is_none());
        // no comma after player id
        assert!(parse_inventory_line("[1700000000]ITEM_ADD|7").is_none());
        // non-integer player id
        assert!(parse_inventory_line("[1700000000]ITEM_ADD|bob,(42, 3)").is_none());
        // closing bracket is the marker itself
        assert!(parse_inventory_line("]1700000000|ITEM_ADD|7,(42, 3)").is_none());
        // pipe only before the bracket
        assert!(parse_inventory_line("|[1700000000]ITEM_ADD 7,(42, 3)").is_none());
    }

    #[test]
    fn inventory_skips_bad_pairs_individually() {
        let event =
            parse_inventory_line("[1700000000]ITEM_ADD|7,(42, x, 43, 2, 44)").expect("parse");
        assert_eq!(event.items, vec![delta(43, 2)]);
    }

    #[test]
    fn inventory_accepts_empty_item_list() {
        let event = parse_inventory_line("[1700000000]ITEM_ADD|7,()").expect("parse");
        assert!(event.items.is_empty());
    }

    #[test]
    fn inventory_keeps_unknown_action_token() {
        let event = parse_inventory_line("[1700000000]ITEM_TRADE|7,(42, 1)").expect("parse");
        assert_eq!(event.action, InventoryAction::Other("ITEM_TRADE".to_string()));
        assert_eq!(event.items.len(), 1);
    }

    #[test]
    fn inventory_tolerates_multibyte_marker() {
        let event = parse_inventory_line("«1700000000]ITEM_ADD|7,(42, 3)").expect("parse");
        assert_eq!(event.player, PlayerId(7));
    }

    #[test]
    fn money_parses_all_fields() {
        let event = parse_money_line("1700000000|7|MONEY_ADD,500,bonus").expect("parse");

        assert_eq!(event.timestamp, Timestamp(1_700_000_000));
        assert_eq!(event.player, PlayerId(7));
        assert_eq!(event.action, MoneyAction::Add);
        assert_eq!(event.amount, 500);
        assert_eq!(event.reason, "bonus");
    }

    #[test]
    fn money_reason_keeps_commas() {
        let event =
            parse_money_line("1700000000|7|MONEY_REMOVE,20,shop, potion, x2").expect("parse");
        assert_eq!(event.action, MoneyAction::Remove);
        assert_eq!(event.reason, "shop, potion, x2");
    }

    #[test]
    fn money_reason_defaults_to_empty() {
        let event = parse_money_line("1700000000|7|MONEY_ADD,5").expect("parse");
        assert_eq!(event.reason, "");
    }

    #[test]
    fn money_ignores_extra_fields() {
        let event = parse_money_line("1700000000|7|MONEY_ADD,5,a|b").expect("parse");
        assert_eq!(event.reason, "a");
    }

    #[test]
    fn money_rejects_malformed_lines() {
        assert!(parse_money_line("1700000000|7").is_none());
        assert!(parse_money_line("1700000000|7|MONEY_ADD").is_none());
        assert!(parse_money_line("1700000000|7|MONEY_ADD,lots").is_none());
        assert!(parse_money_line("later|7|MONEY_ADD,5").is_none());
        assert!(parse_money_line("300000000000|7|MONEY_ADD,5").is_none());
        assert!(parse_money_line("garbage no brackets or pipe").is_none());
    }

    #[test]
    fn money_keeps_unknown_action_token() {
        let event = parse_money_line("1700000000|7|MONEY_FREEZE,5,audit").expect("parse");
        assert_eq!(event.action, MoneyAction::Other("MONEY_FREEZE".to_string()));
    }

    #[test]
    fn log_record_dispatches_by_source() {
        assert_eq!(InventoryEvent::SOURCE, LogSource::Inventory);
        assert_eq!(MoneyEvent::SOURCE, LogSource::Money);

        let event = <MoneyEvent as LogRecord>::parse("5|1|MONEY_ADD,1").expect("parse");
        assert_eq!(LogRecord::timestamp(&event), Timestamp(5));
    }
}
