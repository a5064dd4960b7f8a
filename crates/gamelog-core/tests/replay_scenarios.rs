//! # Replay Scenario Tests (R0-R3)
//!
//! End-to-end checks of the engine on small, hand-written logs.
//!
//! ## Tiers
//! - R0: Tolerant Parsing
//! - R1: State Reconstruction
//! - R2: Chronological Merge
//! - R3: Report and Query

use gamelog_core::{
    ChronoMerger, ItemCatalog, ItemHoldings, ItemMention, ItemTypeId, Ledger, LogFile, LogSource,
    PlayerDirectory, PlayerId, StateReplayer, Summary, Timestamp, parse_inventory_line,
    parse_money_line, report::NO_DATA, write_merged,
};
use std::path::Path;

fn replay(inventory: &[&str], money: &[&str]) -> Ledger {
    let directory = PlayerDirectory::default();
    let mut replayer = StateReplayer::new(&directory);
    replayer.replay_inventory(inventory);
    replayer.replay_money(money);
    replayer.finish()
}

fn write_log(dir: &Path, name: &str, lines: &[&str]) -> LogFile {
    let path = dir.join(name);
    let mut body = lines.join("\n");
    body.push('\n');
    std::fs::write(&path, body).expect("write log");
    LogFile::new(path)
}

// =============================================================================
// TIER R0: TOLERANT PARSING
// =============================================================================

mod r0_tolerant_parsing {
    use super::*;

    /// R0.1: Garbage is unparseable for both grammars.
    #[test]
    fn garbage_is_unparseable() {
        assert!(parse_inventory_line("garbage no brackets or pipe").is_none());
        assert!(parse_money_line("garbage no brackets or pipe").is_none());
    }

    /// R0.2: A garbage line does not move any counter.
    #[test]
    fn garbage_contributes_nothing() {
        let ledger = replay(&["garbage no brackets or pipe"], &[]);
        assert!(ledger.players().is_empty());
        assert!(ledger.histogram().is_empty());
        assert!(ledger.mentions().is_empty());
        assert_eq!(ledger.stats().inventory_events, 0);
    }

    /// R0.3: One bad pair does not sink the line.
    #[test]
    fn partial_item_list_is_kept() {
        let ledger = replay(&["[1700000000]ITEM_ADD|7,(42, 3, oops, 1, 43, 2)"], &[]);
        let player = ledger.player(PlayerId(7)).expect("player");
        assert_eq!(player.quantity(ItemTypeId(42)), Some(3));
        assert_eq!(player.quantity(ItemTypeId(43)), Some(2));
        assert_eq!(ledger.mentions().len(), 2);
    }
}

// =============================================================================
// TIER R1: STATE RECONSTRUCTION
// =============================================================================

mod r1_state_reconstruction {
    use super::*;

    /// R1.1: Over-removal deletes the key; both events count.
    #[test]
    fn over_removal_deletes_item() {
        let ledger = replay(
            &[
                "[1700000000]ITEM_ADD|7,(42, 3)",
                "[1700000100]ITEM_REMOVE|7,(42, 5)",
            ],
            &[],
        );
        let player = ledger.player(PlayerId(7)).expect("player");

        assert!(!player.inventory().contains_key(&ItemTypeId(42)));
        assert_eq!(ledger.item_count(ItemTypeId(42)), 2);
        assert_eq!(
            ledger.mentions(),
            &[
                ItemMention::new(ItemTypeId(42), Timestamp(1_700_000_000)),
                ItemMention::new(ItemTypeId(42), Timestamp(1_700_000_100)),
            ]
        );
    }

    /// R1.2: Credits and debits net out.
    #[test]
    fn money_nets_out() {
        let ledger = replay(
            &[],
            &[
                "1700000000|7|MONEY_ADD,500,bonus",
                "1700000050|7|MONEY_REMOVE,200,tax",
            ],
        );
        assert_eq!(ledger.player(PlayerId(7)).expect("player").money(), 300);
    }

    /// R1.3: Seen interval spans both sources regardless of replay order.
    #[test]
    fn seen_interval_spans_sources() {
        let ledger = replay(
            &["[1700000500]ITEM_ADD|7,(1, 1)"],
            &["1700000100|7|MONEY_ADD,1", "1700000900|7|MONEY_ADD,1"],
        );
        let player = ledger.player(PlayerId(7)).expect("player");
        assert_eq!(player.first_seen(), Some(Timestamp(1_700_000_100)));
        assert_eq!(player.last_seen(), Some(Timestamp(1_700_000_900)));
    }
}

// =============================================================================
// TIER R2: CHRONOLOGICAL MERGE
// =============================================================================

mod r2_chronological_merge {
    use super::*;

    /// R2.1: Missing money log means no money lines in the merge.
    #[test]
    fn missing_money_log_merges_inventory_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let inventory = write_log(
            dir.path(),
            "inventory_logs.txt",
            &["[1700000100]ITEM_ADD|7,(42, 3)", "[1700000000]ITEM_ADD|8,(1, 1)"],
        );
        let money = LogFile::new(dir.path().join("money_logs.txt"));

        let merged = ChronoMerger::merge_files(&inventory, &money).expect("merge");

        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|l| l.source == LogSource::Inventory));
        assert_eq!(merged[0].timestamp, Timestamp(1_700_000_000));
    }

    /// R2.2: The merge re-reads files independently of the replay.
    #[test]
    fn merge_and_replay_read_the_same_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let inventory = write_log(
            dir.path(),
            "inventory_logs.txt",
            &["[1700000000]ITEM_ADD|7,(42, 3)", "not a line"],
        );
        let money = write_log(
            dir.path(),
            "money_logs.txt",
            &["1700000000|7|MONEY_ADD,500,bonus", "", "1699999999|7|MONEY_REMOVE,1,fee"],
        );

        let directory = PlayerDirectory::default();
        let mut replayer = StateReplayer::new(&directory);
        replayer.replay_inventory_file(&inventory).expect("inventory");
        replayer.replay_money_file(&money).expect("money");
        let ledger = replayer.finish();

        let merged = ChronoMerger::merge_files(&inventory, &money).expect("merge");

        let stats = ledger.stats();
        assert_eq!(merged.len(), stats.inventory_events + stats.money_events);
        let sources: Vec<LogSource> = merged.iter().map(|l| l.source).collect();
        assert_eq!(
            sources,
            vec![LogSource::Money, LogSource::Inventory, LogSource::Money]
        );

        let mut out = Vec::new();
        write_merged(&merged, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.lines().nth(1).is_some_and(|l| l.ends_with("7 | ITEM_ADD (42, 3)")));
        assert!(text.lines().nth(2).is_some_and(|l| l.ends_with("7 | MONEY_ADD | 500 | bonus")));
    }
}

// =============================================================================
// TIER R3: REPORT AND QUERY
// =============================================================================

mod r3_report_and_query {
    use super::*;

    /// R3.1: No money events means the player ranking is empty.
    #[test]
    fn empty_money_log_prints_placeholder() {
        let ledger = replay(&["[1700000000]ITEM_ADD|7,(42, 3)"], &[]);
        let text = Summary::from_ledger(&ledger, 10).render(&ItemCatalog::default());

        assert!(text.contains(&format!("Top 10 players by money:\n{}\n", NO_DATA)));
        assert!(text.contains("Item 42, 1\n"));
    }

    /// R3.2: Holdings reflect the replayed inventory.
    #[test]
    fn holdings_follow_replay() {
        let ledger = replay(
            &[
                "[1700000000]ITEM_ADD|7,(42, 3)",
                "[1700000001]ITEM_ADD|8,(42, 4)",
                "[1700000002]ITEM_REMOVE|7,(42, 1)",
            ],
            &[],
        );
        let holdings = ItemHoldings::compute(&ledger, &ItemCatalog::default(), ItemTypeId(42), 10);

        assert_eq!(holdings.total, 6);
        assert_eq!(holdings.holders, 2);
        assert_eq!(holdings.top[0].player, PlayerId(8));
    }
}
