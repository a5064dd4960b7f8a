//! # Chronological Merge
//!
//! Re-reads both logs and interleaves them into one time-ordered stream of
//! formatted lines. This pass never looks at the replayer's state.
//!
//! Ordering key is `(timestamp, source rank)` with inventory before money.
//! The sort is stable, so lines with an identical key keep collection order:
//! inventory lines in file order, then money lines in file order.
//!
//! ## Output formats
//!
//! ```text
//! [23-11-14 22:13:20] 7 | ITEM_ADD (42, 3) (43, 1)
//! [23-11-14 22:13:20] 7 | MONEY_ADD | 500 | bonus
//! ```

use crate::parser::LogRecord;
use crate::{GamelogError, InventoryEvent, LogFile, LogSource, MoneyEvent, Timestamp};
use std::io::Write;

/// A log event rendered as one line of the combined log.
pub trait MergeFormat: LogRecord {
    /// Render the event without the trailing newline.
    fn merged_line(&self) -> String;
}

impl MergeFormat for InventoryEvent {
    fn merged_line(&self) -> String {
        let items = self
            .items
            .iter()
            .map(|d| format!("({}, {})", d.item, d.amount))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{} {} | {} {}",
            self.timestamp,
            self.player,
            self.action.as_token(),
            items
        )
    }
}

impl MergeFormat for MoneyEvent {
    fn merged_line(&self) -> String {
        format!(
            "{} {} | {} | {} | {}",
            self.timestamp,
            self.player,
            self.action.as_token(),
            self.amount,
            self.reason
        )
    }
}

/// One line of the combined log with its sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLine {
    pub timestamp: Timestamp,
    pub source: LogSource,
    pub text: String,
}

impl MergedLine {
    /// Build a merged line from any decoded event.
    pub fn from_event<E: MergeFormat>(event: &E) -> Self {
        Self {
            timestamp: event.timestamp(),
            source: E::SOURCE,
            text: event.merged_line(),
        }
    }

    /// `(timestamp, source rank)`.
    #[must_use]
    pub fn sort_key(&self) -> (Timestamp, u8) {
        (self.timestamp, self.source.rank())
    }
}

/// Collects lines from both logs, then sorts them once.
#[derive(Debug, Default)]
pub struct ChronoMerger {
    entries: Vec<MergedLine>,
}

impl ChronoMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and collect one raw line of type `E`. Returns whether it decoded.
    pub fn push_line<E: MergeFormat>(&mut self, line: &str) -> bool {
        match E::parse(line.trim()) {
            Some(event) => {
                self.entries.push(MergedLine::from_event(&event));
                true
            }
            None => false,
        }
    }

    pub fn push_inventory_line(&mut self, line: &str) -> bool {
        self.push_line::<InventoryEvent>(line)
    }

    pub fn push_money_line(&mut self, line: &str) -> bool {
        self.push_line::<MoneyEvent>(line)
    }

    /// Read a whole log of type `E` from disk.
    pub fn collect_file<E: MergeFormat>(&mut self, log: &LogFile) -> Result<(), GamelogError> {
        for line in log.lines()? {
            self.push_line::<E>(&line?);
        }
        Ok(())
    }

    /// Number of lines collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable-sort everything collected by `(timestamp, source rank)`.
    #[must_use]
    pub fn finish(self) -> Vec<MergedLine> {
        let mut entries = self.entries;
        entries.sort_by_key(MergedLine::sort_key);
        entries
    }

    /// Convenience: merge two in-memory logs.
    pub fn merge<I, M, S, T>(inventory: I, money: M) -> Vec<MergedLine>
    where
        I: IntoIterator<Item = S>,
        M: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut merger = Self::new();
        for line in inventory {
            merger.push_inventory_line(line.as_ref());
        }
        for line in money {
            merger.push_money_line(line.as_ref());
        }
        merger.finish()
    }

    /// Convenience: merge the two log files on disk.
    pub fn merge_files(
        inventory: &LogFile,
        money: &LogFile,
    ) -> Result<Vec<MergedLine>, GamelogError> {
        let mut merger = Self::new();
        merger.collect_file::<InventoryEvent>(inventory)?;
        merger.collect_file::<MoneyEvent>(money)?;
        Ok(merger.finish())
    }
}

/// Write merged lines, one per line, newline-terminated.
pub fn write_merged<W: Write>(lines: &[MergedLine], out: &mut W) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line.text)?;
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
