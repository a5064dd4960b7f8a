//! # Configuration
//!
//! Optional TOML configuration file. Every key has a default, so an absent
//! file is equivalent to an empty one.
//!
//! ```toml
//! [paths]
//! base_dir = "/var/log/game"
//! inventory_log = "inventory_logs.txt"
//! money_log = "money_logs.txt"
//! players = "db.json"
//! items = "items.xml"
//! combined_log = "combined_log.txt"
//! report = "output.txt"
//!
//! [report]
//! top_n = 10
//! ```
//!
//! Relative file paths are resolved against `base_dir`.

use gamelog_core::GamelogError;
use gamelog_core::primitives::{
    DEFAULT_COMBINED_LOG, DEFAULT_INVENTORY_LOG, DEFAULT_ITEMS_FILE, DEFAULT_MONEY_LOG,
    DEFAULT_PLAYERS_FILE, DEFAULT_REPORT, DEFAULT_TOP_N,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GamelogConfig {
    pub paths: PathsConfig,
    pub report: ReportConfig,
}

/// Input and output file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub base_dir: PathBuf,
    pub inventory_log: PathBuf,
    pub money_log: PathBuf,
    pub players: PathBuf,
    pub items: PathBuf,
    pub combined_log: PathBuf,
    pub report: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            inventory_log: PathBuf::from(DEFAULT_INVENTORY_LOG),
            money_log: PathBuf::from(DEFAULT_MONEY_LOG),
            players: PathBuf::from(DEFAULT_PLAYERS_FILE),
            items: PathBuf::from(DEFAULT_ITEMS_FILE),
            combined_log: PathBuf::from(DEFAULT_COMBINED_LOG),
            report: PathBuf::from(DEFAULT_REPORT),
        }
    }
}

/// Report tuning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Rows per ranking, also used for the query top list.
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Every file path, already joined with the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub inventory_log: PathBuf,
    pub money_log: PathBuf,
    pub players: PathBuf,
    pub items: PathBuf,
    pub combined_log: PathBuf,
    pub report: PathBuf,
}

impl PathsConfig {
    /// Join every file path with `base_dir`. Absolute paths are kept as-is.
    #[must_use]
    pub fn resolve(&self) -> ResolvedPaths {
        let join = |p: &Path| self.base_dir.join(p);
        ResolvedPaths {
            inventory_log: join(&self.inventory_log),
            money_log: join(&self.money_log),
            players: join(&self.players),
            items: join(&self.items),
            combined_log: join(&self.combined_log),
            report: join(&self.report),
        }
    }
}

impl GamelogConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, GamelogError> {
        toml::from_str(text).map_err(|e| GamelogError::Config(e.to_string()))
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, GamelogError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(GamelogError::Config(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_default() {
        let config = GamelogConfig::from_toml_str("").expect("parse");
        assert_eq!(config, GamelogConfig::default());
        assert_eq!(config.report.top_n, 10);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = GamelogConfig::from_toml_str(
            r#"
            [paths]
            base_dir = "/data"
            money_log = "coins.log"

            [report]
            top_n = 3
            "#,
        )
        .expect("parse");

        let resolved = config.paths.resolve();
        assert_eq!(resolved.money_log, PathBuf::from("/data/coins.log"));
        assert_eq!(resolved.inventory_log, PathBuf::from("/data/inventory_logs.txt"));
        assert_eq!(config.report.top_n, 3);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = GamelogConfig::from_toml_str("[paths]\nbogus = 1\n");
        assert!(matches!(result, Err(GamelogError::Config(_))));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = GamelogConfig::load(&dir.path().join("gamelog.toml")).expect("load");
        assert_eq!(config, GamelogConfig::default());
    }
}
