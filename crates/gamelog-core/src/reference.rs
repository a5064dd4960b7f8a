//! # Reference Stores
//!
//! Display-name lookups for players and items.
//!
//! - Player directory: JSON, `{"players": [{"id": 7, "name": "Alice"}]}`
//! - Item catalog: XML, a root element holding `<item>` entries with
//!   `<item_type_id>` and `<item_name>` children
//!
//! Both are plain key → string maps with a synthesized fallback name for
//! unknown ids. Loading can fail; callers are expected to log the error and
//! continue with an empty store.

use crate::{GamelogError, ItemTypeId, PlayerId};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// PLAYER DIRECTORY
// =============================================================================

#[derive(Debug, Deserialize)]
struct PlayerDocument {
    players: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    id: i64,
    name: String,
}

/// Player id → display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDirectory {
    names: BTreeMap<PlayerId, String>,
}

impl PlayerDirectory {
    /// Build a directory from explicit entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PlayerId, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// Parse the JSON player database.
    ///
    /// The document must be a `{"players": [...]}` object. Entries lacking an
    /// integer `id` or a string `name` are dropped individually.
    pub fn from_json_str(json: &str) -> Result<Self, GamelogError> {
        let document: PlayerDocument = serde_json::from_str(json)
            .map_err(|e| GamelogError::Reference(format!("Player directory: {}", e)))?;

        Ok(Self::from_entries(document.players.into_iter().filter_map(
            |value| {
                serde_json::from_value::<PlayerRecord>(value)
                    .ok()
                    .map(|record| (PlayerId(record.id), record.name))
            },
        )))
    }

    /// Read and parse the JSON player database at `path`.
    pub fn load(path: &Path) -> Result<Self, GamelogError> {
        let json = read_reference(path)?;
        Self::from_json_str(&json)
    }

    /// The stored name, if any.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// The stored name, or `Player_<id>`.
    #[must_use]
    pub fn display_name(&self, id: PlayerId) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Player_{}", id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// ITEM CATALOG
// =============================================================================

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(rename = "item", default)]
    items: Vec<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    item_type_id: Option<String>,
    #[serde(default)]
    item_name: Option<String>,
}

impl CatalogRecord {
    /// Entries without an integer id or without a non-blank name are dropped.
    fn into_entry(self) -> Option<(ItemTypeId, String)> {
        let id = self.item_type_id?.trim().parse().ok()?;
        let name = self.item_name?.trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some((ItemTypeId(id), name))
    }
}

/// Item type id → display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    names: BTreeMap<ItemTypeId, String>,
}

impl ItemCatalog {
    /// Build a catalog from explicit entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (ItemTypeId, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// Parse the XML item catalog.
    pub fn from_xml_str(xml: &str) -> Result<Self, GamelogError> {
        let document: CatalogDocument = quick_xml::de::from_str(xml)
            .map_err(|e| GamelogError::Reference(format!("Item catalog: {}", e)))?;

        Ok(Self::from_entries(
            document
                .items
                .into_iter()
                .filter_map(CatalogRecord::into_entry),
        ))
    }

    /// Read and parse the XML item catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, GamelogError> {
        let xml = read_reference(path)?;
        Self::from_xml_str(&xml)
    }

    /// The stored name, if any.
    #[must_use]
    pub fn get(&self, id: ItemTypeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// The stored name, or `Item <id>`.
    #[must_use]
    pub fn display_name(&self, id: ItemTypeId) -> String {
        self.get(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Item {}", id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn read_reference(path: &Path) -> Result<String, GamelogError> {
    std::fs::read_to_string(path)
        .map_err(|e| GamelogError::Reference(format!("Cannot read {}: {}", path.display(), e)))
}

// =============================================================================
// TESTS
// =============================================================================
