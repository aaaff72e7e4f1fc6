//! Core data types for the CFS card engine
//!
//! Defines the host snapshot (`StateBag`) and every value derived from it.
//! Derived values are rebuilt from a snapshot on demand and never patched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::slots;
use crate::error::{CfsError, Result};

/// One entity record as published by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    /// Raw state string, e.g. "21.5", "PLA" or "unavailable"
    pub state: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, Value>,
}

impl EntityState {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            attributes: serde_json::Map::new(),
        }
    }
}

/// Snapshot of the host's entity namespace, keyed by entity id
///
/// Iteration follows entity id order so every scan over the same snapshot
/// visits entities identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBag {
    entities: BTreeMap<String, EntityState>,
}

impl StateBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from the host's JSON shape:
    /// `{"sensor.x": {"state": "21.5", "attributes": {...}}, ...}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(CfsError::snapshot("expected an object keyed by entity id"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Insert or replace an entity record
    pub fn insert(&mut self, entity_id: impl Into<String>, state: EntityState) {
        self.entities.insert(entity_id.into(), state);
    }

    /// Builder-style insert of a bare state string
    pub fn with_state(mut self, entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        self.insert(entity_id, EntityState::new(state));
        self
    }

    pub fn get(&self, entity_id: &str) -> Option<&EntityState> {
        self.entities.get(entity_id)
    }

    /// Raw state string of an entity, if the entity exists
    pub fn raw_state(&self, entity_id: &str) -> Option<&str> {
        self.get(entity_id).map(|e| e.state.as_str())
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StateBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = StateBag::new();
        for (id, state) in iter {
            bag.insert(id, EntityState::new(state));
        }
        bag
    }
}

/// A resolved sensor value: numbers are coerced, everything else stays text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// One material slot of a box
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlotRecord {
    /// Remaining material, 0-100
    pub percent: Option<FieldValue>,
    /// Material type, e.g. "PLA"
    #[serde(rename = "type")]
    pub material_type: Option<FieldValue>,
    pub name: Option<FieldValue>,
    /// Normalized `#rrggbb`
    pub color: Option<String>,
    pub min_temp: Option<FieldValue>,
    pub max_temp: Option<FieldValue>,
    pub selected: Option<FieldValue>,
    pub state: Option<FieldValue>,
}

impl SlotRecord {
    /// Numeric fill level, if the percent sensor reported a number
    pub fn percent_value(&self) -> Option<f64> {
        self.percent.as_ref().and_then(FieldValue::as_number)
    }

    /// A slot is the active one only when its sensor reads exactly 1
    pub fn is_selected(&self) -> bool {
        self.selected.as_ref().and_then(FieldValue::as_number) == Some(1.0)
    }

    /// True when no field resolved at all
    pub fn is_empty(&self) -> bool {
        *self == SlotRecord::default()
    }
}

/// Fully resolved data for one (printer, box) selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Reading {
    pub temperature: Option<FieldValue>,
    pub humidity: Option<FieldValue>,
    pub slots: [SlotRecord; slots::COUNT],
}

/// One discovered printer and the boxes attached to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Device key as it appears inside entity ids
    pub key: String,
    /// Human readable label derived from the key
    pub label: String,
    /// Box indices, ascending and unique
    pub boxes: Vec<u64>,
}

impl CatalogEntry {
    pub fn has_box(&self, index: u64) -> bool {
        self.boxes.binary_search(&index).is_ok()
    }

    /// Lowest box index, if any box was observed
    pub fn first_box(&self) -> Option<u64> {
        self.boxes.first().copied()
    }
}

/// Discovered printers, sorted by label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Entries must already be sorted and unique by key; `discover` guarantees both.
    pub(crate) fn from_sorted(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn first(&self) -> Option<&CatalogEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
