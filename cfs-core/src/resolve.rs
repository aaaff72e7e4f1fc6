//! Reading resolution for one (printer, box) selection
//!
//! Every field is looked up through an ordered list of entity id templates;
//! the first template naming an existing entity supplies the value. Adding a
//! naming convention means adding a row to `FIELD_KEYS` or `SLOT_SPELLINGS`.
//!
//! Device keys are spliced into the ids literally and compared by exact
//! string equality, so characters like `.` or `+` in a key carry no pattern
//! meaning.

use tracing::{trace, Level};

use crate::constants::{entity, slots};
use crate::data::{coerce_state, is_sentinel, normalize_hex, Reading, SlotRecord, StateBag};

/// Builds an entity id from (device key, box index, field name)
type KeyBuilder = fn(&str, u64, &str) -> String;

/// Builds a slot field name from (slot index, field)
type SlotSpelling = fn(usize, &str) -> String;

fn indexed_key(device: &str, box_index: u64, field: &str) -> String {
    format!("{}{}_cfs_{}_{}", entity::SENSOR_PREFIX, device, box_index, field)
}

fn compact_key(device: &str, box_index: u64, field: &str) -> String {
    format!("{}{}_cfs{}_{}", entity::SENSOR_PREFIX, device, box_index, field)
}

fn unindexed_key(device: &str, _box_index: u64, field: &str) -> String {
    format!("{}{}_cfs_{}", entity::SENSOR_PREFIX, device, field)
}

/// Entity id templates, highest priority first
const FIELD_KEYS: [KeyBuilder; 3] = [indexed_key, compact_key, unindexed_key];

fn separated_slot(slot: usize, field: &str) -> String {
    format!("slot_{}_{}", slot, field)
}

fn joined_slot(slot: usize, field: &str) -> String {
    format!("slot{}_{}", slot, field)
}

/// Slot field spellings, highest priority first
const SLOT_SPELLINGS: [SlotSpelling; 2] = [separated_slot, joined_slot];

/// Field lookups bound to one snapshot and selection
struct FieldResolver<'a> {
    bag: &'a StateBag,
    device: &'a str,
    box_index: u64,
}

impl<'a> FieldResolver<'a> {
    /// Raw state of the first existing entity for `field`, sentinels included
    fn raw(&self, field: &str) -> Option<&'a str> {
        FIELD_KEYS.iter().find_map(|build| {
            let entity_id = build(self.device, self.box_index, field);
            let raw = self.bag.raw_state(&entity_id)?;
            trace!(entity_id = %entity_id, raw, "Resolved field");
            Some(raw)
        })
    }

    /// Raw state of a slot field; a spelling that yields no data falls
    /// through to the next spelling
    fn slot_raw(&self, slot: usize, field: &str) -> Option<&'a str> {
        let raw = SLOT_SPELLINGS.iter().find_map(|spell| {
            self.raw(&spell(slot, field))
                .filter(|raw| !is_sentinel(raw))
        });
        if raw.is_none() && tracing::enabled!(Level::TRACE) {
            let probed = slot_field_candidates(self.device, self.box_index, slot, field);
            trace!(slot, field, ?probed, "Slot field absent");
        }
        raw
    }

    fn slot(&self, slot: usize) -> SlotRecord {
        let value = |field: &str| self.slot_raw(slot, field).and_then(coerce_state);
        SlotRecord {
            percent: value("percent"),
            material_type: value("type"),
            name: value("name"),
            color: self.slot_raw(slot, "color").and_then(normalize_hex),
            min_temp: value("min_temp"),
            max_temp: value("max_temp"),
            selected: value("selected"),
            state: value("state"),
        }
    }
}

/// Assemble the reading for one printer box
///
/// Never fails: a field that is missing, reports `unknown`/`unavailable`, or
/// (for colors) is not a valid hex color is simply absent.
pub fn resolve(bag: &StateBag, device: &str, box_index: u64) -> Reading {
    let resolver = FieldResolver {
        bag,
        device,
        box_index,
    };

    let mut slots: [SlotRecord; slots::COUNT] = Default::default();
    for (index, slot) in slots.iter_mut().enumerate() {
        *slot = resolver.slot(index);
    }

    Reading {
        temperature: resolver.raw(entity::TEMPERATURE).and_then(coerce_state),
        humidity: resolver.raw(entity::HUMIDITY).and_then(coerce_state),
        slots,
    }
}

/// Entity ids probed for one slot field, in priority order
///
/// Logged at trace level whenever a slot field stays absent.
pub fn slot_field_candidates(device: &str, box_index: u64, slot: usize, field: &str) -> Vec<String> {
    SLOT_SPELLINGS
        .iter()
        .flat_map(|spell| {
            let name = spell(slot, field);
            FIELD_KEYS
                .iter()
                .map(move |build| build(device, box_index, &name))
        })
        .collect()
}
