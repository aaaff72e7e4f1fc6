//! Printer and box discovery
//!
//! Scans a state snapshot for box ambient sensors and builds the catalog of
//! printers with their boxes. Nothing is cached between scans; every call
//! starts from the snapshot alone.
//!
//! # Recognized entity ids
//!
//! | Convention | Example | Box |
//! |------------|---------|-----|
//! | standard   | `sensor.k1_cfs_1_temperature` | 1 |
//! | no index   | `sensor.k1_cfs_humidity` | 0 |
//! | compact    | `sensor.k1_cfs2_temperature` | 2 |

mod label;
mod patterns;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::constants::entity;
use crate::data::{Catalog, CatalogEntry, StateBag};

pub use label::{natural_cmp, pretty_label};
pub use patterns::{classify, KeyMatch, KeyShape};

/// Build the printer catalog from a snapshot
///
/// `filter` restricts the scan to entity ids containing it (case-sensitive);
/// `None` or an empty string scans everything. Entries are sorted by label
/// with numbers compared by value.
pub fn discover(bag: &StateBag, filter: Option<&str>) -> Catalog {
    let filter = filter.filter(|f| !f.is_empty());
    let mut printers: BTreeMap<&str, BTreeSet<u64>> = BTreeMap::new();

    for entity_id in bag.entity_ids() {
        if !entity_id.starts_with(entity::SENSOR_PREFIX) {
            continue;
        }
        if let Some(f) = filter {
            if !entity_id.contains(f) {
                continue;
            }
        }
        if let Some(m) = classify(entity_id) {
            trace!(entity_id, device = m.device, index = m.index, shape = ?m.shape, "Matched box sensor");
            printers.entry(m.device).or_default().insert(m.index);
        }
    }

    let mut entries: Vec<CatalogEntry> = printers
        .into_iter()
        .map(|(key, boxes)| CatalogEntry {
            key: key.to_string(),
            label: pretty_label(key),
            boxes: boxes.into_iter().collect(),
        })
        .collect();

    entries.sort_by(|a, b| {
        natural_cmp(&a.label, &b.label)
            .then_with(|| a.label.cmp(&b.label))
            .then_with(|| a.key.cmp(&b.key))
    });

    debug!("Discovered {} printer(s) in {} entities", entries.len(), bag.len());
    Catalog::from_sorted(entries)
}
