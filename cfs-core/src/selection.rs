//! Printer/box selection
//!
//! The selection is a plain value. After every rescan it is reconciled
//! against the fresh catalog so it never points at a printer or box that has
//! disappeared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{Catalog, CardConfig, CatalogEntry};

/// Currently displayed printer and box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub printer: Option<String>,
    pub box_index: Option<u64>,
}

impl Selection {
    pub fn new(printer: impl Into<String>, box_index: u64) -> Self {
        Self {
            printer: Some(printer.into()),
            box_index: Some(box_index),
        }
    }

    /// Both a printer and a box are selected
    pub fn is_complete(&self) -> bool {
        self.printer.is_some() && self.box_index.is_some()
    }

    /// Select a printer explicitly; the box resets to its lowest index
    pub fn for_printer(entry: &CatalogEntry) -> Self {
        Self {
            printer: Some(entry.key.clone()),
            box_index: entry.first_box(),
        }
    }
}

/// Reconcile a previous selection with a freshly discovered catalog
///
/// * Empty catalog: nothing selected.
/// * Printer: kept if still present. With no previous printer, the first
///   entry whose key contains `default_printer` is chosen, else the first
///   entry. A printer that vanished falls back to the first entry.
/// * Box: kept if the chosen printer still lists it. With no previous box,
///   `default_box` is used when listed, else the lowest index. A box that
///   vanished falls back to the lowest index.
pub fn reconcile(previous: &Selection, catalog: &Catalog, config: &CardConfig) -> Selection {
    let entry = match pick_printer(previous, catalog, config) {
        Some(entry) => entry,
        None => return Selection::default(),
    };

    let box_index = match previous.box_index {
        Some(index) if entry.has_box(index) => Some(index),
        Some(index) => {
            debug!(printer = %entry.key, index, "Selected box vanished, falling back to lowest");
            entry.first_box()
        }
        None => config
            .default_box
            .filter(|index| entry.has_box(*index))
            .or_else(|| entry.first_box()),
    };

    Selection {
        printer: Some(entry.key.clone()),
        box_index,
    }
}

fn pick_printer<'a>(
    previous: &Selection,
    catalog: &'a Catalog,
    config: &CardConfig,
) -> Option<&'a CatalogEntry> {
    match previous.printer.as_deref() {
        Some(key) => catalog.get(key).or_else(|| {
            debug!(printer = key, "Selected printer vanished, falling back to first");
            catalog.first()
        }),
        None => config
            .default_printer
            .as_deref()
            .and_then(|wanted| catalog.iter().find(|e| e.key.contains(wanted)))
            .or_else(|| catalog.first()),
    }
}
