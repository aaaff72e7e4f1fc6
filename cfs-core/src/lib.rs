//! CFS Core Library
//!
//! Turns a Home Assistant state snapshot into everything a Creality CFS card
//! needs to draw: which printers and boxes exist, what each box currently
//! holds, and how to tint the slot overlays.
//!
//! # Features
//!
//! - **Discovery**: Finds printers and boxes across several entity naming conventions
//! - **Resolution**: Assembles ambient and per-slot readings with fallback entity ids
//! - **Calibration**: Maps a filament color onto a filter chain for the red overlay asset
//! - **Selection**: Keeps the chosen printer/box valid across snapshots
//!
//! # Module Structure
//!
//! - `data/` - Snapshot, derived values, configuration, coercion
//! - `discovery/` - Entity id classification and catalog building
//!
//! # Example
//!
//! ```
//! use cfs_core::{discover, resolve, filter_for, StateBag, CalibrationCoefficients};
//!
//! let bag = StateBag::new()
//!     .with_state("sensor.k1_cfs_0_temperature", "24.5")
//!     .with_state("sensor.k1_cfs_0_slot_0_color", "#00FF00");
//!
//! let catalog = discover(&bag, None);
//! let printer = &catalog.entries()[0];
//! let reading = resolve(&bag, &printer.key, printer.boxes[0]);
//! let filter = filter_for(reading.slots[0].color.as_deref(), &CalibrationCoefficients::default());
//! assert_eq!(filter.hue_rotate_degrees, 120);
//! ```

// Grouped modules
pub mod data;
pub mod discovery;

// Standalone modules
pub mod color;
pub mod constants;
pub mod display;
pub mod error;
pub mod resolve;
pub mod selection;

// Re-export primary types from data/
pub use data::{
    CalibrationCoefficients, CardConfig, Catalog, CatalogEntry, EntityState, FieldValue,
    Reading, SlotRecord, StateBag,
};

// Re-export coercion helpers from data/
pub use data::{coerce_state, is_sentinel, normalize_hex};

// Re-export error types
pub use error::{CfsError, Result};

// Re-export the engine entry points
pub use color::{filter_for, filter_for_hsl, hex_to_hsl, FilterDescriptor, Hsl};
pub use discovery::{classify, discover, natural_cmp, pretty_label, KeyMatch, KeyShape};
pub use resolve::{resolve, slot_field_candidates};
pub use selection::{reconcile, Selection};

// Re-export display formatting functions
pub use display::{
    box_label, format_humidity, format_optional, format_temp, format_with_unit,
    progress_width, slot_heading,
};
