//! Data types, configuration, and validation modules
//!
//! Contains the host snapshot, every value derived from it, and card settings.

mod config;
mod types;
mod validation;

pub use config::{CalibrationCoefficients, CardConfig};
pub use types::{
    Catalog, CatalogEntry, EntityState, FieldValue, Reading, SlotRecord, StateBag,
};
pub use validation::{coerce_state, is_sentinel, normalize_hex};
