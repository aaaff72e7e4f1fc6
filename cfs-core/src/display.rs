//! Display Formatting Helpers
//!
//! Centralized functions for turning resolved values into the short strings
//! the card shows. Absent values render as the placeholder glyph.
//!
//! These are frontend-agnostic formatting utilities.

use crate::constants::card;
use crate::data::FieldValue;

/// Format a value, or the placeholder glyph when absent
pub fn format_optional(value: Option<&FieldValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => card::PLACEHOLDER.to_string(),
    }
}

/// Format a value followed by a unit; the unit is kept even when the value is absent
///
/// # Returns
/// Formatted string like "24.5°C" or "—°C"
pub fn format_with_unit(value: Option<&FieldValue>, unit: &str) -> String {
    format!("{}{}", format_optional(value), unit)
}

/// Format a temperature in Celsius
pub fn format_temp(value: Option<&FieldValue>) -> String {
    format_with_unit(value, "°C")
}

/// Format a relative humidity
pub fn format_humidity(value: Option<&FieldValue>) -> String {
    format_with_unit(value, "%")
}

/// Label for a box in the box picker
pub fn box_label(index: u64) -> String {
    format!("CFS {}", index)
}

/// Heading of a slot tile
pub fn slot_heading(slot: usize) -> String {
    format!("Slot {}", slot)
}

/// Width of a fill bar in percent
///
/// Non-numeric and absent fill levels draw an empty bar; numbers are clamped to 0-100.
pub fn progress_width(percent: Option<f64>) -> f64 {
    percent.map(|p| p.clamp(0.0, 100.0)).unwrap_or(0.0)
}
