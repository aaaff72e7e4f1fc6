//! Coercion and normalization of raw host states
//!
//! Every function here is total: malformed input degrades to `None`
//! instead of producing an error.

use crate::constants::entity;
use crate::data::types::FieldValue;

/// Returns true for raw states that mean "no data"
pub fn is_sentinel(raw: &str) -> bool {
    entity::SENTINELS.contains(&raw)
}

/// Coerce a raw state into a field value
///
/// Sentinels become `None`. A string that parses as a finite number in full
/// (surrounding whitespace ignored) becomes a number; anything else is kept
/// verbatim as text.
pub fn coerce_state(raw: &str) -> Option<FieldValue> {
    if is_sentinel(raw) {
        return None;
    }
    match parse_finite(raw) {
        Some(n) => Some(FieldValue::Number(n)),
        None => Some(FieldValue::Text(raw.to_string())),
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Normalize a color to lower-case `#rrggbb`
///
/// Surrounding whitespace and a leading `#` are dropped; longer values keep
/// their trailing six characters (e.g. `0xFF00AA` or `#80FF00AA`).
pub fn normalize_hex(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let tail = match digits.char_indices().rev().nth(5) {
        Some((start, _)) => &digits[start..],
        None => return None,
    };
    if tail.len() != 6 || !tail.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", tail.to_ascii_lowercase()))
}
