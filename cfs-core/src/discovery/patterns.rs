//! Entity id classification
//!
//! Box sensors show up under more than one naming convention. Each
//! convention is one row in `CONVENTIONS`; rows are tried top to bottom and the
//! first hit wins.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

/// Naming convention a key was recognized under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    /// `<device>_cfs_<index>_<metric>` or `<device>_cfs_<metric>`
    Standard,
    /// `<device>_cfs<index>_<metric>`
    Compact,
}

/// A classified entity id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch<'a> {
    pub shape: KeyShape,
    pub device: &'a str,
    /// Box index; 0 when the key carries none
    pub index: u64,
    pub metric: &'a str,
}

struct Matcher {
    shape: KeyShape,
    pattern: Regex,
}

impl Matcher {
    fn new(shape: KeyShape, pattern: &str) -> Option<Self> {
        let pattern = Regex::new(pattern).ok()?;
        Some(Self { shape, pattern })
    }
}

// `device` is lazy so the shortest device key that leaves a valid tail wins.
const CONVENTIONS: [(KeyShape, &str); 2] = [
    (
        KeyShape::Standard,
        r"^sensor\.(?P<device>.+?)_cfs_(?:(?P<index>[0-9]+)_)?(?P<metric>temperature|humidity)$",
    ),
    (
        KeyShape::Compact,
        r"^sensor\.(?P<device>.+?)_cfs(?P<index>[0-9]+)_(?P<metric>temperature|humidity)$",
    ),
];

lazy_static! {
    static ref MATCHERS: Vec<Matcher> = CONVENTIONS
        .iter()
        .filter_map(|&(shape, pattern)| Matcher::new(shape, pattern))
        .collect();
}

/// Classify an entity id as a box ambient sensor
///
/// Returns `None` for ids that match no convention, and for ids whose index
/// does not fit in a `u64`.
pub fn classify(entity_id: &str) -> Option<KeyMatch<'_>> {
    let (shape, caps) = MATCHERS
        .iter()
        .find_map(|m| m.pattern.captures(entity_id).map(|caps| (m.shape, caps)))?;

    let index = match caps.name("index") {
        Some(digits) => match digits.as_str().parse::<u64>() {
            Ok(index) => index,
            Err(e) => {
                trace!(entity_id, "Skipping box index out of range: {}", e);
                return None;
            }
        },
        None => 0,
    };

    Some(KeyMatch {
        shape,
        device: caps.name("device")?.as_str(),
        index,
        metric: caps.name("metric")?.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_with_index() {
        let m = classify("sensor.k1_max_cfs_2_temperature").unwrap();
        assert_eq!(m.shape, KeyShape::Standard);
        assert_eq!(m.device, "k1_max");
        assert_eq!(m.index, 2);
        assert_eq!(m.metric, "temperature");
    }

    #[test]
    fn test_standard_without_index() {
        let m = classify("sensor.x_cfs_humidity").unwrap();
        assert_eq!(m.shape, KeyShape::Standard);
        assert_eq!(m.device, "x");
        assert_eq!(m.index, 0);
    }

    #[test]
    fn test_compact() {
        let m = classify("sensor.printerB_cfs2_humidity").unwrap();
        assert_eq!(m.shape, KeyShape::Compact);
        assert_eq!(m.device, "printerB");
        assert_eq!(m.index, 2);
        assert_eq!(m.metric, "humidity");
    }

    #[test]
    fn test_non_matching_keys() {
        assert_eq!(classify("sensor.k1_cfs_0_slot_0_percent"), None);
        assert_eq!(classify("sensor.k1_cfs_0_Temperature"), None);
        assert_eq!(classify("binary_sensor.k1_cfs_0_temperature"), None);
        assert_eq!(classify("sensor._cfs_0_temperature"), None);
        assert_eq!(classify("sensor.k1_cfsx_temperature"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_shortest_device_wins() {
        let m = classify("sensor.a_cfs_b_cfs_1_temperature").unwrap();
        assert_eq!(m.device, "a_cfs_b");
        assert_eq!(m.index, 1);
    }

    #[test]
    fn test_standard_checked_before_compact() {
        // Digits right before `_cfs` stay part of the device key
        let m = classify("sensor.printer2_cfs_3_temperature").unwrap();
        assert_eq!(m.shape, KeyShape::Standard);
        assert_eq!(m.device, "printer2");
        assert_eq!(m.index, 3);
    }

    #[test]
    fn test_every_convention_compiles() {
        assert_eq!(MATCHERS.len(), CONVENTIONS.len());
    }

    #[test]
    fn test_large_index_is_kept() {
        let m = classify("sensor.k1_cfs_99999999999_temperature").unwrap();
        assert_eq!(m.device, "k1");
        assert_eq!(m.index, 99_999_999_999);
        let m = classify("sensor.k1_cfs4294967296_humidity").unwrap();
        assert_eq!(m.index, 4_294_967_296);
    }

    #[test]
    fn test_index_beyond_u64_is_ignored() {
        assert_eq!(classify("sensor.k1_cfs_99999999999999999999_temperature"), None);
    }
}
