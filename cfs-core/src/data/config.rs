//! Card configuration
//!
//! Parses the host's configuration object. Unknown keys are ignored, text
//! options accept strings and numbers, and any value of the wrong type falls
//! back to its default with a warning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::constants::{calibration, card};
use crate::error::{CfsError, Result};

/// Tunables for the red-to-target filter calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCoefficients {
    pub saturation_base: f64,
    pub saturation_gain: f64,
    pub brightness_base: f64,
    pub brightness_gain: f64,
    pub contrast: f64,
}

impl Default for CalibrationCoefficients {
    fn default() -> Self {
        Self {
            saturation_base: calibration::SATURATION_BASE,
            saturation_gain: calibration::SATURATION_GAIN,
            brightness_base: calibration::BRIGHTNESS_BASE,
            brightness_gain: calibration::BRIGHTNESS_GAIN,
            contrast: calibration::CONTRAST,
        }
    }
}

/// Validated card configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardConfig {
    pub title: String,
    /// Asset base URL, always ending in exactly one `/`
    pub images_path: String,
    /// Only entity ids containing this substring are discovered; empty disables the filter
    pub filter_prefix: String,
    /// Preferred printer: first device key containing this substring
    pub default_printer: Option<String>,
    /// Preferred box index
    pub default_box: Option<u64>,
    pub calibration: CalibrationCoefficients,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: card::DEFAULT_TITLE.to_string(),
            images_path: normalize_images_path(card::DEFAULT_IMAGES_PATH),
            filter_prefix: String::new(),
            default_printer: None,
            default_box: None,
            calibration: CalibrationCoefficients::default(),
        }
    }
}

/// Shape of the config object as written by the user
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCardConfig {
    title: Option<Value>,
    images_path: Option<Value>,
    filter_prefix: Option<Value>,
    default_printer: Option<Value>,
    default_box: Option<Value>,
    saturation_base: Option<Value>,
    saturation_gain: Option<Value>,
    brightness_base: Option<Value>,
    brightness_gain: Option<Value>,
    contrast: Option<Value>,
}

impl CardConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(CfsError::invalid_config("config", "expected an object"));
        }
        let raw: RawCardConfig = serde_json::from_value(value)?;
        let defaults = CalibrationCoefficients::default();

        Ok(Self {
            title: text_option("title", raw.title.as_ref())
                .unwrap_or_else(|| card::DEFAULT_TITLE.to_string()),
            images_path: normalize_images_path(
                text_option("images_path", raw.images_path.as_ref())
                    .as_deref()
                    .unwrap_or(card::DEFAULT_IMAGES_PATH),
            ),
            filter_prefix: text_option("filter_prefix", raw.filter_prefix.as_ref())
                .unwrap_or_default(),
            default_printer: text_option("default_printer", raw.default_printer.as_ref())
                .filter(|p| !p.is_empty()),
            default_box: raw.default_box.as_ref().and_then(parse_box_index),
            calibration: CalibrationCoefficients {
                saturation_base: coefficient(
                    "saturation_base",
                    raw.saturation_base.as_ref(),
                    defaults.saturation_base,
                ),
                saturation_gain: coefficient(
                    "saturation_gain",
                    raw.saturation_gain.as_ref(),
                    defaults.saturation_gain,
                ),
                brightness_base: coefficient(
                    "brightness_base",
                    raw.brightness_base.as_ref(),
                    defaults.brightness_base,
                ),
                brightness_gain: coefficient(
                    "brightness_gain",
                    raw.brightness_gain.as_ref(),
                    defaults.brightness_gain,
                ),
                contrast: coefficient("contrast", raw.contrast.as_ref(), defaults.contrast),
            },
        })
    }

    /// Non-empty substring filter, if any
    pub fn key_filter(&self) -> Option<&str> {
        Some(self.filter_prefix.as_str()).filter(|f| !f.is_empty())
    }

    /// URL of the mask image for one slot layer
    pub fn slot_image_url(&self, slot: usize) -> String {
        format!("{}{}.png", self.images_path, slot)
    }

    /// URL of the frame image drawn above the slot layers
    pub fn frame_image_url(&self) -> String {
        format!("{}{}", self.images_path, card::FRAME_IMAGE)
    }
}

/// Strip any trailing slashes and append exactly one
fn normalize_images_path(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Strings are taken as is and numbers by their JSON rendering (`2` gives `"2"`)
fn text_option(field: &str, value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => {
            warn!(field, value = %other, "Ignoring non-text configuration value");
            None
        }
    }
}

/// Only JSON numbers that are finite count; everything else takes the default
fn coefficient(field: &str, value: Option<&Value>, default: f64) -> f64 {
    match value {
        None | Some(Value::Null) => default,
        Some(v) => match v.as_f64().filter(|n| n.is_finite()) {
            Some(n) => n,
            None => {
                warn!(field, value = %v, fallback = default, "Ignoring non-numeric calibration coefficient");
                default
            }
        },
    }
}

/// Accepts `2`, `2.0` and `"2"`
fn parse_box_index(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral_index)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        warn!(value = %value, "Ignoring invalid default_box");
    }
    parsed
}

/// A finite, non-negative float with no fractional part
fn integral_index(n: f64) -> Option<u64> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = CardConfig::from_json_value(json!({})).unwrap();
        assert_eq!(config, CardConfig::default());
        assert_eq!(config.key_filter(), None);
        assert!(config.images_path.ends_with("/assets/"));
    }

    #[test]
    fn test_coefficients_override_and_fallback() {
        let config = CardConfig::from_json_value(json!({
            "saturation_base": 1.0,
            "saturation_gain": "0.9",
            "brightness_gain": null,
            "contrast": 1.2
        }))
        .unwrap();
        assert_eq!(config.calibration.saturation_base, 1.0);
        assert_eq!(config.calibration.saturation_gain, calibration::SATURATION_GAIN);
        assert_eq!(config.calibration.brightness_gain, calibration::BRIGHTNESS_GAIN);
        assert_eq!(config.calibration.contrast, 1.2);
    }

    #[test]
    fn test_default_box_accepts_numeric_string() {
        let config = CardConfig::from_json_value(json!({"default_box": "2"})).unwrap();
        assert_eq!(config.default_box, Some(2));
        let config = CardConfig::from_json_value(json!({"default_box": 0})).unwrap();
        assert_eq!(config.default_box, Some(0));
        let config = CardConfig::from_json_value(json!({"default_box": "first"})).unwrap();
        assert_eq!(config.default_box, None);
        let config = CardConfig::from_json_value(json!({"default_box": -1})).unwrap();
        assert_eq!(config.default_box, None);
    }

    #[test]
    fn test_default_box_accepts_integral_float() {
        let config = CardConfig::from_json_value(json!({"default_box": 2.0})).unwrap();
        assert_eq!(config.default_box, Some(2));
        let config = CardConfig::from_json_value(json!({"default_box": 2.5})).unwrap();
        assert_eq!(config.default_box, None);
        let config = CardConfig::from_json_value(json!({"default_box": -3.0})).unwrap();
        assert_eq!(config.default_box, None);
    }

    #[test]
    fn test_numeric_text_options_are_coerced() {
        let config = CardConfig::from_json_value(json!({
            "default_printer": 2,
            "title": 42,
            "filter_prefix": 1
        }))
        .unwrap();
        assert_eq!(config.default_printer.as_deref(), Some("2"));
        assert_eq!(config.title, "42");
        assert_eq!(config.key_filter(), Some("1"));
    }

    #[test]
    fn test_wrongly_typed_text_options_fall_back() {
        let config = CardConfig::from_json_value(json!({
            "title": ["a"],
            "images_path": {"url": "/x"},
            "default_printer": true,
            "filter_prefix": null
        }))
        .unwrap();
        assert_eq!(config, CardConfig::default());
    }

    #[test]
    fn test_images_path_single_trailing_slash() {
        let config =
            CardConfig::from_json_value(json!({"images_path": "/local/cfs///"})).unwrap();
        assert_eq!(config.images_path, "/local/cfs/");
        assert_eq!(config.slot_image_url(2), "/local/cfs/2.png");
        assert_eq!(config.frame_image_url(), "/local/cfs/cfs.png");
    }

    #[test]
    fn test_filter_and_printer() {
        let config = CardConfig::from_json_value(json!({
            "filter_prefix": "k1",
            "default_printer": "",
            "title": "Shop"
        }))
        .unwrap();
        assert_eq!(config.key_filter(), Some("k1"));
        assert_eq!(config.default_printer, None);
        assert_eq!(config.title, "Shop");
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            CardConfig::from_json_value(json!([1])),
            Err(CfsError::InvalidConfig { .. })
        ));
        assert!(matches!(
            CardConfig::from_json_str("title: x"),
            Err(CfsError::JsonParse(_))
        ));
    }
}
