//! Constants and configuration values for the CFS card engine
//!
//! Centralizes all magic numbers, key fragments, and configuration defaults.
//! Never use magic strings for entity naming in other files - add them here first.

/// Host entity namespace
pub mod entity {
    /// Only entities in this domain are considered
    pub const SENSOR_PREFIX: &str = "sensor.";

    /// Marker separating the device key from the box part of an entity id
    pub const CFS_MARKER: &str = "_cfs";

    /// Raw states that carry "no data" meaning
    pub const SENTINELS: [&str; 2] = ["unknown", "unavailable"];

    /// Ambient metrics that identify a box during discovery
    pub const AMBIENT_METRICS: [&str; 2] = ["temperature", "humidity"];

    /// Ambient temperature metric
    pub const TEMPERATURE: &str = "temperature";

    /// Ambient humidity metric
    pub const HUMIDITY: &str = "humidity";
}

/// Slot layout within one box
pub mod slots {
    /// Every box exposes exactly this many material slots
    pub const COUNT: usize = 4;

    /// Per-slot fields, in resolution order
    pub const FIELDS: [&str; 8] = [
        "percent",
        "type",
        "name",
        "color",
        "min_temp",
        "max_temp",
        "selected",
        "state",
    ];
}

/// Color calibration constants
pub mod calibration {
    /// Coefficient defaults
    pub const SATURATION_BASE: f64 = 0.85;
    pub const SATURATION_GAIN: f64 = 0.6;
    pub const BRIGHTNESS_BASE: f64 = 0.6;
    pub const BRIGHTNESS_GAIN: f64 = 1.6;
    pub const CONTRAST: f64 = 1.08;

    /// Output clamp ranges (inclusive)
    pub const SATURATION_RANGE: (f64, f64) = (0.2, 3.0);
    pub const BRIGHTNESS_RANGE: (f64, f64) = (0.3, 2.5);
    pub const CONTRAST_RANGE: (f64, f64) = (0.5, 2.0);

    /// HSL used when a color cannot be parsed (neutral gray)
    pub const FALLBACK_HUE: f64 = 0.0;
    pub const FALLBACK_SATURATION: f64 = 0.0;
    pub const FALLBACK_LIGHTNESS: f64 = 0.5;
}

/// Presentation defaults
pub mod card {
    /// Default card title
    pub const DEFAULT_TITLE: &str = "Creality CFS";

    /// Default base URL for the overlay assets
    pub const DEFAULT_IMAGES_PATH: &str =
        "https://raw.githubusercontent.com/rathlinus/ha-creality-cfs-card/refs/heads/main/assets";

    /// Frame image drawn over the slot layers
    pub const FRAME_IMAGE: &str = "cfs.png";

    /// Height hint reported to the host layout, in rows
    pub const CARD_SIZE: u32 = 6;

    /// Glyph shown wherever a value is absent
    pub const PLACEHOLDER: &str = "—";

    /// Swatch color for a slot without a known color
    pub const EMPTY_SWATCH: &str = "#ccc";

    /// Ink used for a slot layer without a known color
    pub const TRANSPARENT_INK: &str = "transparent";

    /// Layer opacity for slots with and without a known color
    pub const LAYER_OPACITY_FILLED: f64 = 1.0;
    pub const LAYER_OPACITY_EMPTY: f64 = 0.12;
}
