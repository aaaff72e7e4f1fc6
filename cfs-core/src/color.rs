//! Filament color calibration
//!
//! The overlay asset for a slot is pre-rendered in pure red (H=0, S=1,
//! L=0.5). To show a material color the presentation layer applies a CSS
//! filter chain to that asset; this module computes the chain.
//!
//! The brightness bias (base below 1, gain above 1) keeps yellows and light
//! greens from coming out dull and stops deep blues washing out.

use std::fmt;

use serde::Serialize;

use crate::constants::calibration;
use crate::data::CalibrationCoefficients;

/// Hue in degrees [0, 360), saturation and lightness in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    const NEUTRAL: Hsl = Hsl {
        h: calibration::FALLBACK_HUE,
        s: calibration::FALLBACK_SATURATION,
        l: calibration::FALLBACK_LIGHTNESS,
    };
}

/// Parse `#rgb`, `#rrggbb` (the `#` is optional) into HSL
///
/// Anything else yields neutral gray (h=0, s=0, l=0.5).
pub fn hex_to_hsl(hex: &str) -> Hsl {
    match parse_rgb(hex) {
        Some((r, g, b)) => rgb_to_hsl(r, g, b),
        None => Hsl::NEUTRAL,
    }
}

fn parse_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match digits.len() {
        3 => {
            let expand = |i: usize| channel(digits[i..=i].repeat(2).as_str());
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Some((channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
        _ => None,
    }
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let sector = if max == r {
        ((g - b) / delta) % 6.0
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    let mut h = sector * 60.0;
    if h < 0.0 {
        h += 360.0;
    }
    Hsl { h, s, l }
}

/// Filter chain that turns the red asset into approximately the target color
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterDescriptor {
    /// Always in 0..=359
    pub hue_rotate_degrees: u16,
    pub saturation: f64,
    pub brightness: f64,
    pub contrast: f64,
}

/// CSS `filter` value, e.g.
/// `hue-rotate(120deg) saturate(1.450) brightness(1.400) contrast(1.080)`
impl fmt::Display for FilterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hue-rotate({}deg) saturate({:.3}) brightness({:.3}) contrast({:.3})",
            self.hue_rotate_degrees, self.saturation, self.brightness, self.contrast
        )
    }
}

/// NaN maps to the lower bound so the output always lands in range
fn clamp_to(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

fn hue_rotation(h: f64) -> u16 {
    if !h.is_finite() {
        return 0;
    }
    let degrees = (((h % 360.0) + 360.0) % 360.0).round();
    // 359.5 and up rounds onto 360, which is the same rotation as 0
    (degrees as u16) % 360
}

/// Compute the filter chain for a target color
///
/// `hex` may be absent or malformed; both yield the neutral-gray chain.
pub fn filter_for(hex: Option<&str>, coefficients: &CalibrationCoefficients) -> FilterDescriptor {
    let hsl = hex.map(hex_to_hsl).unwrap_or(Hsl::NEUTRAL);
    filter_for_hsl(hsl, coefficients)
}

pub fn filter_for_hsl(hsl: Hsl, coefficients: &CalibrationCoefficients) -> FilterDescriptor {
    FilterDescriptor {
        hue_rotate_degrees: hue_rotation(hsl.h),
        saturation: clamp_to(
            coefficients.saturation_base + hsl.s * coefficients.saturation_gain,
            calibration::SATURATION_RANGE,
        ),
        brightness: clamp_to(
            coefficients.brightness_base + hsl.l * coefficients.brightness_gain,
            calibration::BRIGHTNESS_RANGE,
        ),
        contrast: clamp_to(coefficients.contrast, calibration::CONTRAST_RANGE),
    }
}
