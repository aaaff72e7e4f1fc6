/*
 * This file is part of the CFS card engine.
 *
 * Copyright (C) 2025 CFS card contributors
 *
 * The CFS card engine is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * The CFS card engine is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with the CFS card engine. If not, see <https://www.gnu.org/licenses/>.
 */

//! Presentation-ready view of the card
//!
//! Plain values only; markup and styling belong to the frontend.

use serde::Serialize;

use cfs_core::constants::card;
use cfs_core::{
    box_label, filter_for, format_humidity, format_optional, format_temp, progress_width,
    slot_heading, CardConfig, Catalog, FilterDescriptor, Reading, Selection, SlotRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrinterOption {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxOption {
    pub index: u64,
    pub label: String,
    pub selected: bool,
}

/// One tinted overlay drawn over the box image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotLayer {
    pub image: String,
    /// Slot color, or `transparent`
    pub ink: String,
    pub opacity: f64,
    pub filter: FilterDescriptor,
}

/// Key/value tile for one slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotTile {
    pub heading: String,
    pub swatch: String,
    pub selected: bool,
    pub material_type: String,
    pub name: String,
    /// Fill bar width, 0-100
    pub progress: f64,
    pub min_temp: String,
    pub max_temp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxView {
    pub temperature: String,
    pub humidity: String,
    pub layers: Vec<SlotLayer>,
    pub frame_image: String,
    pub tiles: Vec<SlotTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub printers: Vec<PrinterOption>,
    /// Empty when the selected printer has no boxes
    pub boxes: Vec<BoxOption>,
    /// Present only when a reading exists for the selection
    pub body: Option<BoxView>,
}

fn slot_layer(config: &CardConfig, index: usize, slot: &SlotRecord) -> SlotLayer {
    let (ink, opacity) = match slot.color.as_deref() {
        Some(color) => (color.to_string(), card::LAYER_OPACITY_FILLED),
        None => (card::TRANSPARENT_INK.to_string(), card::LAYER_OPACITY_EMPTY),
    };
    SlotLayer {
        image: config.slot_image_url(index),
        ink,
        opacity,
        filter: filter_for(slot.color.as_deref(), &config.calibration),
    }
}

fn slot_tile(index: usize, slot: &SlotRecord) -> SlotTile {
    SlotTile {
        heading: slot_heading(index),
        swatch: slot
            .color
            .clone()
            .unwrap_or_else(|| card::EMPTY_SWATCH.to_string()),
        selected: slot.is_selected(),
        material_type: format_optional(slot.material_type.as_ref()),
        name: format_optional(slot.name.as_ref()),
        progress: progress_width(slot.percent_value()),
        min_temp: format_temp(slot.min_temp.as_ref()),
        max_temp: format_temp(slot.max_temp.as_ref()),
    }
}

fn box_view(config: &CardConfig, reading: &Reading) -> BoxView {
    BoxView {
        temperature: format!("Temp: {}", format_temp(reading.temperature.as_ref())),
        humidity: format!("Humidity: {}", format_humidity(reading.humidity.as_ref())),
        layers: reading
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| slot_layer(config, i, slot))
            .collect(),
        frame_image: config.frame_image_url(),
        tiles: reading
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| slot_tile(i, slot))
            .collect(),
    }
}

/// Assemble the full card view from the coordinator's current values
pub fn build_view(
    config: &CardConfig,
    catalog: &Catalog,
    selection: &Selection,
    reading: Option<&Reading>,
) -> CardView {
    let printer = selection.printer.as_deref();

    let printers = catalog
        .iter()
        .map(|entry| PrinterOption {
            key: entry.key.clone(),
            label: entry.label.clone(),
            selected: Some(entry.key.as_str()) == printer,
        })
        .collect();

    let boxes = printer
        .and_then(|key| catalog.get(key))
        .map(|entry| {
            entry
                .boxes
                .iter()
                .map(|&index| BoxOption {
                    index,
                    label: box_label(index),
                    selected: selection.box_index == Some(index),
                })
                .collect()
        })
        .unwrap_or_default();

    CardView {
        title: config.title.clone(),
        printers,
        boxes,
        body: reading.map(|r| box_view(config, r)),
    }
}
