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

//! Card coordinator
//!
//! Owns the configuration, the last host snapshot and the current selection.
//! Every snapshot triggers a full rescan; nothing derived is carried over
//! except the selection, which is reconciled against the fresh catalog.

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{debug, warn};

use cfs_core::constants::{card, slots};
use cfs_core::{
    discover, filter_for, reconcile, resolve, CardConfig, Catalog, FilterDescriptor, Reading,
    Selection, StateBag,
};

use crate::logger::log_event;
use crate::view::{build_view, CardView};

#[derive(Debug, Clone, Default)]
pub struct CardState {
    config: CardConfig,
    states: Option<StateBag>,
    catalog: Catalog,
    selection: Selection,
    reading: Option<Reading>,
}

impl CardState {
    pub fn new(config: CardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Build a card from the JSON configuration object
    pub fn from_config_json(json: &str) -> Result<Self> {
        let config = CardConfig::from_json_str(json).context("Invalid card configuration")?;
        Ok(Self::new(config))
    }

    /// Replace the configuration and re-run the last snapshot through it
    pub fn set_config(&mut self, config: CardConfig) -> bool {
        self.config = config;
        self.refresh()
    }

    /// Accept a new host snapshot
    ///
    /// Returns true when the printer or box selection changed.
    pub fn update_states(&mut self, states: StateBag) -> bool {
        self.states = Some(states);
        self.refresh()
    }

    /// Accept a new host snapshot in the host's JSON shape
    pub fn update_states_json(&mut self, json: &str) -> Result<bool> {
        let states = StateBag::from_json_str(json).context("Invalid state snapshot")?;
        Ok(self.update_states(states))
    }

    /// User picked a printer; its lowest box becomes the selected box
    ///
    /// Unknown printers are ignored. Returns true when the selection changed.
    pub fn select_printer(&mut self, key: &str) -> bool {
        let selection = match self.catalog.get(key) {
            Some(entry) => Selection::for_printer(entry),
            None => {
                warn!(printer = key, "Ignoring selection of unknown printer");
                return false;
            }
        };
        self.apply_selection(selection)
    }

    /// User picked a box of the current printer
    ///
    /// Boxes the current printer does not list are ignored.
    pub fn select_box(&mut self, index: u64) -> bool {
        let printer = match self.current_entry() {
            Some(entry) if entry.has_box(index) => entry.key.clone(),
            _ => {
                warn!(index, "Ignoring selection of unknown box");
                return false;
            }
        };
        self.apply_selection(Selection {
            printer: Some(printer),
            box_index: Some(index),
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    /// Boxes of the selected printer
    pub fn boxes(&self) -> &[u64] {
        self.current_entry()
            .map(|entry| entry.boxes.as_slice())
            .unwrap_or(&[])
    }

    /// Overlay filter for every slot of the current reading
    pub fn slot_filters(&self) -> Option<[FilterDescriptor; slots::COUNT]> {
        let reading = self.reading.as_ref()?;
        let coefficients = &self.config.calibration;
        Some(std::array::from_fn(|i| {
            filter_for(reading.slots[i].color.as_deref(), coefficients)
        }))
    }

    pub fn view(&self) -> CardView {
        build_view(
            &self.config,
            &self.catalog,
            &self.selection,
            self.reading.as_ref(),
        )
    }

    /// Height hint for the host layout, in rows
    pub fn card_size(&self) -> u32 {
        card::CARD_SIZE
    }

    fn current_entry(&self) -> Option<&cfs_core::CatalogEntry> {
        self.selection
            .printer
            .as_deref()
            .and_then(|key| self.catalog.get(key))
    }

    fn refresh(&mut self) -> bool {
        let states = match self.states.as_ref() {
            Some(states) => states,
            None => return false,
        };
        self.catalog = discover(states, self.config.key_filter());
        let selection = reconcile(&self.selection, &self.catalog, &self.config);
        debug!(
            printers = self.catalog.len(),
            entities = states.len(),
            "Rescanned snapshot"
        );
        self.apply_selection(selection)
    }

    /// Store a selection and rebuild the reading for it
    fn apply_selection(&mut self, selection: Selection) -> bool {
        self.reading = match (&self.states, &selection.printer, selection.box_index) {
            (Some(states), Some(printer), Some(index)) => Some(resolve(states, printer, index)),
            _ => None,
        };

        let changed = selection != self.selection;
        if changed {
            log_event(
                "selection_changed",
                json!({
                    "from": &self.selection,
                    "to": &selection,
                }),
            );
        }
        self.selection = selection;
        changed
    }
}
