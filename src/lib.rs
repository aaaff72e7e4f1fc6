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

//! CFS card - Home Assistant dashboard card engine for Creality CFS boxes
//!
//! This library holds the card's state between host updates and turns each
//! state snapshot into a view: printer and box pickers, ambient chips,
//! tinted slot overlays and slot tiles. The scanning itself lives in `cfs_core`.

pub mod card;
pub mod logger;
pub mod view;

pub use card::CardState;
pub use view::{BoxOption, BoxView, CardView, PrinterOption, SlotLayer, SlotTile};

#[cfg(test)]
pub mod test_utils;
