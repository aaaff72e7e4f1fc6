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

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Target used for structured card events
pub const EVENT_TARGET: &str = "cfs_card::events";

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Install a stdout subscriber filtered by `RUST_LOG` (default `info`)
///
/// Returns false when the host already installed a subscriber; events then
/// flow to that one instead.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Render one event as a single JSON line
pub fn event_line(event: &str, data: &Value) -> String {
    json!({
        "ts_ms": now_millis(),
        "event": event,
        "data": data,
    })
    .to_string()
}

/// Emit a structured event, e.g. a selection change
pub fn log_event(event: &str, data: Value) {
    let line = event_line(event, &data);
    tracing::info!(target: EVENT_TARGET, event, "{}", line);
}
