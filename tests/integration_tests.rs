/*
 * Integration tests for the CFS card engine
 *
 * These tests drive the card the way a host does: configuration first,
 * then a stream of state snapshots and user selections.
 */

use cfs_card::logger::init_logging;
use cfs_card::CardState;
use cfs_core::{
    discover, filter_for, resolve, CalibrationCoefficients, CardConfig, CfsError, FieldValue,
    Reading, Selection, StateBag,
};
use serial_test::serial;

fn snapshot(entities: &[(&str, &str)]) -> StateBag {
    entities.iter().copied().collect()
}

fn host_json(entities: &[(&str, &str)]) -> String {
    let map: serde_json::Map<String, serde_json::Value> = entities
        .iter()
        .map(|(id, state)| {
            (
                id.to_string(),
                serde_json::json!({ "entity_id": id, "state": state, "attributes": {} }),
            )
        })
        .collect();
    serde_json::Value::Object(map).to_string()
}

#[test]
fn test_discovery_across_conventions() {
    let bag = snapshot(&[
        ("sensor.printerA_cfs_0_temperature", "21"),
        ("sensor.printerA_cfs_1_temperature", "22"),
        ("sensor.printerB_cfs2_humidity", "40"),
        ("sensor.x_cfs_temperature", "19"),
        ("sensor.unrelated_temperature", "30"),
    ]);
    let catalog = discover(&bag, None);
    let summary: Vec<(&str, &str, Vec<u64>)> = catalog
        .iter()
        .map(|e| (e.key.as_str(), e.label.as_str(), e.boxes.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("printerA", "PrinterA", vec![0, 1]),
            ("printerB", "PrinterB", vec![2]),
            ("x", "X", vec![0]),
        ]
    );
    assert_eq!(catalog, discover(&bag, None));
}

#[test]
fn test_full_card_flow() {
    let mut card = CardState::from_config_json(
        r#"{"title": "Workshop", "default_printer": "k2", "default_box": "1", "contrast": "high"}"#,
    )
    .unwrap();
    assert_eq!(card.config().calibration.contrast, 1.08);

    let json = host_json(&[
        ("sensor.k1_cfs_0_temperature", "20"),
        ("sensor.k2_plus_cfs_0_temperature", "21"),
        ("sensor.k2_plus_cfs_1_temperature", "22.5"),
        ("sensor.k2_plus_cfs_1_humidity", "unavailable"),
        ("sensor.k2_plus_cfs_1_slot_0_color", "#0000FF"),
        ("sensor.k2_plus_cfs_1_slot_0_percent", "80"),
        ("sensor.k2_plus_cfs_1_slot0_name", "Galaxy Blue"),
        ("sensor.k2_plus_cfs_1_slot_3_selected", "1"),
    ]);
    assert!(card.update_states_json(&json).unwrap());
    assert_eq!(card.selection(), &Selection::new("k2_plus", 1));

    let reading = card.reading().unwrap();
    assert_eq!(reading.temperature, Some(FieldValue::Number(22.5)));
    assert_eq!(reading.humidity, None);
    assert_eq!(reading.slots[0].color.as_deref(), Some("#0000ff"));
    assert_eq!(
        reading.slots[0].name,
        Some(FieldValue::Text("Galaxy Blue".into()))
    );
    assert!(reading.slots[3].is_selected());

    let view = card.view();
    assert_eq!(view.title, "Workshop");
    assert_eq!(view.printers.len(), 2);
    assert_eq!(view.printers[1].label, "K2 Plus");
    let body = view.body.unwrap();
    assert_eq!(body.layers[0].filter.hue_rotate_degrees, 240);
    assert_eq!(body.tiles[0].progress, 80.0);
    assert_eq!(body.humidity, "Humidity: —%");
}

#[test]
fn test_vanished_box_falls_back_to_lowest() {
    let mut card = CardState::new(CardConfig::default());
    card.update_states(snapshot(&[
        ("sensor.k1_cfs_1_temperature", "20"),
        ("sensor.k1_cfs_2_temperature", "20"),
        ("sensor.k1_cfs_3_temperature", "20"),
    ]));
    assert!(card.select_box(3));

    let changed = card.update_states(snapshot(&[
        ("sensor.k1_cfs_2_temperature", "20"),
        ("sensor.k1_cfs_1_temperature", "20"),
    ]));
    assert!(changed);
    assert_eq!(card.selection(), &Selection::new("k1", 1));
}

#[test]
fn test_printer_disappearing_entirely() {
    let mut card = CardState::new(CardConfig::default());
    card.update_states(snapshot(&[("sensor.k1_cfs_0_temperature", "20")]));
    assert!(card.selection().is_complete());

    card.update_states(StateBag::new());
    assert_eq!(card.selection(), &Selection::default());
    assert!(card.reading().is_none());
    assert!(card.view().body.is_none());
}

#[test]
fn test_malformed_snapshot_never_panics() {
    let bag = snapshot(&[
        ("sensor.k1_cfs_0_temperature", "hot"),
        ("sensor.k1_cfs_0_humidity", ""),
        ("sensor.k1_cfs_0_slot_0_percent", "NaN"),
        ("sensor.k1_cfs_0_slot_0_color", "#GGGGGG"),
        ("sensor.k1_cfs_0_slot_1_color", "unknown"),
        ("sensor._cfs_0_temperature", "1"),
        ("sensor.", ""),
        ("", ""),
    ]);
    let catalog = discover(&bag, None);
    assert_eq!(catalog.len(), 1);

    let reading = resolve(&bag, "k1", 0);
    assert_eq!(reading.temperature, Some(FieldValue::Text("hot".into())));
    assert_eq!(reading.slots[0].percent, Some(FieldValue::Text("NaN".into())));
    assert_eq!(reading.slots[0].color, None);
    assert_eq!(reading.slots[1].color, None);

    assert_eq!(resolve(&bag, "nope", 99), Reading::default());
}

#[test]
fn test_calibration_bounds_for_any_input() {
    let coefficient_sets = [
        CalibrationCoefficients::default(),
        CalibrationCoefficients {
            saturation_base: -10.0,
            saturation_gain: -10.0,
            brightness_base: 10.0,
            brightness_gain: 10.0,
            contrast: 0.0,
        },
    ];
    for coefficients in &coefficient_sets {
        for hex in [None, Some(""), Some("#ff0000"), Some("#FFFF00"), Some("#001"), Some("????")] {
            let filter = filter_for(hex, coefficients);
            assert!(filter.hue_rotate_degrees <= 359);
            assert!((0.2..=3.0).contains(&filter.saturation));
            assert!((0.3..=2.5).contains(&filter.brightness));
            assert!((0.5..=2.0).contains(&filter.contrast));
        }
    }
    let red = filter_for(Some("#ff0000"), &CalibrationCoefficients::default());
    assert_eq!(red.hue_rotate_degrees, 0);
}

#[test]
fn test_config_errors_surface() {
    assert!(matches!(
        CardConfig::from_json_str("not json"),
        Err(CfsError::JsonParse(_))
    ));
    let err = CardState::from_config_json("42").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CfsError>(),
        Some(CfsError::InvalidConfig { .. })
    ));
    let mut card = CardState::new(CardConfig::default());
    assert!(card.update_states_json("[]").is_err());
}

#[test]
#[serial]
fn test_logging_init_is_idempotent() {
    let first = init_logging();
    let second = init_logging();
    // Only one global subscriber can ever be installed
    assert!(!(first && second));
    assert!(!second);

    let mut card = CardState::new(CardConfig::default());
    assert!(card.update_states(snapshot(&[("sensor.k1_cfs_0_temperature", "20")])));
}
