/*
 * Test utilities for the CFS card engine
 *
 * State snapshot builders shared by the unit tests of this crate.
 */

#[cfg(test)]
pub mod test_utils {
    use cfs_core::StateBag;

    /// Ambient and slot entities for one box in the standard naming convention
    pub fn cfs_box(device: &str, index: u64) -> Vec<(String, String)> {
        let prefix = format!("sensor.{}_cfs_{}", device, index);
        let mut entities = vec![
            (format!("{}_temperature", prefix), "24.5".to_string()),
            (format!("{}_humidity", prefix), "37".to_string()),
        ];
        let colors = ["#FF0000", "00ff00", "unknown", "#123"];
        for (slot, color) in colors.iter().enumerate() {
            entities.push((format!("{}_slot_{}_color", prefix, slot), color.to_string()));
            entities.push((format!("{}_slot_{}_percent", prefix, slot), (slot * 25).to_string()));
            entities.push((format!("{}_slot_{}_type", prefix, slot), "PLA".to_string()));
            entities.push((
                format!("{}_slot_{}_selected", prefix, slot),
                if slot == 1 { "1" } else { "0" }.to_string(),
            ));
        }
        entities
    }

    /// Printer `k1` with boxes 0 and 1
    pub fn single_printer_bag() -> StateBag {
        cfs_box("k1", 0)
            .into_iter()
            .chain(cfs_box("k1", 1))
            .collect()
    }
}
