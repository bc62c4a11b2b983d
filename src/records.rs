//! The cleaned wearable-sensor record, as it arrives from ingestion.
//!
//! Parsing and cleaning (string activity levels, malformed stress values,
//! missing readings) happen before this point; a [`SensorRecord`] only ever
//! holds numbers.

use crate::error::{Error, Result};
use ndarray::Array2;

/// Column names of the feature matrix, in order.
pub const FEATURE_NAMES: [&str; 6] = [
    "Heart Rate (BPM)",
    "Blood Oxygen Level (%)",
    "Step Count",
    "Sleep Duration (hours)",
    "Activity Level",
    "Stress Level",
];

/// One user's cleaned daily reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Identifier; carried alongside but never used as a feature.
    pub user_id: u64,
    /// Beats per minute.
    pub heart_rate_bpm: f64,
    /// Blood oxygen saturation, percent.
    pub blood_oxygen_pct: f64,
    /// Steps taken that day.
    pub step_count: f64,
    /// Hours of sleep.
    pub sleep_hours: f64,
    /// 1 = sedentary, 2 = active, 3 = highly active.
    pub activity_level: f64,
    /// 1–10 scale.
    pub stress_level: f64,
}

impl SensorRecord {
    /// Feature values in [`FEATURE_NAMES`] order.
    pub fn features(&self) -> [f64; 6] {
        [
            self.heart_rate_bpm,
            self.blood_oxygen_pct,
            self.step_count,
            self.sleep_hours,
            self.activity_level,
            self.stress_level,
        ]
    }
}

/// Stack records into an N × 6 feature matrix (user ids dropped).
pub fn records_to_matrix(records: &[SensorRecord]) -> Result<Array2<f64>> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }
    let flat: Vec<f64> = records.iter().flat_map(|r| r.features()).collect();
    Array2::from_shape_vec((records.len(), FEATURE_NAMES.len()), flat).map_err(|e| {
        Error::ShapeMismatch {
            expected: format!("{} x {}", records.len(), FEATURE_NAMES.len()),
            actual: e.to_string(),
        }
    })
}
