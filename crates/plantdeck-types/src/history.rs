//! Historical records returned by the node's range queries.

use serde::{Deserialize, Serialize};

use crate::de::lenient_f64;

/// One row of the node's historical log.
///
/// Returned by `GET /api/history` inside an `items` array, ordered oldest
/// first. Records are consumed read-only: the history view replaces its
/// table and chart wholesale on every query. Values come from a CSV-backed
/// store, so numbers frequently arrive as strings; the lenient deserializer
/// absorbs that.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Preformatted time label for table and chart axes.
    #[serde(default)]
    pub time: String,
    /// Air temperature in degrees Celsius.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_c: Option<f64>,
    /// Relative humidity percentage.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity_pct: Option<f64>,
    /// Ambient light in lux.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light_lux: Option<f64>,
    /// Equivalent CO2 in ppm.
    #[serde(default, deserialize_with = "lenient_f64", rename = "eCO2_ppm")]
    pub eco2_ppm: Option<f64>,
    /// Total volatile organic compounds in ppb.
    #[serde(default, deserialize_with = "lenient_f64", rename = "TVOC_ppb")]
    pub tvoc_ppb: Option<f64>,
    /// Soil moisture percentage.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub soil_moisture_pct: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_derived_row() {
        // History rows come back with every value quoted.
        let json = r#"{
            "time": "2024-01-01 12:00:00",
            "temperature_c": "21.7",
            "humidity_pct": "48",
            "light_lux": "",
            "eCO2_ppm": "612",
            "TVOC_ppb": "9",
            "soil_moisture_pct": "40.5"
        }"#;
        let r: HistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.time, "2024-01-01 12:00:00");
        assert_eq!(r.temperature_c, Some(21.7));
        assert_eq!(r.light_lux, None);
        assert_eq!(r.soil_moisture_pct, Some(40.5));
    }

    #[test]
    fn test_empty_row() {
        let r: HistoryRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(r.time, "");
        assert_eq!(r.temperature_c, None);
    }
}
