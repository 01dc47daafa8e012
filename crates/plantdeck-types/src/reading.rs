//! Live sensor readings from the greenhouse node.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::de::lenient_f64;

/// One live sample from the node's sensor suite.
///
/// Every measured field is optional: a sensor may be absent, warming up, or
/// mid-fault, and the node reports whatever it has. Consumers render missing
/// values with [`crate::format_metric`], never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in degrees Celsius.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub temperature_c: Option<f64>,
    /// Relative humidity percentage.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub humidity_pct: Option<f64>,
    /// Ambient light level in lux.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub light_lux: Option<f64>,
    /// Soil moisture percentage.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub soil_moisture_pct: Option<f64>,
    /// Equivalent CO2 estimate in ppm, from the air-quality sensor.
    #[serde(default, deserialize_with = "lenient_f64", rename = "eCO2_ppm")]
    pub eco2_ppm: Option<f64>,
    /// Total volatile organic compounds in ppb.
    #[serde(default, deserialize_with = "lenient_f64", rename = "TVOC_ppb")]
    pub tvoc_ppb: Option<f64>,
    /// Capture time as epoch seconds. Absent on some firmware builds.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub timestamp: Option<f64>,
}

impl SensorReading {
    /// The capture time, falling back to `now` when the node omitted it.
    pub fn timestamp_or(&self, now: OffsetDateTime) -> OffsetDateTime {
        self.timestamp
            .and_then(|secs| OffsetDateTime::from_unix_timestamp(secs as i64).ok())
            .unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_reading() {
        let json = r#"{
            "temperature_c": 23.4,
            "humidity_pct": 51.0,
            "light_lux": 320,
            "soil_moisture_pct": 44.2,
            "eCO2_ppm": 600,
            "TVOC_ppb": 12,
            "timestamp": 1700000000
        }"#;
        let r: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(r.temperature_c, Some(23.4));
        assert_eq!(r.eco2_ppm, Some(600.0));
        assert_eq!(r.tvoc_ppb, Some(12.0));
    }

    #[test]
    fn test_partial_reading_with_junk() {
        // A faulted soil probe reports a string, the air-quality sensor is
        // missing entirely. Neither may fail the deserialization.
        let json = r#"{"temperature_c": 20.0, "soil_moisture_pct": "err"}"#;
        let r: SensorReading = serde_json::from_str(json).unwrap();
        assert_eq!(r.temperature_c, Some(20.0));
        assert_eq!(r.soil_moisture_pct, None);
        assert_eq!(r.eco2_ppm, None);
    }

    #[test]
    fn test_timestamp_fallback() {
        let now = OffsetDateTime::from_unix_timestamp(1_700_000_500).unwrap();

        let r: SensorReading = serde_json::from_str(r#"{"timestamp": 1700000000}"#).unwrap();
        assert_eq!(r.timestamp_or(now).unix_timestamp(), 1_700_000_000);

        let r: SensorReading = serde_json::from_str("{}").unwrap();
        assert_eq!(r.timestamp_or(now), now);
    }
}
