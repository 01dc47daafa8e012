//! Lenient deserialization helpers for node responses.
//!
//! The node's firmware serializes sensor values inconsistently: a healthy
//! sensor reports a JSON number, a disconnected one may report null, an
//! empty string, or a quoted number (the CSV-derived history does this). All
//! of those must land as `Option<f64>` without failing the whole response.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Deserialize a JSON number, numeric string, null, or junk into `Option<f64>`.
///
/// Non-finite results (NaN, infinities) normalize to `None` so downstream
/// code never has to re-check them.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(IgnoredAny),
    }

    // Missing fields are handled by #[serde(default)]; anything present but
    // unusable becomes None rather than an error.
    let value = match Option::<Raw>::deserialize(deserializer)? {
        None | Some(Raw::Other(_)) => None,
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok(),
    };

    Ok(value.filter(|n| n.is_finite()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "super::lenient_f64")]
        v: Option<f64>,
    }

    fn parse(json: &str) -> Option<f64> {
        serde_json::from_str::<Wrapper>(json).unwrap().v
    }

    #[test]
    fn test_number() {
        assert_eq!(parse(r#"{"v": 21.5}"#), Some(21.5));
    }

    #[test]
    fn test_numeric_string() {
        assert_eq!(parse(r#"{"v": " 42.0 "}"#), Some(42.0));
    }

    #[test]
    fn test_null_and_missing() {
        assert_eq!(parse(r#"{"v": null}"#), None);
        assert_eq!(parse(r#"{}"#), None);
    }

    #[test]
    fn test_junk() {
        assert_eq!(parse(r#"{"v": "n/a"}"#), None);
        assert_eq!(parse(r#"{"v": [1, 2]}"#), None);
        assert_eq!(parse(r#"{"v": {"nested": true}}"#), None);
    }
}
