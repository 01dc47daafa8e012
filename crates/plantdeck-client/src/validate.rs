//! Standalone configuration validation.
//!
//! [`validate_config`] is a pure function from a raw, possibly-partial
//! configuration document to a fully-defaulted [`NodeConfig`] plus the list
//! of corrections applied. It is deliberately decoupled from rendering and
//! from the settings view so the repair policy is testable on its own.
//!
//! The policy is lenient by design: nothing here is an error. A missing or
//! falsy field takes its default, a malformed quiet-hours pair resets
//! wholesale to `[23, 7]` (never a partial repair), out-of-range brightness
//! clamps, and boolean toggles arriving as strings coerce by exact
//! comparison against the literal `"true"`. Each repair is recorded as a
//! [`Correction`] so the settings view can show what was fixed up.

use std::fmt;

use serde_json::Value;

use plantdeck_types::config::DEFAULT_QUIET_HOURS;
use plantdeck_types::{AutoControl, NodeConfig, Theme, Ws2812Config};

/// One repair applied while validating a raw configuration.
///
/// Marked `#[non_exhaustive]` so new repair kinds can be added without
/// breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Correction {
    /// A missing or falsy field was replaced with its default.
    Defaulted { field: &'static str },
    /// The quiet-hours pair was malformed and reset to `[23, 7]`.
    QuietHoursReset,
    /// A numeric field exceeded its range and was clamped.
    Clamped { field: &'static str },
    /// A boolean toggle arrived as a string and was coerced.
    CoercedBool { field: &'static str },
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correction::Defaulted { field } => write!(f, "{} reset to default", field),
            Correction::QuietHoursReset => write!(
                f,
                "quiet_hours reset to [{}, {}]",
                DEFAULT_QUIET_HOURS[0], DEFAULT_QUIET_HOURS[1]
            ),
            Correction::Clamped { field } => write!(f, "{} clamped to valid range", field),
            Correction::CoercedBool { field } => write!(f, "{} coerced to boolean", field),
        }
    }
}

/// Parse a boolean toggle from its literal string representation.
///
/// Only the exact literal `"true"` is true; everything else, including
/// `"True"`, `"1"`, and `"yes"`, is false. Form inputs carry booleans as
/// text and this is the single place they become real booleans.
pub fn parse_bool_literal(s: &str) -> bool {
    s == "true"
}

/// Parse a quiet-hours text input ("23, 7") into a validated pair.
///
/// The input splits on commas, non-numeric parts are discarded, and the
/// result must be exactly two hour-of-day values; otherwise `None` (callers
/// fall back to [`DEFAULT_QUIET_HOURS`]). Strict arity, lenient fallback:
/// there is never a partial repair.
pub fn parse_quiet_hours(input: &str) -> Option<[u8; 2]> {
    let hours: Vec<u8> = input
        .split(',')
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .collect();
    match hours[..] {
        [start, end] if start < 24 && end < 24 => Some([start, end]),
        _ => None,
    }
}

/// Validate a raw configuration document against the default table.
///
/// Every field of the returned [`NodeConfig`] is populated: absence is
/// never handed to a view. The corrections list records each repair in
/// field order.
pub fn validate_config(raw: &Value) -> (NodeConfig, Vec<Correction>) {
    let mut corrections = Vec::new();
    let defaults = NodeConfig::defaults();

    let theme = match raw.get("theme") {
        Some(Value::String(s)) if !s.is_empty() => s.parse::<Theme>().unwrap_or_else(|_| {
            corrections.push(Correction::Defaulted { field: "theme" });
            defaults.theme
        }),
        _ => {
            corrections.push(Correction::Defaulted { field: "theme" });
            defaults.theme
        }
    };

    let log_interval_min = match positive_int(raw.get("log_interval_min")) {
        Some(v) => v as u32,
        None => {
            corrections.push(Correction::Defaulted {
                field: "log_interval_min",
            });
            defaults.log_interval_min
        }
    };

    let ac_raw = raw.get("auto_control").cloned().unwrap_or(Value::Null);
    let auto_control = validate_auto_control(&ac_raw, &defaults.auto_control, &mut corrections);

    (
        NodeConfig {
            theme,
            log_interval_min,
            auto_control,
        },
        corrections,
    )
}

fn validate_auto_control(
    raw: &Value,
    defaults: &AutoControl,
    corrections: &mut Vec<Correction>,
) -> AutoControl {
    let enabled = coerced_bool(raw.get("enabled"), "auto_control.enabled", corrections);

    let quiet_hours = match raw.get("quiet_hours") {
        Some(Value::Array(entries)) => {
            let hours: Vec<u8> = entries.iter().filter_map(hour_of_day).collect();
            // Strict arity: every entry must parse and exactly two must remain.
            if let ([start, end], 2) = (&hours[..], entries.len()) {
                [*start, *end]
            } else {
                corrections.push(Correction::QuietHoursReset);
                defaults.quiet_hours
            }
        }
        None => defaults.quiet_hours,
        Some(_) => {
            corrections.push(Correction::QuietHoursReset);
            defaults.quiet_hours
        }
    };

    let soil_low_threshold = match positive_num(raw.get("soil_low_threshold")) {
        Some(v) => v,
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.soil_low_threshold",
            });
            defaults.soil_low_threshold
        }
    };

    let pump_duration_s = match positive_int(raw.get("pump_duration_s")) {
        Some(v) => v as u32,
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.pump_duration_s",
            });
            defaults.pump_duration_s
        }
    };

    let light_target_lux = match positive_num(raw.get("light_target_lux")) {
        Some(v) => v,
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.light_target_lux",
            });
            defaults.light_target_lux
        }
    };

    let normal_light_brightness = match positive_int(raw.get("normal_light_brightness")) {
        Some(v) if v <= 100 => v as u8,
        Some(_) => {
            corrections.push(Correction::Clamped {
                field: "auto_control.normal_light_brightness",
            });
            100
        }
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.normal_light_brightness",
            });
            defaults.normal_light_brightness
        }
    };

    let ws_raw = raw.get("ws2812").cloned().unwrap_or(Value::Null);
    let ws2812 = validate_ws2812(&ws_raw, &defaults.ws2812, corrections);

    AutoControl {
        enabled,
        quiet_hours,
        soil_low_threshold,
        pump_duration_s,
        light_target_lux,
        normal_light_brightness,
        ws2812,
    }
}

fn validate_ws2812(
    raw: &Value,
    defaults: &Ws2812Config,
    corrections: &mut Vec<Correction>,
) -> Ws2812Config {
    let enabled = coerced_bool(raw.get("enabled"), "auto_control.ws2812.enabled", corrections);

    let mode = match raw.get("mode") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.ws2812.mode",
            });
            defaults.mode.clone()
        }
    };

    let brightness = match positive_int(raw.get("brightness")) {
        Some(v) if v <= 255 => v as u8,
        Some(_) => {
            corrections.push(Correction::Clamped {
                field: "auto_control.ws2812.brightness",
            });
            255
        }
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.ws2812.brightness",
            });
            defaults.brightness
        }
    };

    let duration_s = match positive_int(raw.get("duration_s")) {
        Some(v) => v as u32,
        None => {
            corrections.push(Correction::Defaulted {
                field: "auto_control.ws2812.duration_s",
            });
            defaults.duration_s
        }
    };

    Ws2812Config {
        enabled,
        mode,
        brightness,
        duration_s,
    }
}

/// Boolean from JSON bool or string literal. A false default is not a
/// correction (false is falsy); a string is recorded as a coercion.
fn coerced_bool(value: Option<&Value>, field: &'static str, corrections: &mut Vec<Correction>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            corrections.push(Correction::CoercedBool { field });
            parse_bool_literal(s)
        }
        _ => false,
    }
}

/// A strictly positive number from JSON number or numeric string.
/// Zero, negatives, and junk are all "falsy" and yield `None`.
fn positive_num(value: Option<&Value>) -> Option<f64> {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.is_finite() && n > 0.0).then_some(n)
}

/// A strictly positive integer (truncating a fractional wire value).
fn positive_int(value: Option<&Value>) -> Option<u64> {
    positive_num(value).map(|n| n as u64)
}

/// An hour-of-day (0-23) from a JSON array entry.
fn hour_of_day(value: &Value) -> Option<u8> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (n.fract() == 0.0 && (0.0..24.0).contains(&n)).then_some(n as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_yields_full_defaults() {
        let (cfg, corrections) = validate_config(&Value::Null);
        assert_eq!(cfg, NodeConfig::defaults());
        // Booleans default silently; everything else is a recorded repair.
        assert!(corrections.contains(&Correction::Defaulted { field: "theme" }));
        assert!(corrections.contains(&Correction::Defaulted {
            field: "log_interval_min"
        }));
    }

    #[test]
    fn test_valid_document_passes_untouched() {
        let raw = json!({
            "theme": "dark",
            "log_interval_min": 15,
            "auto_control": {
                "enabled": true,
                "quiet_hours": [22, 6],
                "soil_low_threshold": 40,
                "pump_duration_s": 5,
                "light_target_lux": 400,
                "normal_light_brightness": 80,
                "ws2812": {"enabled": true, "mode": "warm", "brightness": 200, "duration_s": 20}
            }
        });
        let (cfg, corrections) = validate_config(&raw);
        assert!(corrections.is_empty());
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.auto_control.quiet_hours, [22, 6]);
        assert_eq!(cfg.auto_control.ws2812.brightness, 200);
    }

    #[test]
    fn test_falsy_fields_take_defaults() {
        let raw = json!({"theme": "", "log_interval_min": 0});
        let (cfg, corrections) = validate_config(&raw);
        assert_eq!(cfg.theme, Theme::Auto);
        assert_eq!(cfg.log_interval_min, 30);
        let defaulted = corrections
            .iter()
            .filter(|c| matches!(c, Correction::Defaulted { .. }))
            .count();
        assert!(defaulted >= 2);
    }

    #[test]
    fn test_quiet_hours_arity_violation_resets_whole_pair() {
        for bad in [json!([1, 2, 3]), json!([23]), json!(["abc", 7]), json!("23,7")] {
            let raw = json!({"auto_control": {"quiet_hours": bad}});
            let (cfg, corrections) = validate_config(&raw);
            assert_eq!(cfg.auto_control.quiet_hours, [23, 7]);
            assert!(corrections.contains(&Correction::QuietHoursReset));
        }
    }

    #[test]
    fn test_string_booleans_coerce_to_real_booleans() {
        let raw = json!({"auto_control": {"enabled": "true", "ws2812": {"enabled": "false"}}});
        let (cfg, corrections) = validate_config(&raw);
        assert!(cfg.auto_control.enabled);
        assert!(!cfg.auto_control.ws2812.enabled);
        assert!(corrections.contains(&Correction::CoercedBool {
            field: "auto_control.enabled"
        }));
    }

    #[test]
    fn test_brightness_clamps() {
        let raw = json!({"auto_control": {"ws2812": {"brightness": 999}}});
        let (cfg, corrections) = validate_config(&raw);
        assert_eq!(cfg.auto_control.ws2812.brightness, 255);
        assert!(corrections.contains(&Correction::Clamped {
            field: "auto_control.ws2812.brightness"
        }));
    }

    #[test]
    fn test_parse_quiet_hours() {
        assert_eq!(parse_quiet_hours("23, 7"), Some([23, 7]));
        assert_eq!(parse_quiet_hours("abc"), None);
        assert_eq!(parse_quiet_hours("1,2,3"), None);
        assert_eq!(parse_quiet_hours("25,7"), None);
        assert_eq!(parse_quiet_hours(""), None);
        // Non-numeric parts are discarded before the arity check.
        assert_eq!(parse_quiet_hours("23, x, 7"), Some([23, 7]));
    }

    #[test]
    fn test_parse_bool_literal_is_exact() {
        assert!(parse_bool_literal("true"));
        assert!(!parse_bool_literal("True"));
        assert!(!parse_bool_literal("1"));
        assert!(!parse_bool_literal("yes"));
        assert!(!parse_bool_literal(""));
    }
}
