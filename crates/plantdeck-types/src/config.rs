//! Device configuration for the greenhouse node.
//!
//! A [`NodeConfig`] snapshot is fetched once per settings view, edited
//! locally, and written back via explicit save actions. Nothing here
//! persists on the client across a reload beyond what was last fetched.
//!
//! Raw config arriving from the node may be partial or loosely typed; the
//! client's validator repairs it against the defaults below before a
//! `NodeConfig` is handed to a view. The serde defaults exist so that a
//! trusted, already-validated document round-trips cleanly.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// UI theme choice, persisted on the node so every client agrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    /// Follow the terminal/system preference.
    #[default]
    Auto,
}

impl Theme {
    /// All selectable themes, in display order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Auto];

    /// Wire representation, matching the serde encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    /// Cycle to the next theme (for single-key switching in the UI).
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
            Theme::Auto => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Theme`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {0:?} (expected light, dark, or auto)")]
pub struct ThemeParseError(pub String);

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            other => Err(ThemeParseError(other.to_string())),
        }
    }
}

/// Addressable-LED (WS2812 strip) sub-configuration of the auto-control
/// policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ws2812Config {
    /// Whether auto-control may drive the strip at all.
    pub enabled: bool,
    /// Device-defined color mode (e.g. "white", "warm", "red").
    pub mode: String,
    /// Strip brightness, 0-255.
    pub brightness: u8,
    /// How long the strip stays on per activation, in seconds.
    pub duration_s: u32,
}

impl Default for Ws2812Config {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: "white".to_string(),
            brightness: 128,
            duration_s: 10,
        }
    }
}

/// Automatic actuation policy: watering on low soil moisture and
/// supplemental lighting on low lux, suppressed during quiet hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoControl {
    /// Master switch for the whole policy.
    pub enabled: bool,
    /// `[start, end)` hours of day during which actuation is suppressed.
    /// Always exactly two entries; a wrapped range like `[23, 7]` is valid.
    pub quiet_hours: [u8; 2],
    /// Soil moisture percentage below which the pump runs.
    pub soil_low_threshold: f64,
    /// Pump run time per activation, in seconds.
    pub pump_duration_s: u32,
    /// Lux level the supplemental light aims for.
    pub light_target_lux: f64,
    /// Brightness percentage for the plain (non-addressable) grow light.
    pub normal_light_brightness: u8,
    /// Addressable-LED strip settings, preferred over the plain light when
    /// enabled.
    pub ws2812: Ws2812Config,
}

/// Default quiet hours: 23:00 to 07:00.
pub const DEFAULT_QUIET_HOURS: [u8; 2] = [23, 7];

impl Default for AutoControl {
    fn default() -> Self {
        Self {
            enabled: false,
            quiet_hours: DEFAULT_QUIET_HOURS,
            soil_low_threshold: 35.0,
            pump_duration_s: 3,
            light_target_lux: 350.0,
            normal_light_brightness: 70,
            ws2812: Ws2812Config::default(),
        }
    }
}

/// Full device configuration as held by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// UI theme.
    pub theme: Theme,
    /// Minutes between history log entries. Always positive.
    pub log_interval_min: u32,
    /// Automatic actuation policy.
    pub auto_control: AutoControl,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            log_interval_min: 30,
            auto_control: AutoControl::default(),
        }
    }
}

impl NodeConfig {
    /// The fully-defaulted configuration (the table every repair falls back
    /// to).
    pub fn defaults() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_table() {
        let cfg = NodeConfig::defaults();
        assert_eq!(cfg.theme, Theme::Auto);
        assert_eq!(cfg.log_interval_min, 30);

        let ac = &cfg.auto_control;
        assert!(!ac.enabled);
        assert_eq!(ac.quiet_hours, [23, 7]);
        assert_eq!(ac.soil_low_threshold, 35.0);
        assert_eq!(ac.pump_duration_s, 3);
        assert_eq!(ac.light_target_lux, 350.0);
        assert_eq!(ac.normal_light_brightness, 70);

        let ws = &ac.ws2812;
        assert!(!ws.enabled);
        assert_eq!(ws.mode, "white");
        assert_eq!(ws.brightness, 128);
        assert_eq!(ws.duration_s, 10);
    }

    #[test]
    fn test_theme_round_trip() {
        for theme in Theme::ALL {
            let json = serde_json::to_string(&theme).unwrap();
            let back: Theme = serde_json::from_str(&json).unwrap();
            assert_eq!(back, theme);
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), theme);
        }
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let json = r#"{"theme": "dark", "auto_control": {"enabled": true}}"#;
        let cfg: NodeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.theme, Theme::Dark);
        assert_eq!(cfg.log_interval_min, 30);
        assert!(cfg.auto_control.enabled);
        assert_eq!(cfg.auto_control.quiet_hours, [23, 7]);
    }
}
