//! Settings synchronization: load-with-repair and targeted saves.
//!
//! Loading always returns a fully-defaulted [`NodeConfig`] (via the
//! validator), never a partial document. Saves are deliberate, minimal
//! patches: the basic save carries exactly the two basic fields, the theme
//! save carries one, and the automation save carries the parsed
//! `auto_control` block. Unrelated settings are never echoed back.

use serde_json::{Value, json};

use plantdeck_types::config::DEFAULT_QUIET_HOURS;
use plantdeck_types::{AutoControl, NodeConfig, Theme, Ws2812Config};

use crate::error::Result;
use crate::transport::NodeApi;
use crate::validate::{Correction, parse_bool_literal, parse_quiet_hours, validate_config};

/// The repaired configuration plus the repairs that produced it.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub config: NodeConfig,
    pub corrections: Vec<Correction>,
}

/// Fetch and validate the node's settings document.
///
/// A malformed document is not an error; it is repaired field-by-field and
/// the repairs are reported alongside the result.
pub async fn load<A: NodeApi + ?Sized>(api: &A) -> Result<LoadedSettings> {
    let raw = api.load_settings().await?;
    let (config, corrections) = validate_config(&raw);
    Ok(LoadedSettings {
        config,
        corrections,
    })
}

/// Save the two basic settings. The patch carries exactly these fields.
pub async fn save_basic<A: NodeApi + ?Sized>(
    api: &A,
    theme: Theme,
    log_interval_min: u32,
) -> Result<Value> {
    api.save_settings(&json!({
        "theme": theme.as_str(),
        "log_interval_min": log_interval_min,
    }))
    .await
}

/// Persist a theme change as a single-field patch.
///
/// Callers apply the theme locally before calling this; the save is
/// persistence, not activation.
pub async fn save_theme<A: NodeApi + ?Sized>(api: &A, theme: Theme) -> Result<Value> {
    api.save_settings(&json!({ "theme": theme.as_str() })).await
}

/// Raw text inputs from the automation form, exactly as typed.
///
/// Parsing happens in [`parse`](Self::parse); the form itself carries no
/// interpretation so a round-trip through the UI loses nothing.
#[derive(Debug, Clone, Default)]
pub struct AutoControlForm {
    pub enabled: String,
    pub quiet_hours: String,
    pub soil_low_threshold: String,
    pub pump_duration_s: String,
    pub light_target_lux: String,
    pub normal_light_brightness: String,
    pub ws_enabled: String,
    pub ws_mode: String,
    pub ws_brightness: String,
    pub ws_duration_s: String,
}

impl AutoControlForm {
    /// Pre-fill the form from a validated configuration.
    pub fn from_config(ac: &AutoControl) -> Self {
        Self {
            enabled: ac.enabled.to_string(),
            quiet_hours: format!("{}, {}", ac.quiet_hours[0], ac.quiet_hours[1]),
            soil_low_threshold: ac.soil_low_threshold.to_string(),
            pump_duration_s: ac.pump_duration_s.to_string(),
            light_target_lux: ac.light_target_lux.to_string(),
            normal_light_brightness: ac.normal_light_brightness.to_string(),
            ws_enabled: ac.ws2812.enabled.to_string(),
            ws_mode: ac.ws2812.mode.clone(),
            ws_brightness: ac.ws2812.brightness.to_string(),
            ws_duration_s: ac.ws2812.duration_s.to_string(),
        }
    }

    /// Parse the form into a valid [`AutoControl`].
    ///
    /// Booleans coerce by exact comparison against `"true"`; a malformed
    /// quiet-hours pair silently falls back to `[23, 7]`; unparseable
    /// numbers take their defaults; brightness values clamp to range.
    pub fn parse(&self) -> AutoControl {
        let defaults = AutoControl::default();
        AutoControl {
            enabled: parse_bool_literal(self.enabled.trim()),
            quiet_hours: parse_quiet_hours(&self.quiet_hours).unwrap_or(DEFAULT_QUIET_HOURS),
            soil_low_threshold: parse_positive(&self.soil_low_threshold)
                .unwrap_or(defaults.soil_low_threshold),
            pump_duration_s: parse_positive(&self.pump_duration_s)
                .map(|n| n as u32)
                .unwrap_or(defaults.pump_duration_s),
            light_target_lux: parse_positive(&self.light_target_lux)
                .unwrap_or(defaults.light_target_lux),
            normal_light_brightness: parse_positive(&self.normal_light_brightness)
                .map(|n| (n as u64).min(100) as u8)
                .unwrap_or(defaults.normal_light_brightness),
            ws2812: Ws2812Config {
                enabled: parse_bool_literal(self.ws_enabled.trim()),
                mode: if self.ws_mode.trim().is_empty() {
                    Ws2812Config::default().mode
                } else {
                    self.ws_mode.trim().to_string()
                },
                brightness: parse_positive(&self.ws_brightness)
                    .map(|n| (n as u64).min(255) as u8)
                    .unwrap_or(Ws2812Config::default().brightness),
                duration_s: parse_positive(&self.ws_duration_s)
                    .map(|n| n as u32)
                    .unwrap_or(Ws2812Config::default().duration_s),
            },
        }
    }
}

fn parse_positive(s: &str) -> Option<f64> {
    let n = s.trim().parse::<f64>().ok()?;
    (n.is_finite() && n > 0.0).then_some(n)
}

/// Save the automation form as an `auto_control` patch.
pub async fn save_auto_control<A: NodeApi + ?Sized>(
    api: &A,
    form: &AutoControlForm,
) -> Result<Value> {
    let ac = form.parse();
    api.save_settings(&json!({ "auto_control": ac })).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockNode;

    #[tokio::test]
    async fn test_save_basic_sends_exactly_two_fields() {
        let node = MockNode::new();
        save_basic(&node, Theme::Dark, 15).await.unwrap();

        let patches = node.saved_patches();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0], json!({"theme": "dark", "log_interval_min": 15}));
    }

    #[tokio::test]
    async fn test_save_theme_sends_single_field() {
        let node = MockNode::new();
        save_theme(&node, Theme::Light).await.unwrap();
        assert_eq!(node.saved_patches(), vec![json!({"theme": "light"})]);
    }

    #[tokio::test]
    async fn test_load_repairs_malformed_document() {
        let node = MockNode::new();
        node.set_settings(json!({
            "theme": "dark",
            "auto_control": {"quiet_hours": [1, 2, 3]}
        }));

        let loaded = load(&node).await.unwrap();
        assert_eq!(loaded.config.theme, Theme::Dark);
        assert_eq!(loaded.config.auto_control.quiet_hours, [23, 7]);
        assert!(loaded
            .corrections
            .contains(&Correction::QuietHoursReset));
    }

    #[test]
    fn test_form_parses_typed_values() {
        let form = AutoControlForm {
            enabled: "true".to_string(),
            quiet_hours: "22, 6".to_string(),
            soil_low_threshold: "40".to_string(),
            pump_duration_s: "5".to_string(),
            light_target_lux: "400".to_string(),
            normal_light_brightness: "80".to_string(),
            ws_enabled: "false".to_string(),
            ws_mode: "warm".to_string(),
            ws_brightness: "999".to_string(),
            ws_duration_s: "20".to_string(),
        };
        let ac = form.parse();
        assert!(ac.enabled);
        assert_eq!(ac.quiet_hours, [22, 6]);
        assert_eq!(ac.soil_low_threshold, 40.0);
        assert_eq!(ac.ws2812.brightness, 255); // clamped
        assert!(!ac.ws2812.enabled);
    }

    #[test]
    fn test_form_boolean_is_exact_literal() {
        let form = AutoControlForm {
            enabled: "True".to_string(),
            ..AutoControlForm::default()
        };
        assert!(!form.parse().enabled);
    }

    #[test]
    fn test_form_quiet_hours_falls_back_silently() {
        let form = AutoControlForm {
            quiet_hours: "abc".to_string(),
            ..AutoControlForm::default()
        };
        assert_eq!(form.parse().quiet_hours, [23, 7]);
    }

    #[test]
    fn test_form_round_trips_through_config() {
        let ac = AutoControl::default();
        assert_eq!(AutoControlForm::from_config(&ac).parse(), ac);
    }
}
