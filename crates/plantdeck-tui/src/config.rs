//! Local application configuration.
//!
//! This is the dashboard's own config file (server URL, preferred theme),
//! distinct from the node-side [`plantdeck_types::NodeConfig`] managed on
//! the Settings tab.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use plantdeck_types::Theme;

fn default_server_url() -> String {
    "http://localhost:5000".to_string()
}

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Origin of the greenhouse node's REST API.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Preferred theme, used until the node's setting is loaded.
    #[serde(default)]
    pub theme: Theme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plantdeck")
            .join("config.toml")
    }

    /// Load config from file, or return defaults if not found.
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to parse config, using defaults");
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read config, using defaults");
                }
            }
        }
        Self::default()
    }

    /// Save config to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server_url, "http://localhost:5000");
        assert_eq!(config.theme, Theme::Auto);
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig {
            server_url: "http://greenhouse.local:5000".to_string(),
            theme: Theme::Dark,
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.theme, Theme::Dark);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: AppConfig = toml::from_str(r#"server_url = "http://node:5000""#).unwrap();
        assert_eq!(parsed.server_url, "http://node:5000");
        assert_eq!(parsed.theme, Theme::Auto);
    }
}
