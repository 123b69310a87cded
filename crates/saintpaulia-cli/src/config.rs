//! Configuration file management.
//!
//! The config file doubles as the settings store: care thresholds, the
//! library layout and page size, plus CLI preferences.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use saintpaulia_core::{CareThresholds, DEFAULT_PER_PAGE, PartialCareThresholds};
use saintpaulia_types::CareType;

use crate::cli::{ConfigKey, ViewMode};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SAINTPAULIA_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default plant snapshot file
    #[serde(default)]
    pub plants: Option<PathBuf>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Library layout
    #[serde(default)]
    pub default_view: ViewMode,

    /// Plants per library page
    #[serde(default = "default_plants_per_page")]
    pub plants_per_page: usize,

    /// Care thresholds in days; missing keys use the defaults
    #[serde(default)]
    pub care: PartialCareThresholds,
}

fn default_plants_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plants: None,
            no_color: false,
            default_view: ViewMode::default(),
            plants_per_page: default_plants_per_page(),
            care: PartialCareThresholds::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("saintpaulia")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => {
                        debug!(path = %path.display(), "Loaded config");
                        return config;
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Resolved care thresholds
    pub fn thresholds(&self) -> CareThresholds {
        self.care.resolve()
    }

    /// Current value of a key, as shown by `config get`
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Plants => self
                .plants
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
            ConfigKey::NoColor => self.no_color.to_string(),
            ConfigKey::DefaultView => self.default_view.key().to_string(),
            ConfigKey::PlantsPerPage => self.plants_per_page.to_string(),
            ConfigKey::Watering => self.thresholds().watering.to_string(),
            ConfigKey::Fertilizing => self.thresholds().fertilizing.to_string(),
            ConfigKey::Grooming => self.thresholds().grooming.to_string(),
        }
    }

    /// Parse and apply a value for a key.
    ///
    /// The config is left untouched if the value is rejected.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::Plants => {
                if value.is_empty() {
                    bail!("Plants path cannot be empty. Use 'config reset plants' to clear it.");
                }
                self.plants = Some(PathBuf::from(value));
            }
            ConfigKey::NoColor => self.no_color = parse_bool(value)?,
            ConfigKey::DefaultView => {
                self.default_view = match value.to_ascii_lowercase().as_str() {
                    "grid" => ViewMode::Grid,
                    "list" => ViewMode::List,
                    _ => bail!("Invalid view '{}'. Valid values: grid, list", value),
                };
            }
            ConfigKey::PlantsPerPage => {
                let per_page: usize = value
                    .parse()
                    .with_context(|| format!("'{}' is not a valid number", value))?;
                if per_page == 0 {
                    bail!("Plants per page must be at least 1");
                }
                self.plants_per_page = per_page;
            }
            ConfigKey::Watering => {
                self.care.watering = Some(self.parse_days(CareType::Watering, value)?)
            }
            ConfigKey::Fertilizing => {
                self.care.fertilizing = Some(self.parse_days(CareType::Fertilizing, value)?)
            }
            ConfigKey::Grooming => {
                self.care.grooming = Some(self.parse_days(CareType::Grooming, value)?)
            }
        }
        Ok(())
    }

    /// Parse a threshold and check the resulting table
    fn parse_days(&self, care_type: CareType, value: &str) -> Result<u32> {
        let days: u32 = value
            .parse()
            .with_context(|| format!("'{}' is not a valid number of days", value))?;
        self.thresholds().with(care_type, days).validate()?;
        Ok(days)
    }

    /// Restore one key to its default
    pub fn reset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::Plants => self.plants = defaults.plants,
            ConfigKey::NoColor => self.no_color = defaults.no_color,
            ConfigKey::DefaultView => self.default_view = defaults.default_view,
            ConfigKey::PlantsPerPage => self.plants_per_page = defaults.plants_per_page,
            ConfigKey::Watering => self.care.watering = None,
            ConfigKey::Fertilizing => self.care.fertilizing = None,
            ConfigKey::Grooming => self.care.grooming = None,
        }
    }
}

/// Parse boolean value with flexible input
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!(
            "Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0",
            s
        ),
    }
}

/// Resolve the snapshot path from arg/env, then config
pub fn resolve_plants(plants: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    plants.or_else(|| config.plants.clone()).ok_or_else(|| {
        anyhow::anyhow!(
            "No plant collection specified. Use --plants <FILE>, set SAINTPAULIA_PLANTS, \
             or run 'saintpaulia config set plants <FILE>'."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.plants.is_none());
        assert!(!config.no_color);
        assert_eq!(config.default_view, ViewMode::Grid);
        assert_eq!(config.plants_per_page, 24);
        assert_eq!(config.thresholds(), CareThresholds::default());
    }

    #[test]
    fn test_config_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_partial_care_table() {
        let toml_str = r#"
default_view = "list"

[care]
fertilizing = 21
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_view, ViewMode::List);
        assert_eq!(config.plants_per_page, 24);
        assert_eq!(config.thresholds(), CareThresholds::new(7, 21, 7));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.set(ConfigKey::Plants, "/tmp/plants.json").unwrap();
        config.set(ConfigKey::Watering, "5").unwrap();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_set_and_get_threshold() {
        let mut config = Config::default();
        assert_eq!(config.get(ConfigKey::Grooming), "7");
        config.set(ConfigKey::Grooming, "10").unwrap();
        assert_eq!(config.get(ConfigKey::Grooming), "10");
        assert_eq!(config.care.grooming, Some(10));
    }

    #[test]
    fn test_set_rejects_zero_threshold() {
        let mut config = Config::default();
        let err = config.set(ConfigKey::Watering, "0").unwrap_err();
        assert!(err.to_string().contains("at least 1"));
        assert_eq!(config.care.watering, None);
    }

    #[test]
    fn test_set_rejects_garbage() {
        let mut config = Config::default();
        assert!(config.set(ConfigKey::Fertilizing, "often").is_err());
        assert!(config.set(ConfigKey::PlantsPerPage, "0").is_err());
        assert!(config.set(ConfigKey::DefaultView, "cards").is_err());
        assert!(config.set(ConfigKey::NoColor, "maybe").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_view_and_color() {
        let mut config = Config::default();
        config.set(ConfigKey::DefaultView, "LIST").unwrap();
        config.set(ConfigKey::NoColor, "yes").unwrap();
        assert_eq!(config.default_view, ViewMode::List);
        assert!(config.no_color);
    }

    #[test]
    fn test_reset_key() {
        let mut config = Config::default();
        config.set(ConfigKey::Watering, "3").unwrap();
        config.set(ConfigKey::PlantsPerPage, "12").unwrap();

        config.reset(ConfigKey::Watering);
        assert_eq!(config.care.watering, None);
        assert_eq!(config.plants_per_page, 12);

        config.reset(ConfigKey::PlantsPerPage);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolve_plants_prefers_argument() {
        let config = Config {
            plants: Some(PathBuf::from("config.json")),
            ..Default::default()
        };
        let resolved = resolve_plants(Some(PathBuf::from("arg.json")), &config).unwrap();
        assert_eq!(resolved, PathBuf::from("arg.json"));

        let resolved = resolve_plants(None, &config).unwrap();
        assert_eq!(resolved, PathBuf::from("config.json"));
    }

    #[test]
    fn test_resolve_plants_missing() {
        let err = resolve_plants(None, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("--plants"));
    }
}
