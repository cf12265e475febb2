//! Configuration loading from TOML files

mod rules;

pub use rules::ProfileRules;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Where snapshots are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the per-user data directory
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Guide page content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Directory holding the guide fragments; the bundled text when unset
    #[serde(default)]
    pub content_dir: Option<PathBuf>,
    /// Opening a section closes every other one
    #[serde(default)]
    pub single_open: bool,
}

/// Complete sheet configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub rules: ProfileRules,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub guide: GuideConfig,
}

impl SheetConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: SheetConfig = load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SheetConfig = parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the rule ratios make sense together
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        let ratios = [
            ("hp_min_ratio", rules.hp_min_ratio),
            ("spd_min_ratio", rules.spd_min_ratio),
            ("spd_max_ratio", rules.spd_max_ratio),
            ("ref_min_ratio", rules.ref_min_ratio),
        ];
        for (name, ratio) in ratios {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be between 0 and 1, got {}",
                    name, ratio
                )));
            }
        }
        if rules.spd_min_ratio > rules.spd_max_ratio {
            return Err(ConfigError::ValidationError(
                "spd_min_ratio exceeds spd_max_ratio".to_string(),
            ));
        }
        if !(rules.resistance_budget > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "resistance_budget must be positive, got {}",
                rules.resistance_budget
            )));
        }
        Ok(())
    }
}

/// Get the bundled default configuration
pub fn default_config() -> SheetConfig {
    let toml = include_str!("../../config/sheet.toml");
    SheetConfig::parse(toml).unwrap_or_else(|e| {
        log::error!("Bundled configuration is invalid: {}", e);
        SheetConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = default_config();
        assert_eq!(config.rules, ProfileRules::default());
        assert_eq!(config.rules.resistance_budget_cents(), 300);
        assert!(config.storage.dir.is_none());
        assert!(!config.guide.single_open);
    }

    #[test]
    fn test_partial_config() {
        let config = SheetConfig::parse(
            r#"
[rules]
hp_min_ratio = 0.25

[guide]
single_open = true
"#,
        )
        .unwrap();
        assert!((config.rules.hp_min_ratio - 0.25).abs() < f64::EPSILON);
        assert!((config.rules.spd_max_ratio - 0.6).abs() < f64::EPSILON);
        assert!(config.guide.single_open);
    }

    #[test]
    fn test_invalid_ratio_rejected() {
        let result = SheetConfig::parse("[rules]\nspd_min_ratio = 0.7\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));

        let result = SheetConfig::parse("[rules]\nref_min_ratio = 1.5\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = SheetConfig::parse("[rules\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
