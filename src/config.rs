//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::branding::{APP_DATA_DIR, CONFIG_DIR_ENV};
use crate::contact::RelayConfig;
use crate::models::Mode;

/// Which mode to show when no choice has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InitialMode {
    /// Start in dark mode
    #[default]
    Dark,
    /// Start in light mode
    Light,
    /// Follow the OS dark/light preference
    System,
}

impl InitialMode {
    /// Resolves the preference to a concrete mode.
    #[must_use]
    pub fn resolve(self) -> Mode {
        match self {
            Self::Dark => Mode::Dark,
            Self::Light => Mode::Light,
            Self::System => Mode::detect_system(),
        }
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Optional JSON file replacing the embedded site content
    #[serde(default)]
    pub content: Option<PathBuf>,
}

/// Appearance defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppearanceConfig {
    /// Mode used before any choice is persisted
    #[serde(default)]
    pub initial_mode: InitialMode,
}

/// Application configuration.
///
/// # File Location
///
/// - `$SECFOLIO_CONFIG_DIR/config.toml` when the variable is set
/// - Linux: `~/.config/secfolio/config.toml`
/// - macOS: `~/Library/Application Support/secfolio/config.toml`
/// - Windows: `%APPDATA%\secfolio\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Appearance defaults
    #[serde(default)]
    pub appearance: AppearanceConfig,
    /// Contact relay credentials
    #[serde(default)]
    pub contact: RelayConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Honors `SECFOLIO_CONFIG_DIR` first, then falls back to the platform
    /// config directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        Self::from_toml(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - the content override (if set) points to an existing file
    /// - the relay endpoint is an http(s) URL
    ///
    /// Placeholder relay credentials are allowed here; the contact form
    /// refuses to submit with them instead.
    pub fn validate(&self) -> Result<()> {
        if let Some(content) = &self.paths.content {
            if !content.is_file() {
                anyhow::bail!("Content file does not exist: {}", content.display());
            }
        }

        let endpoint = self.contact.endpoint.trim();
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            anyhow::bail!("Contact relay endpoint must be an http(s) URL, got '{endpoint}'");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.content, None);
        assert_eq!(config.appearance.initial_mode, InitialMode::Dark);
        assert!(config.contact.check().is_err());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_initial_mode_resolve() {
        assert_eq!(InitialMode::Dark.resolve(), Mode::Dark);
        assert_eq!(InitialMode::Light.resolve(), Mode::Light);
        // Detection depends on the host; it only has to produce a mode
        let _ = InitialMode::System.resolve();
    }

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml(
            r#"
            [appearance]
            initial_mode = "light"

            [contact]
            service_id = "service_abc"
            template_id = "template_xyz"
            public_key = "pk_123"
            "#,
        )
        .unwrap();

        assert_eq!(config.appearance.initial_mode, InitialMode::Light);
        assert_eq!(config.contact.service_id, "service_abc");
        assert!(config.contact.check().is_ok());
        assert!(config.contact.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_validate_content_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();

        config.paths.content = Some(temp_dir.path().join("missing.json"));
        assert!(config.validate().is_err());

        let content = temp_dir.path().join("content.json");
        fs::write(&content, "{}").unwrap();
        config.paths.content = Some(content);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = Config::new();
        config.contact.endpoint = "ftp://relay.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.appearance.initial_mode = InitialMode::System;
        config.contact.public_key = "pk_live".to_string();

        let content = toml::to_string_pretty(&config).unwrap();
        fs::write(&config_file, content).unwrap();

        let loaded = Config::from_toml(&fs::read_to_string(&config_file).unwrap()).unwrap();
        assert_eq!(loaded, config);
    }
}
