//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, Default)]
pub struct PathConfig {
    /// Prize pool data file path. When unset, the pool lives at
    /// `data.json` inside the config directory.
    pub data_file: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/PrizeWheel/config.toml`
/// - macOS: `~/Library/Application Support/PrizeWheel/config.toml`
/// - Windows: `%APPDATA%\PrizeWheel\config.toml`
///
/// The `PRIZEWHEEL_CONFIG_DIR` environment variable overrides the config
/// directory entirely (used by tests to isolate state).
///
/// # Validation
///
/// - `data_file`, when set, must not point at an existing directory
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// File system paths
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: PathConfig::default(),
        }
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/PrizeWheel/`
    /// - macOS: `~/Library/Application Support/PrizeWheel/`
    /// - Windows: `%APPDATA%\PrizeWheel\`
    ///
    /// Honors the `PRIZEWHEEL_CONFIG_DIR` environment variable override.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

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

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `data_file`, if set, does not point at an existing directory
    pub fn validate(&self) -> Result<()> {
        if let Some(data_file) = &self.paths.data_file {
            if data_file.is_dir() {
                anyhow::bail!(
                    "Data file path points at a directory: {}",
                    data_file.display()
                );
            }
        }

        Ok(())
    }

    /// Sets the data file path with validation.
    pub fn set_data_file(&mut self, path: PathBuf) -> Result<()> {
        self.paths.data_file = Some(path);
        self.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
