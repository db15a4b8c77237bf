//! Configuration module for nxconverge
//!
//! Handles loading and merging configuration from multiple sources:
//! - Default values
//! - System configuration (/etc/nxconverge/nxconverge.toml)
//! - User configuration (~/.nxconverge.toml)
//! - Project configuration (./nxconverge.toml)
//! - Environment variables
//! - Command-line arguments

use crate::platform::Platform;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings
    pub defaults: Defaults,

    /// Colors and output settings
    pub colors: ColorsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Device snapshot used when `--device` is not given
    pub device: Option<PathBuf>,

    /// Platform assumed by `validate` when no device is loaded
    pub platform: Option<Platform>,

    /// Run in check mode unless told otherwise
    pub check_mode: bool,

    /// Show property diffs for changed resources
    pub diff: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub enabled: bool,

    pub ok: String,

    pub changed: String,

    pub failed: String,

    pub diff_add: String,

    pub diff_remove: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ok: "green".to_string(),
            changed: "yellow".to_string(),
            failed: "red".to_string(),
            diff_add: "green".to_string(),
            diff_remove: "red".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when no `-v` flag and no `RUST_LOG` is set
    pub log_level: String,

    /// `text` or `json`
    pub log_format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Explicit path takes priority
        if let Some(path) = explicit_path {
            paths.push(path.clone());
            return paths;
        }

        paths.push(PathBuf::from("/etc/nxconverge/nxconverge.toml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".nxconverge.toml"));
            paths.push(home.join(".config/nxconverge/config.toml"));
        }

        paths.push(PathBuf::from("nxconverge.toml"));

        // Environment variable wins over every standard location
        if let Ok(env_config) = std::env::var("NXCONVERGE_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?,
        };

        Ok(self.merge(file_config))
    }

    fn merge(&self, other: Config) -> Config {
        let defaults = Defaults::default();
        let logging = LoggingConfig::default();
        Config {
            defaults: Defaults {
                device: other.defaults.device.or_else(|| self.defaults.device.clone()),
                platform: other.defaults.platform.or(self.defaults.platform),
                check_mode: if other.defaults.check_mode != defaults.check_mode {
                    other.defaults.check_mode
                } else {
                    self.defaults.check_mode
                },
                diff: if other.defaults.diff != defaults.diff {
                    other.defaults.diff
                } else {
                    self.defaults.diff
                },
            },
            colors: other.colors,
            logging: LoggingConfig {
                log_level: if other.logging.log_level != logging.log_level {
                    other.logging.log_level
                } else {
                    self.logging.log_level.clone()
                },
                log_format: if other.logging.log_format != logging.log_format {
                    other.logging.log_format
                } else {
                    self.logging.log_format.clone()
                },
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // NXCONVERGE_DEVICE
        if let Ok(device) = std::env::var("NXCONVERGE_DEVICE") {
            self.defaults.device = Some(PathBuf::from(device));
        }

        // NXCONVERGE_PLATFORM
        if let Ok(platform) = std::env::var("NXCONVERGE_PLATFORM") {
            match platform.parse() {
                Ok(p) => self.defaults.platform = Some(p),
                Err(e) => tracing::warn!("Ignoring NXCONVERGE_PLATFORM: {}", e),
            }
        }

        // NXCONVERGE_CHECK
        if std::env::var("NXCONVERGE_CHECK").is_ok() {
            self.defaults.check_mode = true;
        }

        // NXCONVERGE_LOG_LEVEL
        if let Ok(level) = std::env::var("NXCONVERGE_LOG_LEVEL") {
            self.logging.log_level = level;
        }

        // NXCONVERGE_LOG_FORMAT
        if let Ok(format) = std::env::var("NXCONVERGE_LOG_FORMAT") {
            self.logging.log_format = format;
        }

        // NO_COLOR
        if std::env::var("NO_COLOR").is_ok() || std::env::var("NXCONVERGE_NO_COLOR").is_ok() {
            self.colors.enabled = false;
        }
    }

    /// Device snapshot path, if one is configured.
    pub fn device_path(&self) -> Option<&PathBuf> {
        self.defaults.device.as_ref()
    }

    /// Load from a specific file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Config::default().merge_from_file(path.as_ref())
    }
}
