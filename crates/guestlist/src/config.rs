//! Configuration management for guestlist.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. The
//! loaded [`Config`] is built once at startup and passed down by reference.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "guestlist";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "guestlist.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "GUESTLIST_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GUESTLIST_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/guestlist/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Invitation output configuration.
    pub invitations: InvitationConfig,
    /// Presentation configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/guestlist/guestlist.db`
    pub database_path: Option<PathBuf>,
}

/// Invitation-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationConfig {
    /// Directory that receives the `qrcodes/` and `invitations/` folders.
    /// Defaults to `~/.local/share/guestlist`
    pub output_dir: Option<PathBuf>,
    /// Edge length of one QR module in pixels.
    pub qr_module_pixels: u32,
}

/// Presentation-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// `strftime` pattern used to show event dates.
    pub date_format: String,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            output_dir: None, // Will be resolved to default at runtime
            qr_module_pixels: 10,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `GUESTLIST_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.invitations.qr_module_pixels == 0 {
            return Err(Error::ConfigValidation {
                message: "qr_module_pixels must be greater than 0".to_string(),
            });
        }

        if self.display.date_format.trim().is_empty()
            || StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(Error::ConfigValidation {
                message: format!("invalid date_format: {:?}", self.display.date_format),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the invitation output directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.invitations
            .output_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }
}
