//! Configuration module for iquote
//!
//! Settings are layered: built-in defaults, then the optional config file in
//! the user's config directory (`~/.config/iquote/config.toml` on Linux),
//! then `IQUOTE_*` environment variables. Command-line flags are applied on
//! top by the caller.

use crate::search::{DEFAULT_DEBOUNCE, DEFAULT_TRANSLATION, SearchOptions};
use crate::share::ShareSettings;
use crate::source::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, MAX_LIMIT};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `IQUOTE_TRANSLATION=KJV`
pub const ENV_PREFIX: &str = "IQUOTE";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IquoteConfig {
    /// Verse search endpoint; the translation code is appended as a path segment
    pub endpoint: String,

    /// Translation code searched and shown when a verse carries none
    pub translation: String,

    /// Maximum results per search (1-128)
    pub limit: u32,

    /// Match whole words only
    pub match_whole: bool,

    /// Pause in typing before a search is sent, in milliseconds
    pub debounce_ms: u64,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Share link settings
    pub share: ShareSettings,
}

impl Default for IquoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            translation: DEFAULT_TRANSLATION.to_string(),
            limit: MAX_LIMIT,
            match_whole: false,
            debounce_ms: u64::try_from(DEFAULT_DEBOUNCE.as_millis()).unwrap_or(500),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            share: ShareSettings::default(),
        }
    }
}

impl IquoteConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("iquote").join("config.toml"))
    }

    /// Get the path of the TUI log file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn log_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("iquote").join("iquote.log"))
    }

    /// Load configuration from the default path
    ///
    /// A missing file is not an error; defaults and environment overrides
    /// still apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file or environment cannot be
    /// parsed, or holds invalid values.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed, or if
    /// the resulting configuration is invalid.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific file path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = self.to_toml()?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Render the configuration as pretty TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Check values that cannot be corrected silently
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Message("endpoint must not be empty".to_string()));
        }
        if self.translation.trim().is_empty() {
            return Err(ConfigError::Message("translation must not be empty".to_string()));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ConfigError::Message(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Message("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Search settings for a controller built from this configuration
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            translation: self.translation.trim().to_string(),
            match_whole: self.match_whole,
            limit: self.limit,
            debounce: self.debounce(),
        }
    }
}
