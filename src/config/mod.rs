//! Configuration management for the showcase simulators
//!
//! This module handles loading, validating, and providing access to the
//! application configuration. It supports loading configuration from a TOML
//! file, environment variable overrides, and programmatic construction.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod types;
pub mod validation;

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod validation_tests;

#[cfg(test)]
#[path = "tests/config_mod_tests.rs"]
mod config_mod_tests;

use std::{
    env,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use directories::ProjectDirs;

use serde::{Deserialize, Serialize};

use crate::LogLevel;

/// Re-export the error type
pub use error::ConfigError;
pub use types::ClockMode;

/// The environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SHOWCASE_";

/// The application name used for finding config directories
const APP_NAME: &str = "showcase-sim";

/// Main configuration structure for the showcase.
///
/// # Example
///
/// ```no_run
/// use showcase_sim::config::Config;
///
/// // A missing file falls back to defaults plus environment overrides.
/// let config = Config::load("showcase.toml").unwrap();
/// assert!(config.pacing.excel_step_ms > 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Delays between simulator steps
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Toast settings
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Clock and randomness
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Lead capture persistence
    #[serde(default)]
    pub contact: ContactConfig,

    /// User preference file
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Whether to log to the console at all
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
        }
    }
}

/// Per-demo step delays, in milliseconds.
///
/// The defaults reproduce the pacing of the live site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay after each Excel branch row
    pub excel_step_ms: u64,
    /// Delay after each scanned product
    pub marketplace_step_ms: u64,
    /// Delay after each insight analysis phase
    pub insight_step_ms: u64,
    /// Delay after each social post
    pub social_step_ms: u64,
    /// Delay after each integration sync operation
    pub sync_step_ms: u64,
    /// Delay before the bot greets after activation
    pub bot_welcome_ms: u64,
    /// Lower bound of the randomized bot reply delay
    pub bot_reply_min_ms: u64,
    /// Width of the randomized bot reply window
    pub bot_reply_jitter_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            excel_step_ms: 800,
            marketplace_step_ms: 500,
            insight_step_ms: 1500,
            social_step_ms: 2000,
            sync_step_ms: 1500,
            bot_welcome_ms: 1000,
            bot_reply_min_ms: 500,
            bot_reply_jitter_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// Pacing with every delay set to zero, for instant runs.
    pub fn instant() -> Self {
        Self {
            excel_step_ms: 0,
            marketplace_step_ms: 0,
            insight_step_ms: 0,
            social_step_ms: 0,
            sync_step_ms: 0,
            bot_welcome_ms: 0,
            bot_reply_min_ms: 0,
            bot_reply_jitter_ms: 0,
        }
    }

    /// Helper to turn a millisecond field into a [`Duration`].
    pub fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }
}

/// Toast configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Lifetime of a toast when the caller does not choose one
    pub default_duration_ms: u64,
    /// Lifetime of the "request sent" toast after a contact submission
    pub contact_duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 5000,
            contact_duration_ms: 8000,
        }
    }
}

/// Clock and randomness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Which clock implementation to use
    pub clock: ClockMode,
    /// Seed for reply delays and sync counters; `None` seeds from entropy
    pub seed: Option<u64>,
}

/// Lead capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Connection string of the contact store, e.g. `file:///var/lib/showcase/contacts.jsonl`
    pub store_url: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            store_url: "file://./data/contacts.jsonl".to_string(),
        }
    }
}

/// Preference file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Where the theme preference is kept; defaults to the OS config dir
    pub path: Option<PathBuf>,
}

impl Config {
    /// Loads the configuration from the specified path.
    ///
    /// The configuration is assembled in this order:
    /// 1. From the TOML file at `path`, or built-in defaults if it does not exist
    /// 2. Environment variables with the `SHOWCASE_` prefix
    /// 3. Validation
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, if
    /// an override cannot be parsed, or if validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let mut config = match fs::read_to_string(path) {
            Ok(config_str) => toml::from_str::<Config>(&config_str).map_err(|e| {
                ConfigError::validation_error(format!("Failed to parse config file: {}", e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config file not found at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                return Err(ConfigError::file_unreadable(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        config.apply_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Recognised keys: `SHOWCASE_LOGGING_LEVEL`, `SHOWCASE_CONTACT_STORE_URL`,
    /// `SHOWCASE_SIMULATION_SEED`, `SHOWCASE_SIMULATION_CLOCK`.
    ///
    /// # Errors
    ///
    /// Returns an error if any recognised variable cannot be parsed.
    pub fn apply_env_vars(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                if value.trim().is_empty() {
                    continue;
                }

                match stripped.to_lowercase().as_str() {
                    "logging_level" => {
                        self.logging.level = value.parse().map_err(|_| {
                            ConfigError::invalid_value("logging.level", &value, "Invalid log level")
                        })?;
                    }
                    "contact_store_url" => {
                        self.contact.store_url = value.trim().to_string();
                    }
                    "simulation_seed" => {
                        let seed = value.trim().parse::<u64>().map_err(|_| {
                            ConfigError::invalid_value("simulation.seed", &value, "Seed must be an unsigned integer")
                        })?;
                        self.simulation.seed = Some(seed);
                    }
                    "simulation_clock" => {
                        self.simulation.clock = value.trim().parse().map_err(|_| {
                            ConfigError::invalid_value("simulation.clock", &value, "Expected 'system' or 'headless'")
                        })?;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    /// Returns the directory where configuration and preference files live.
    ///
    /// This is OS-specific, e.g. `$HOME/.config/showcase-sim` on Linux.
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "showcase", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }

    /// Resolved location of the preference file.
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences
            .path
            .clone()
            .or_else(|| Self::config_dir().map(|d| d.join("preferences.toml")))
            .unwrap_or_else(|| PathBuf::from("preferences.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.pacing.excel_step_ms, 800);
        assert_eq!(config.notifications.default_duration_ms, 5000);
        assert!(config.simulation.seed.is_none());
    }
}
