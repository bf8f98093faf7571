//! Error types for configuration handling
//!
//! Loading a showcase configuration can fail while reading the TOML file,
//! while applying `SHOWCASE_` environment overrides, or during validation of
//! pacing, notification and contact settings.

use std::io;
use thiserror::Error;

/// Errors raised while loading, overriding or validating a [`super::Config`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error occurred while reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing the configuration file (invalid TOML).
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Error serializing the configuration.
    #[error("Failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A connection string could not be parsed.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// Invalid configuration value.
    #[error("Invalid value for '{field}': '{value}'. {reason}")]
    InvalidValue {
        /// The name of the field that has an invalid value.
        field: String,
        /// The invalid value.
        value: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// Configuration file exists but could not be read.
    #[error("Configuration file not readable: {0}")]
    FileUnreadable(String),
}

impl ConfigError {
    /// Creates a new invalid value error.
    pub fn invalid_value<S1, S2, S3>(field: S1, value: S2, reason: S3) -> Self
    where
        S1: Into<String>,
        S2: std::fmt::Display,
        S3: Into<String>,
    {
        ConfigError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a new validation error.
    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        ConfigError::ValidationError(message.into())
    }

    /// Creates a new unreadable file error.
    pub fn file_unreadable<S: Into<String>>(path: S) -> Self {
        ConfigError::FileUnreadable(path.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("pacing.excel_step_ms", 0, "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'pacing.excel_step_ms': '0'. must be positive"
        );
    }
}
