//! Error types for the showcase simulation crate
//!
//! The simulation core itself never fails: every store operation and every
//! runner step is total. Errors only arise at the edges of the crate, where
//! configuration files, preference files and the contact store are touched.
//! The main error type is `ShowcaseError`.

use thiserror::Error;

/// Main error type for the showcase crate
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error (JSON): {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("Configuration error (TOML): {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Serialization error (TOML): {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),

    /// Contact submission was rejected or could not be stored
    #[error("Contact error: {0}")]
    Contact(#[from] crate::contact::ContactError),

    /// Unknown demo name
    #[error("Unknown demo: {0}")]
    UnknownDemo(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource is already initialized (e.g. the global logger)
    #[error("Resource already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type alias for operations that can fail with a [ShowcaseError]
pub type Result<T> = std::result::Result<T, ShowcaseError>;

impl ShowcaseError {
    /// Create a new error with a string message
    pub fn new<S: Into<String>>(msg: S) -> Self {
        ShowcaseError::InvalidInput(msg.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ShowcaseError::InvalidInput(msg.into())
    }

    /// Create a new already initialized error
    pub fn already_initialized<S: Into<String>>(what: S) -> Self {
        ShowcaseError::AlreadyInitialized(what.into())
    }
}

impl From<&str> for ShowcaseError {
    fn from(s: &str) -> Self {
        ShowcaseError::new(s)
    }
}

impl From<String> for ShowcaseError {
    fn from(s: String) -> Self {
        ShowcaseError::new(s)
    }
}

impl From<tokio::task::JoinError> for ShowcaseError {
    fn from(err: tokio::task::JoinError) -> Self {
        ShowcaseError::new(format!("Async task error: {}", err))
    }
}
