//! Configuration validation for the showcase
//!
//! Checks that pacing values are sane, toasts live long enough to be seen,
//! and the contact connection string names a backend this crate can write to.

use url::Url;

use super::error::ConfigError;
use super::{Config, ContactConfig, NotificationConfig, PacingConfig};

/// Upper bound for any single step delay. Anything longer makes a demo look frozen.
const MAX_STEP_MS: u64 = 60_000;

/// Schemes accepted for `contact.store_url`.
pub const SUPPORTED_CONTACT_SCHEMES: &[&str] = &["file"];

/// Validates the application configuration.
///
/// # Errors
///
/// Returns a `ConfigError` describing the first failing check.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_pacing_config(&config.pacing)?;
    validate_notification_config(&config.notifications)?;
    validate_contact_config(&config.contact)?;

    if !config.logging.console {
        log::warn!("Console logging is disabled. No logs will be captured.");
    }

    Ok(())
}

/// Validates simulator pacing.
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    let steps = [
        ("pacing.excel_step_ms", config.excel_step_ms),
        ("pacing.marketplace_step_ms", config.marketplace_step_ms),
        ("pacing.insight_step_ms", config.insight_step_ms),
        ("pacing.social_step_ms", config.social_step_ms),
        ("pacing.sync_step_ms", config.sync_step_ms),
        ("pacing.bot_welcome_ms", config.bot_welcome_ms),
        ("pacing.bot_reply_min_ms", config.bot_reply_min_ms),
        ("pacing.bot_reply_jitter_ms", config.bot_reply_jitter_ms),
    ];

    for (field, value) in steps {
        if value > MAX_STEP_MS {
            return Err(ConfigError::invalid_value(
                field,
                value,
                format!("Step delays must not exceed {} ms", MAX_STEP_MS),
            ));
        }
    }

    Ok(())
}

/// Validates toast lifetimes.
fn validate_notification_config(config: &NotificationConfig) -> Result<(), ConfigError> {
    if config.default_duration_ms == 0 {
        return Err(ConfigError::invalid_value(
            "notifications.default_duration_ms",
            config.default_duration_ms,
            "Toasts must stay visible for a positive duration",
        ));
    }
    if config.contact_duration_ms == 0 {
        return Err(ConfigError::invalid_value(
            "notifications.contact_duration_ms",
            config.contact_duration_ms,
            "Toasts must stay visible for a positive duration",
        ));
    }
    Ok(())
}

/// Validates the contact store connection string.
pub fn validate_contact_config(config: &ContactConfig) -> Result<(), ConfigError> {
    if config.store_url.trim().is_empty() {
        return Err(ConfigError::invalid_value(
            "contact.store_url",
            "",
            "Connection string cannot be empty",
        ));
    }

    let url = Url::parse(&config.store_url)?;
    if !SUPPORTED_CONTACT_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::invalid_value(
            "contact.store_url",
            &config.store_url,
            format!("Unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(())
}
