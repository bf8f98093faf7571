use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation finished well
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    Info,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

/// Tag of a line in a simulated execution console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Neutral progress line
    Info,
    /// Step completed
    Success,
    /// Step failed
    Error,
}
