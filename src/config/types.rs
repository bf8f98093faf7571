//! Type definitions for configuration

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which clock drives the simulators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ClockMode {
    /// Tokio timers plus the local wall clock
    System,
    /// Tokio timers, no wall clock: timestamps render as placeholders
    Headless,
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::System
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_clock_mode_parsing() {
        assert_eq!(ClockMode::from_str("system").unwrap(), ClockMode::System);
        assert_eq!(ClockMode::from_str("headless").unwrap(), ClockMode::Headless);
        assert!(ClockMode::from_str("atomic").is_err());
    }
}
