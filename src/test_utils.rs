// src/test_utils.rs

#![cfg(test)] // Ensure this module is only compiled for tests

use std::sync::Arc;

use chrono::NaiveTime;

use crate::clock::{FixedClock, HeadlessClock};
use crate::config::{ClockMode, Config};
use crate::context::AppContext;

/// Seed shared by unit tests that depend on randomized delays or counters.
pub const TEST_SEED: u64 = 42;

/// Default pacing, headless clock, fixed seed.
pub fn get_test_config() -> Config {
    let mut config = Config::default();
    config.simulation.clock = ClockMode::Headless;
    config.simulation.seed = Some(TEST_SEED);
    config
}

/// Context without a wall clock; timestamps come out as placeholders.
pub fn test_context() -> AppContext {
    AppContext::with_clock(get_test_config(), Arc::new(HeadlessClock))
}

/// Context whose local time is always 09:15:00.
pub fn fixed_context() -> AppContext {
    let time = NaiveTime::from_hms_opt(9, 15, 0).unwrap();
    AppContext::with_clock(get_test_config(), Arc::new(FixedClock(time)))
}
