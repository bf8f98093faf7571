//! Core type definitions shared by the store, the runners and the config layer

mod demo;
mod log_level;
mod severity;

pub use demo::DemoId;
pub use log_level::LogLevel;
pub use severity::{LogKind, Severity};
