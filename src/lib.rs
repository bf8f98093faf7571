// src/lib.rs

//! Simulation core of an automation showcase.
//!
//! Six demo widgets (Excel reporting, marketplace scanning, a messaging bot,
//! AI insights, social auto-posting and ERP integration) are animated by
//! scripted runners that push mock data into a shared [`store::SimulationStore`]
//! at a fixed pace. Nothing is automated for real.
//!
//! ```no_run
//! use showcase_sim::{init, sim, AppContext, DemoId};
//!
//! # async fn demo() -> showcase_sim::ShowcaseResult<()> {
//! let config = init(None)?;
//! let ctx = AppContext::new(config);
//! sim::run_demo(&ctx, DemoId::Excel).await?;
//! println!("{:?}", ctx.store().snapshot().excel.rows);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod clock;
pub mod config;
pub mod contact;
pub mod context;
pub mod error;
pub mod notify;
pub mod preferences;
pub mod sim;
pub mod store;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

mod test_utils;

pub use config::Config;
pub use context::AppContext;
pub use error::{Result as ShowcaseResult, ShowcaseError};
pub use types::{DemoId, LogKind, LogLevel, Severity};

/// Default configuration file looked up when `init` gets no path.
pub const DEFAULT_CONFIG_FILE: &str = "showcase.toml";

/// Loads the configuration and installs the global logger.
///
/// `config_path` defaults to [`DEFAULT_CONFIG_FILE`]; a missing file falls
/// back to built-in defaults. Fails with [`ShowcaseError::AlreadyInitialized`]
/// if a logger has already been installed in this process.
pub fn init(config_path: Option<&str>) -> ShowcaseResult<Config> {
    let config = Config::load(config_path.unwrap_or(DEFAULT_CONFIG_FILE))?;
    init_logging(&config)?;
    log::info!("showcase-sim initialised (log level {})", config.logging.level);
    Ok(config)
}

#[cfg(feature = "logging")]
fn init_logging(config: &Config) -> ShowcaseResult<()> {
    let level = if config.logging.console {
        config.logging.level.to_level_filter()
    } else {
        log::LevelFilter::Off
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| ShowcaseError::already_initialized(format!("logger: {}", e)))
}

#[cfg(not(feature = "logging"))]
fn init_logging(_config: &Config) -> ShowcaseResult<()> {
    Ok(())
}
