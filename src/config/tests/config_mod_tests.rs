use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_default_values() {
    let cfg = Config::default();
    assert_eq!(cfg.pacing.marketplace_step_ms, 500);
    assert_eq!(cfg.pacing.insight_step_ms, 1500);
    assert_eq!(cfg.notifications.contact_duration_ms, 8000);
    assert_eq!(cfg.simulation.clock, ClockMode::System);
}

#[test]
#[serial]
fn test_load_existing_file_and_missing_file() {
    let dir = tempdir().expect("create temp dir");
    let mut cfg = Config::default();
    cfg.logging.level = LogLevel::Debug;
    cfg.pacing.sync_step_ms = 10;
    cfg.simulation.seed = Some(7);

    let toml_string = toml::to_string(&cfg).expect("serialize config");
    let config_path = dir.path().join("cfg.toml");
    fs::write(&config_path, toml_string).unwrap();

    let loaded = Config::load(&config_path).expect("load existing config");
    assert_eq!(loaded.logging.level, LogLevel::Debug);
    assert_eq!(loaded.pacing.sync_step_ms, 10);
    assert_eq!(loaded.simulation.seed, Some(7));

    let missing_path = dir.path().join("missing.toml");
    let default_loaded = Config::load(&missing_path).expect("load missing");
    assert_eq!(default_loaded.pacing.sync_step_ms, 1500);
}

#[test]
#[serial]
fn test_unreadable_path_is_reported_as_unreadable() {
    let dir = tempdir().expect("create temp dir");
    // A directory exists but cannot be read as a file
    let err = Config::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FileUnreadable(_)), "{:?}", err);
    assert!(err.to_string().starts_with("Configuration file not readable"));
}

#[test]
#[serial]
fn test_partial_file_keeps_section_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[pacing]\nexcel_step_ms = 5\n").unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.pacing.excel_step_ms, 5);
    assert_eq!(loaded.pacing.social_step_ms, 2000);
    assert_eq!(loaded.notifications.default_duration_ms, 5000);
}

#[test]
#[serial]
fn test_load_invalid_toml_fails() {
    let dir = tempdir().expect("create temp dir");
    let invalid_path = dir.path().join("bad.toml");
    fs::write(&invalid_path, "not = [valid\n").unwrap();

    let err = Config::load(&invalid_path);
    assert!(err.is_err());
    let msg = format!("{}", err.unwrap_err());
    assert!(msg.contains("Failed to parse config file"));
}

#[test]
#[serial]
fn test_unknown_section_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unknown.toml");
    fs::write(&path, "[metrics]\nenabled = true\n").unwrap();
    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn test_apply_env_vars() {
    std::env::set_var("SHOWCASE_LOGGING_LEVEL", "debug");
    std::env::set_var("SHOWCASE_SIMULATION_SEED", "42");
    std::env::set_var("SHOWCASE_SIMULATION_CLOCK", "headless");
    std::env::set_var("SHOWCASE_CONTACT_STORE_URL", "file:///tmp/leads.jsonl");
    let mut cfg = Config::default();
    cfg.apply_env_vars().unwrap();
    assert_eq!(cfg.logging.level, LogLevel::Debug);
    assert_eq!(cfg.simulation.seed, Some(42));
    assert_eq!(cfg.simulation.clock, ClockMode::Headless);
    assert_eq!(cfg.contact.store_url, "file:///tmp/leads.jsonl");
    std::env::remove_var("SHOWCASE_LOGGING_LEVEL");
    std::env::remove_var("SHOWCASE_SIMULATION_CLOCK");
    std::env::remove_var("SHOWCASE_CONTACT_STORE_URL");

    std::env::set_var("SHOWCASE_SIMULATION_SEED", "minus one");
    let mut cfg = Config::default();
    assert!(cfg.apply_env_vars().is_err());
    std::env::remove_var("SHOWCASE_SIMULATION_SEED");
}

#[test]
fn test_config_dir_returns_valid_path() {
    if let Some(path) = Config::config_dir() {
        assert!(Path::new(&path).ends_with("showcase-sim"));
    }
}

#[test]
fn test_explicit_preferences_path_wins() {
    let mut cfg = Config::default();
    cfg.preferences.path = Some(PathBuf::from("/tmp/prefs.toml"));
    assert_eq!(cfg.preferences_path(), PathBuf::from("/tmp/prefs.toml"));
}
