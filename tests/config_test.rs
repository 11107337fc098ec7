//! Config file tests
//!
//! Round-trips through real files in a temp directory.

use std::path::PathBuf;
use std::time::Duration;

use movieflex::config::{API_KEY_ENV, DEFAULT_BASE_URL};
use movieflex::{Config, ConfigError};
use tempfile::tempdir;

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        api_key: Some("abc123".into()),
        debounce_ms: 250,
        log_file: Some(PathBuf::from("/tmp/movieflex.log")),
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.debounce_delay(), Duration::from_millis(250));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempdir().unwrap();
    let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "api_key = [not toml").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "debounce_ms = \"fast\"\n").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_empty_file_is_all_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_env_key_fills_missing_file_key() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "debounce_ms = 0\n").unwrap();

    let config = Config::load_from(&path)
        .unwrap()
        .with_env_from(|name| (name == API_KEY_ENV).then(|| "env-key".to_string()));

    assert_eq!(config.api_key().unwrap(), "env-key");
    assert_eq!(config.debounce_delay(), Duration::ZERO);
}

#[test]
fn test_explicit_log_file_wins() {
    let config = Config {
        log_file: Some(PathBuf::from("/var/log/mf.log")),
        ..Config::default()
    };
    assert_eq!(config.log_path(), Some(PathBuf::from("/var/log/mf.log")));
}

#[test]
fn test_absent_default_file_is_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_malformed_default_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "debounce_ms = [").unwrap();

    let err = Config::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
