//! Unit tests for config module
//!
//! Tests configuration types, defaults, validation and loading.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::fs;

use crate::config::{Config, ConfigPaths, LogLevel, PlaybackConfig};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.playback, PlaybackConfig::default());
    assert!(config.library.index.is_none());
    assert!(config.preferences.file.is_none());
}

#[test]
fn playback_defaults() {
    let playback = PlaybackConfig::default();

    assert_eq!(playback.is_playing_debounce_ms, 250);
    assert_eq!(playback.discontinuity_suppression_ms, 50);
    assert_eq!(playback.position_poll_interval_ms, 100);
    assert_eq!(playback.poll_start_delay_ms, 500);
    assert!(!playback.autoplay);
}

#[test]
fn config_serialize_toml() {
    let config = Config::default();

    let toml_str = toml::to_string(&config).unwrap();
    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[playback]"));
}

#[test]
fn config_deserialize_toml() {
    let toml_str = r#"
        [general]
        log_level = "debug"

        [playback]
        is_playing_debounce_ms = 150
        autoplay = true

        [library]
        index = "/music/library.json"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert_eq!(config.playback.is_playing_debounce_ms, 150);
    assert_eq!(config.playback.position_poll_interval_ms, 100);
    assert!(config.playback.autoplay);
    assert_eq!(
        config.library.index.as_deref(),
        Some(std::path::Path::new("/music/library.json"))
    );
}

#[test]
fn config_empty_toml() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_invalid_toml() {
    let invalid_toml = r#"
        [general
        invalid syntax here
    "#;

    let result: Result<Config, toml::de::Error> = toml::from_str(invalid_toml);

    assert!(result.is_err());
}

#[test]
fn config_unknown_fields() {
    let toml_with_unknown = r#"
        [general]
        log_level = "info"
        unknown_field = "should be ignored"

        [unknown_section]
        some_field = "ignored"
    "#;

    let config: Config = toml::from_str(toml_with_unknown).unwrap();
    assert_eq!(config.general.log_level, LogLevel::Info);
}

#[test]
fn validate_rejects_zero_poll_interval() {
    let mut config = Config::default();
    config.playback.position_poll_interval_ms = 0;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("position_poll_interval_ms"));
}

#[test]
fn validate_rejects_long_windows() {
    let mut config = Config::default();
    config.playback.is_playing_debounce_ms = 10_000;

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("is_playing_debounce_ms"));

    config.playback.is_playing_debounce_ms = 5_000;
    assert!(config.validate().is_ok());
}

#[test]
fn load_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config::load(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(fs::read_to_string(&path).unwrap().starts_with('#'));
}

#[test]
fn load_or_default_survives_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[playback]\nposition_poll_interval_ms = 0\n").unwrap();

    assert!(Config::load(&path).is_err());
    assert_eq!(Config::load_or_default(Some(&path)), Config::default());
}

#[test]
fn config_paths_valid() {
    if std::env::var("HOME").is_ok() {
        let main_path = ConfigPaths::main_config().unwrap();

        assert!(main_path.to_string_lossy().ends_with("config.toml"));
        assert_eq!(
            main_path.parent().and_then(|p| p.file_name()),
            Some(std::ffi::OsStr::new("musicvibe"))
        );
    }
}

#[test]
fn config_schema_lists_sections() {
    let schema = schemars::schema_for!(Config);
    let json = serde_json::to_string(&schema).unwrap();

    assert!(json.contains("playback"));
    assert!(json.contains("is_playing_debounce_ms"));
}
