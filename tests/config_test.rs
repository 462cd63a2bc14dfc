//! Integration tests for Settings layered loading.
//!
//! Each test uses its own environment prefix so tests can run in parallel.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use orgchart::application::ApplicationError;
use orgchart::config::Settings;

#[test]
fn given_config_file_when_load_then_file_values_apply() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgchart.toml");
    fs::write(
        &path,
        r#"
chart_file = "/org/chart.toml"
show_ids = true
"#,
    )
    .unwrap();

    let settings = Settings::load_with(Some(&path), "ORGCHART_TEST_FILE").expect("load settings");

    assert_eq!(settings.chart_file, Some(PathBuf::from("/org/chart.toml")));
    assert!(settings.show_ids);
}

#[test]
fn given_missing_config_file_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let settings = Settings::load_with(Some(&path), "ORGCHART_TEST_MISSING").unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_env_override_when_load_then_env_wins_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgchart.toml");
    fs::write(&path, "chart_file = \"/from/file.toml\"\n").unwrap();

    std::env::set_var("ORGCHART_TEST_ENV_CHART_FILE", "/from/env.toml");
    std::env::set_var("ORGCHART_TEST_ENV_SHOW_IDS", "true");
    let settings = Settings::load_with(Some(&path), "ORGCHART_TEST_ENV").unwrap();
    std::env::remove_var("ORGCHART_TEST_ENV_CHART_FILE");
    std::env::remove_var("ORGCHART_TEST_ENV_SHOW_IDS");

    assert_eq!(settings.chart_file, Some(PathBuf::from("/from/env.toml")));
    assert!(settings.show_ids);
}

#[test]
fn given_env_var_in_chart_file_when_load_then_expands_variable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgchart.toml");
    fs::write(&path, "chart_file = \"$ORGCHART_TEST_EXPAND_DIR/chart.toml\"\n").unwrap();

    std::env::set_var("ORGCHART_TEST_EXPAND_DIR", "/srv/org");
    let settings = Settings::load_with(Some(&path), "ORGCHART_TEST_EXPAND").unwrap();
    std::env::remove_var("ORGCHART_TEST_EXPAND_DIR");

    assert_eq!(settings.chart_file, Some(PathBuf::from("/srv/org/chart.toml")));
}

#[test]
fn given_unknown_key_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgchart.toml");
    fs::write(&path, "undo_limit = 3\n").unwrap();

    let err = Settings::load_with(Some(&path), "ORGCHART_TEST_UNKNOWN").unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_settings_when_serialized_then_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orgchart.toml");
    let settings = Settings {
        chart_file: Some(PathBuf::from("/org/chart.toml")),
        show_ids: true,
    };
    fs::write(&path, settings.to_toml().unwrap()).unwrap();

    let loaded = Settings::load_with(Some(&path), "ORGCHART_TEST_ROUNDTRIP").unwrap();

    assert_eq!(loaded, settings);
}
