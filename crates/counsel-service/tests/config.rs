use std::collections::HashMap;

use counsel_service::config::{
    ConfigError, ENV_LOG_FORMAT, ENV_TREND_WINDOW_DAYS, LogFormat, ServiceConfig,
};
use counsel_service::telemetry;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_environment() {
    let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, ServiceConfig::default());
    assert_eq!(config.trend_window_days, 30);
    assert_eq!(config.log_format, LogFormat::Plain);
}

#[test]
fn environment_overrides_defaults() {
    let config = ServiceConfig::from_lookup(lookup(&[
        (ENV_TREND_WINDOW_DAYS, "90"),
        (ENV_LOG_FORMAT, "JSON"),
    ]))
    .unwrap();
    assert_eq!(config.trend_window_days, 90);
    assert_eq!(config.log_format, LogFormat::Json);
}

#[test]
fn invalid_environment_values_are_rejected() {
    for days in ["0", "-3", "month"] {
        let err = ServiceConfig::from_lookup(lookup(&[(ENV_TREND_WINDOW_DAYS, days)])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
    assert!(ServiceConfig::from_lookup(lookup(&[(ENV_LOG_FORMAT, "xml")])).is_err());
}

#[test]
fn unversioned_file_is_migrated() {
    let config = ServiceConfig::from_json_str(r#"{ "window_days": 14 }"#).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.trend_window_days, 14);
}

#[test]
fn newer_file_version_is_rejected() {
    let err = ServiceConfig::from_json_str(r#"{ "config_version": 7 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedVersion(7)));
}

#[test]
fn out_of_range_file_version_is_rejected() {
    let err = ServiceConfig::from_json_str(r#"{ "config_version": 4294967297 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "config_version"));

    let err = ServiceConfig::from_json_str(r#"{ "config_version": -1 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn config_file_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("counsel.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "trend_window_days": 60, "log_format": "json" }"#,
    )
    .unwrap();

    let config = ServiceConfig::load(&path).unwrap();
    assert_eq!(config.trend_window_days, 60);
    assert_eq!(config.log_format, LogFormat::Json);

    let missing = ServiceConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, ConfigError::Read { .. }));
}

#[test]
fn subscriber_installs_once() {
    assert!(telemetry::init(LogFormat::Plain).is_ok());
    assert!(telemetry::init(LogFormat::Json).is_err());
}
