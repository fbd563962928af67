use drill_kernel::config::{load_config, load_config_or_env};
use drill_kernel::domain::config::ConsoleConfig;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("drill.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
#[serial]
fn loads_file_values_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[storage]
data_dir = "/srv/drill"

[endpoints]
sentry = "https://de.sentry.io"
"#,
    );

    let cfg: ConsoleConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/srv/drill"));
    assert_eq!(cfg.endpoints.sentry, "https://de.sentry.io");
    assert_eq!(cfg.http.timeout_seconds, 15);
}

#[test]
#[serial]
fn format_follows_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drill.json");
    fs::write(&path, r#"{ "http": { "timeout_seconds": 30, "user_agent": "drill-ci" } }"#).unwrap();

    let cfg: ConsoleConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.http.timeout_seconds, 30);
    assert_eq!(cfg.http.user_agent, "drill-ci");
}

#[test]
#[serial]
fn missing_file_is_an_error_only_when_required() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = load_config::<ConsoleConfig>(Some(&missing)).unwrap_err();
    assert!(err.to_string().starts_with("Config error (Failed to build config"));

    let cfg: ConsoleConfig = load_config_or_env(Some(&missing)).unwrap();
    assert_eq!(cfg.catalog.scenarios, std::path::PathBuf::from("scenarios.json"));
}
