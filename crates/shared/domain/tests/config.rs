use drill_domain::config::{ConsoleConfig, EndpointsConfig, HttpConfig, StorageConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let storage = StorageConfig::default();
    assert_eq!(storage.data_dir, std::path::PathBuf::from(".drill"));

    let http = HttpConfig::default();
    assert_eq!(http.timeout_seconds, 15);

    let endpoints = EndpointsConfig::default();
    assert_eq!(endpoints.pagerduty_events, "https://events.pagerduty.com/v2/enqueue");
    assert!(endpoints.datadog.starts_with("https://"));
}

#[test]
fn console_config_deserializes_partially() {
    let raw = json!({
        "storage": { "data_dir": "/var/lib/drill" },
        "http": { "timeout_seconds": 3 },
        "endpoints": { "datadog": "https://api.datadoghq.eu" }
    });

    let cfg: ConsoleConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/var/lib/drill"));
    assert_eq!(cfg.http.timeout_seconds, 3);
    assert_eq!(cfg.http.user_agent, "drill-console");
    assert_eq!(cfg.endpoints.datadog, "https://api.datadoghq.eu");
    assert_eq!(cfg.catalog.scenarios, std::path::PathBuf::from("scenarios.json"));
}

#[test]
fn clones_share_until_mutated() {
    let base = ConsoleConfig::default();
    let mut tweaked = base.clone();
    tweaked.http.timeout_seconds = 1;

    assert_eq!(base.http.timeout_seconds, 15);
    assert_eq!(tweaked.http.timeout_seconds, 1);
}
