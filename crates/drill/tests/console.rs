use drill::domain::config::ConsoleConfig;
use drill::licensing::{AddonSet, LicenseConfig, PlanKey};
use drill::scenarios::{Facet, ScenarioFilter};
use drill::{Console, ConsoleError};

const CATALOG: &str = r#"{
  "scenarios": [
    { "id": "biz", "name": "Major incident bridge", "severity": "critical",
      "required_features": ["conference_bridge"], "tags": { "integration": "grafana" } },
    { "id": "ops", "name": "Alert storm", "severity": "warning",
      "required_features": ["alert_suppression"], "tags": { "integration": "uptimerobot" } }
  ]
}"#;

fn console(dir: &tempfile::TempDir) -> Console {
    let catalog = dir.path().join("scenarios.json");
    std::fs::write(&catalog, CATALOG).unwrap();

    let mut config = ConsoleConfig::default();
    config.storage.data_dir = dir.path().join("state");
    config.catalog.scenarios = catalog;
    Console::open(config).unwrap()
}

#[test]
fn license_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    console(&dir)
        .licenses()
        .save(&LicenseConfig::with_plan(PlanKey::Business).addon(AddonSet::STATUS_PAGES))
        .unwrap();

    let reopened = console(&dir);
    assert_eq!(reopened.license().plan, Some(PlanKey::Business));
    assert!(reopened.license().has_addon(AddonSet::STATUS_PAGES));
}

#[test]
fn browse_applies_the_saved_license() {
    let dir = tempfile::tempdir().unwrap();
    let console = console(&dir);

    assert_eq!(console.browse(&ScenarioFilter::new()).summary.shown, 2);

    console.licenses().save(&LicenseConfig::with_plan(PlanKey::Business)).unwrap();
    let result = console.browse(&ScenarioFilter::new());
    assert_eq!(result.summary.license_visible, 1);
    assert_eq!(result.scenarios[0].id, "biz");

    let warning_only = ScenarioFilter::new().with(Facet::Severity, ["warning"]);
    assert_eq!(console.browse(&warning_only).summary.shown, 0);
}

#[test]
fn missing_catalog_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ConsoleConfig::default();
    config.storage.data_dir = dir.path().join("state");
    config.catalog.scenarios = dir.path().join("nowhere.json");

    let console = Console::open(config).unwrap();
    assert!(console.scenarios().is_empty());
}

#[test]
fn credentials_are_shared_with_the_dispatcher() {
    let dir = tempfile::tempdir().unwrap();
    let console = console(&dir);
    assert!(!console.dispatcher().is_integration_configured("grafana"));

    console
        .credentials()
        .set_fields("grafana", [("url", "https://grafana.example.com"), ("api_key", "glsa_1")])
        .unwrap();
    assert!(console.dispatcher().is_integration_configured("grafana"));
}

#[tokio::test]
async fn fire_reports_unknown_ids_and_unconfigured_fallbacks() {
    let dir = tempfile::tempdir().unwrap();
    let console = console(&dir);

    assert!(matches!(console.fire("nope").await, Err(ConsoleError::Scenario { .. })));

    let outcome = console.fire("ops").await.unwrap();
    assert!(!outcome.success);
    assert!(!outcome.native_attempted);
    assert_eq!(outcome.integration.as_deref(), Some("uptimerobot"));
    assert_eq!(outcome.original_reason.as_deref(), Some("UptimeRobot credentials not configured"));
}
