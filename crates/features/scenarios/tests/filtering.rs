use drill_licensing::{AddonSet, FeatureCatalog, LicenseConfig, PlanKey};
use drill_scenarios::{
    Facet, ScenarioCatalog, ScenarioError, ScenarioFilter, available_options, filter,
    filter_by_license,
};
use std::io::Write;

const CATALOG: &str = r#"{
  "scenarios": [
    {
      "id": "fin-db-latency",
      "name": "Payments database latency",
      "severity": "critical",
      "required_features": ["response_mobilizer"],
      "features_demonstrated": ["conference_bridge"],
      "tags": {
        "industry": ["financial_services"],
        "team_type": ["sre"],
        "org_style": ["centralized"],
        "integration": "datadog",
        "tool_type": "apm"
      }
    },
    {
      "id": "retail-noise",
      "name": "Checkout alert storm",
      "severity": "warning",
      "required_features": ["service_orchestration_rules"],
      "tags": {
        "industry": ["retail"],
        "team_type": ["platform"],
        "integration": "prometheus",
        "tool": ["prometheus", "pagerduty_agent_sre"],
        "tool_type": ["metrics", "observability"]
      }
    },
    {
      "id": "media-deploy",
      "name": "Bad deploy rollback",
      "severity": "error",
      "features_demonstrated": ["change_events"],
      "tags": {
        "industry": ["media", "retail"],
        "team_type": ["devops"],
        "integration": "github_actions",
        "tool": "github_actions",
        "features": ["agent_scribe"]
      }
    }
  ]
}"#;

fn catalog() -> ScenarioCatalog {
    ScenarioCatalog::from_json(CATALOG).expect("fixture parses")
}

fn ids(scenarios: &[&drill_scenarios::Scenario]) -> Vec<String> {
    scenarios.iter().map(|s| s.id.clone()).collect()
}

fn tagged(filter: &ScenarioFilter) -> Vec<String> {
    let scenarios = catalog();
    let result =
        drill_scenarios::filter(FeatureCatalog::canonical(), scenarios.all(), &LicenseConfig::default(), filter);
    ids(&result.scenarios)
}

#[test]
fn loads_catalog_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let scenarios = ScenarioCatalog::load(file.path()).unwrap();
    assert_eq!(scenarios.len(), 3);
    assert_eq!(scenarios.get("media-deploy").unwrap().tools(), ["github_actions"]);
    assert!(scenarios.get("nope").is_none());
    assert!(matches!(scenarios.require("nope"), Err(ScenarioError::Internal { .. })));
}

#[test]
fn rejects_bad_catalogs() {
    let duplicate = r#"{ "scenarios": [ { "id": "x", "name": "A" }, { "id": "x", "name": "B" } ] }"#;
    assert!(matches!(
        ScenarioCatalog::from_json(duplicate),
        Err(ScenarioError::DuplicateId { .. })
    ));
    assert!(matches!(
        ScenarioCatalog::from_json(r#"{ "items": [] }"#),
        Err(ScenarioError::Serde { .. })
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ScenarioCatalog::load(dir.path().join("missing.json")),
        Err(ScenarioError::Io { .. })
    ));
}

#[test]
fn unfiltered_license_shows_everything() {
    let scenarios = catalog();
    let visible = filter_by_license(
        FeatureCatalog::canonical(),
        scenarios.all(),
        &LicenseConfig::default(),
    );
    assert_eq!(visible.len(), 3);
}

#[test]
fn plan_hides_scenarios_it_cannot_unlock() {
    let scenarios = catalog();
    let features = FeatureCatalog::canonical();

    let professional = LicenseConfig::with_plan(PlanKey::Professional);
    assert_eq!(
        ids(&filter_by_license(features, scenarios.all(), &professional)),
        ["media-deploy"]
    );

    let business_aiops = LicenseConfig::with_plan(PlanKey::Business).addon(AddonSet::AIOPS);
    assert_eq!(filter_by_license(features, scenarios.all(), &business_aiops).len(), 3);
}

#[test]
fn addon_without_plan_keeps_plan_gated_scenarios() {
    let scenarios = catalog();
    let aiops_only = LicenseConfig::default().addon(AddonSet::AIOPS);
    let visible = filter_by_license(FeatureCatalog::canonical(), scenarios.all(), &aiops_only);
    assert_eq!(visible.len(), 3);
}

#[test]
fn summary_counts_each_stage() {
    let scenarios = catalog();
    let tags = ScenarioFilter::new().with(Facet::Industry, ["retail"]);
    let result = filter(
        FeatureCatalog::canonical(),
        scenarios.all(),
        &LicenseConfig::with_plan(PlanKey::Business),
        &tags,
    );

    assert_eq!(ids(&result.scenarios), ["media-deploy"]);
    assert_eq!(result.summary.shown, 1);
    assert_eq!(result.summary.license_visible, 2);
    assert_eq!(result.summary.total, 3);
}

#[test]
fn values_within_a_facet_are_alternatives() {
    let filter = ScenarioFilter::new().with(Facet::Severity, ["critical", "error"]);
    assert_eq!(tagged(&filter), ["fin-db-latency", "media-deploy"]);
}

#[test]
fn facets_must_all_match() {
    let filter = ScenarioFilter::new()
        .with(Facet::Industry, ["retail"])
        .with(Facet::TeamType, ["platform"]);
    assert_eq!(tagged(&filter), ["retail-noise"]);
}

#[test]
fn tool_falls_back_to_integration() {
    let filter = ScenarioFilter::new().with(Facet::Tool, ["datadog"]);
    assert_eq!(tagged(&filter), ["fin-db-latency"]);
}

#[test]
fn tool_type_accepts_single_strings() {
    let filter = ScenarioFilter::new().with(Facet::ToolType, ["apm", "metrics"]);
    assert_eq!(tagged(&filter), ["fin-db-latency", "retail-noise"]);
}

#[test]
fn features_prefer_required_over_demonstrated() {
    let demonstrated_only = ScenarioFilter::new().with(Facet::Features, ["conference_bridge"]);
    assert!(tagged(&demonstrated_only).is_empty());

    let fallback = ScenarioFilter::new().with(Facet::Features, ["change_events"]);
    assert_eq!(tagged(&fallback), ["media-deploy"]);
}

#[test]
fn agent_type_matches_tool_or_feature_tag() {
    let filter = ScenarioFilter::new().with(Facet::AgentType, ["sre", "scribe"]);
    assert_eq!(tagged(&filter), ["retail-noise", "media-deploy"]);
}

#[test]
fn integration_and_severity_match_exactly() {
    let filter = ScenarioFilter::new()
        .with(Facet::Integration, ["github_actions"])
        .with(Facet::Severity, ["critical"]);
    assert!(tagged(&filter).is_empty());
}

#[test]
fn options_follow_the_active_filter() {
    let scenarios = catalog();
    let features = FeatureCatalog::canonical();
    let license = LicenseConfig::default();

    let idle = ScenarioFilter::new();
    let everything = filter(features, scenarios.all(), &license, &idle);
    let options = available_options(scenarios.all(), &everything.scenarios, &idle);
    assert_eq!(options[&Facet::Industry].len(), 3);
    assert!(options[&Facet::Features].contains("conference_bridge"));

    let active = ScenarioFilter::new().with(Facet::Severity, ["warning"]);
    let narrowed = filter(features, scenarios.all(), &license, &active);
    let options = available_options(scenarios.all(), &narrowed.scenarios, &active);
    assert_eq!(options[&Facet::Industry].iter().collect::<Vec<_>>(), ["retail"]);
    assert_eq!(options[&Facet::Integration].iter().collect::<Vec<_>>(), ["prometheus"]);
    assert!(!options.contains_key(&Facet::OrgStyle));
}

#[test]
fn query_round_trip_keeps_selection() {
    let filter = ScenarioFilter::parse_query("industry=banking,retail&severity=critical");
    assert_eq!(filter.values(Facet::Industry), ["banking", "retail"]);
    assert_eq!(ScenarioFilter::parse_query(&filter.to_query()), filter);
}

#[test]
fn query_values_are_percent_coded() {
    let parsed = ScenarioFilter::parse_query("industry=financial%20services,health+care");
    assert_eq!(parsed.values(Facet::Industry), ["financial services", "health care"]);

    let odd = ScenarioFilter::new().with(Facet::Tool, ["a,b", "x&y=z", "plain"]);
    let query = odd.to_query();
    assert_eq!(query, "tool=a%2Cb,x%26y%3Dz,plain");
    assert_eq!(ScenarioFilter::parse_query(&query), odd);

    let broken = ScenarioFilter::parse_query("severity=100%");
    assert_eq!(broken.values(Facet::Severity), ["100%"]);
}
