use drill_domain::scenario::Scenario;
use serde_json::json;

#[test]
fn scenario_accepts_string_or_list_tools() {
    let single: Scenario = serde_json::from_value(json!({
        "id": "PD-001",
        "name": "Database connection storm",
        "tags": { "integration": "datadog", "tool": "datadog", "tool_type": null }
    }))
    .unwrap();
    assert_eq!(single.tags.tool, vec!["datadog"]);
    assert!(single.tags.tool_type.is_empty());

    let many: Scenario = serde_json::from_value(json!({
        "id": "PD-002",
        "name": "Agent triage",
        "tags": { "tool": ["pagerduty_agent_sre", "grafana"] }
    }))
    .unwrap();
    assert_eq!(many.tools(), vec!["pagerduty_agent_sre", "grafana"]);
}

#[test]
fn tools_fall_back_to_integration() {
    let mut scenario = Scenario::new("PD-003", "Memory leak");
    assert!(scenario.tools().is_empty());

    scenario.tags.integration = Some("prometheus".into());
    assert_eq!(scenario.tools(), vec!["prometheus"]);
}

#[test]
fn showcased_features_prefer_required() {
    let mut scenario = Scenario::new("PD-004", "Noise");
    scenario.features_demonstrated = vec!["alert_suppression".into()];
    assert_eq!(scenario.showcased_features(), ["alert_suppression".to_owned()]);

    scenario.required_features = vec!["basic_routing".into()];
    assert_eq!(scenario.showcased_features(), ["basic_routing".to_owned()]);
}

#[test]
fn payload_and_trace_are_parsed() {
    let scenario: Scenario = serde_json::from_value(json!({
        "id": "PD-005",
        "name": "Queue backlog",
        "payload": {
            "payload": {
                "summary": "Queue backlog growing",
                "severity": "error",
                "custom_details": { "env": "staging", "depth": 4000 }
            }
        },
        "orchestration_trace": [
            { "stage": "Global Orchestration", "rule": "route-by-service", "match": "service=queue" }
        ]
    }))
    .unwrap();

    assert_eq!(scenario.payload.payload.detail("env"), Some("staging"));
    assert_eq!(scenario.payload.payload.detail("depth"), None);
    assert_eq!(scenario.trace[0].matched.as_deref(), Some("service=queue"));
    assert_eq!(scenario.integration(), None);
}
