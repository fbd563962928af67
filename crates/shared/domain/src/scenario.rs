use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One incident scenario of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_priority: Option<String>,
    #[serde(default)]
    pub required_features: Vec<String>,
    #[serde(default)]
    pub features_demonstrated: Vec<String>,
    #[serde(default)]
    pub tags: ScenarioTags,
    #[serde(default)]
    pub payload: EventEnvelope,
    #[serde(default, rename = "orchestration_trace", alias = "trace")]
    pub trace: Vec<TraceStep>,
}

impl Scenario {
    /// Minimal scenario, mostly for tests and ad-hoc dispatch.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            severity: None,
            target_service: None,
            expected_priority: None,
            required_features: Vec::new(),
            features_demonstrated: Vec::new(),
            tags: ScenarioTags::default(),
            payload: EventEnvelope::default(),
            trace: Vec::new(),
        }
    }

    /// The declared integration key, if any.
    #[must_use]
    pub fn integration(&self) -> Option<&str> {
        self.tags.integration.as_deref().filter(|key| !key.is_empty())
    }

    /// Features the scenario showcases: `required_features`, or `features_demonstrated` when
    /// nothing is required.
    #[must_use]
    pub fn showcased_features(&self) -> &[String] {
        if self.required_features.is_empty() {
            &self.features_demonstrated
        } else {
            &self.required_features
        }
    }

    /// Tools the scenario exercises, falling back to the integration tag.
    #[must_use]
    pub fn tools(&self) -> Vec<&str> {
        if self.tags.tool.is_empty() {
            self.integration().into_iter().collect()
        } else {
            self.tags.tool.iter().map(String::as_str).collect()
        }
    }
}

/// Catalog tags used by the filter facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioTags {
    pub industry: Vec<String>,
    pub team_type: Vec<String>,
    pub org_style: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub tool: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub tool_type: Vec<String>,
    pub features: Vec<String>,
}

/// PagerDuty-style event envelope carried by each scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventEnvelope {
    pub payload: AlertPayload,
    pub links: Vec<Value>,
    pub images: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub custom_details: Map<String, Value>,
}

impl AlertPayload {
    /// A string-valued custom detail.
    #[must_use]
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.custom_details.get(key).and_then(Value::as_str)
    }
}

/// One step of the orchestration trace shown next to a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceStep {
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Accepts `"x"`, `["x", "y"]` or `null`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}
