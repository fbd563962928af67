use super::{detail_or, severity, summary};
use crate::credentials::DatadogCredentials;
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::DATADOG;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::unix_seconds;
use serde_json::{Value, json};
use tracing::{debug, instrument};

/// A synthetic metric pushed above its monitor threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpike {
    pub metric: &'static str,
    pub value: u32,
    pub threshold: u32,
}

const RESPONSE_TIME: MetricSpike =
    MetricSpike { metric: "demo.api.response_time", value: 2500, threshold: 500 };
const DB_CONNECTIONS: MetricSpike =
    MetricSpike { metric: "demo.database.connections", value: 98, threshold: 90 };
const ERROR_RATE: MetricSpike =
    MetricSpike { metric: "demo.api.error_rate", value: 15, threshold: 5 };
const MEMORY: MetricSpike =
    MetricSpike { metric: "demo.system.memory_usage", value: 95, threshold: 85 };
const QUEUE_DEPTH: MetricSpike =
    MetricSpike { metric: "demo.queue.depth", value: 5000, threshold: 1000 };

impl MetricSpike {
    /// Picks the monitor a scenario should trip from its summary and custom details.
    #[must_use]
    pub fn for_scenario(scenario: &Scenario) -> Self {
        let text = scenario.payload.payload.summary.as_deref().unwrap_or_default().to_lowercase();
        let details = &scenario.payload.payload.custom_details;
        let mentions = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if mentions(&["database", "connection"]) || details.contains_key("database") {
            DB_CONNECTIONS
        } else if mentions(&["error rate", "api error"]) || details.contains_key("error_rate") {
            ERROR_RATE
        } else if mentions(&["memory", "mem"]) || details.contains_key("memory_percent") {
            MEMORY
        } else if mentions(&["queue", "backlog", "processing"]) {
            QUEUE_DEPTH
        } else {
            RESPONSE_TIME
        }
    }
}

fn alert_type(severity: Option<&str>) -> &'static str {
    match severity {
        Some("critical" | "error") => "error",
        Some("warning") => "warning",
        _ => "info",
    }
}

fn tags(scenario: &Scenario, default_service: &str) -> Vec<String> {
    let service = scenario
        .payload
        .payload
        .detail("service")
        .or_else(|| scenario.payload.payload.detail("pd_service"))
        .unwrap_or(default_service);
    vec![
        format!("env:{}", detail_or(scenario, "env", "production")),
        format!("service:{service}"),
        format!("scenario:{}", scenario.id),
        "source:demo-dashboard".to_owned(),
        "demo:true".to_owned(),
    ]
}

/// Datadog event plus a metric spike that trips the matching monitor.
#[derive(Debug, Clone)]
pub struct DatadogProvider {
    ctx: ProviderContext,
}

impl DatadogProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn event(scenario: &Scenario) -> Value {
        let details = serde_json::to_string_pretty(&scenario.payload.payload.custom_details)
            .unwrap_or_default();
        json!({
            "title": format!("[DEMO] {}", summary(scenario)),
            "text": format!(
                "Demo scenario: {}\n\n{}\n\nCustom Details:\n{details}",
                scenario.name, scenario.description
            ),
            "alert_type": alert_type(severity(scenario)),
            "source_type_name": "pagerduty-demo",
            "tags": tags(scenario, "demo"),
            "aggregation_key": format!("demo-{}", scenario.id),
        })
    }

    fn series(scenario: &Scenario, spike: MetricSpike) -> Value {
        json!({
            "series": [{
                "metric": spike.metric,
                "type": 0,
                "points": [{ "timestamp": unix_seconds(), "value": spike.value }],
                "tags": tags(scenario, "demo-service"),
            }]
        })
    }

    async fn post(
        &self,
        path: &str,
        api_key: &str,
        body: &Value,
        label: &str,
    ) -> Result<(), IntegrationError> {
        let url = ProviderContext::join(&self.ctx.endpoints.datadog, path);
        let response = self
            .ctx
            .http
            .post(url)
            .header("DD-API-KEY", api_key)
            .json(body)
            .send()
            .await
            .context(label.to_owned())?;
        ensure_success(response, label).await?;
        Ok(())
    }
}

#[async_trait]
impl IntegrationProvider for DatadogProvider {
    fn key(&self) -> &'static str {
        DATADOG
    }

    fn name(&self) -> &'static str {
        "Datadog"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<DatadogCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: DatadogCredentials = self.ctx.credentials.get();
        if creds.api_key.is_empty() {
            return Err(IntegrationError::missing("Datadog API key not configured"));
        }

        let spike = MetricSpike::for_scenario(scenario);
        let event = Self::event(scenario);
        self.post("/api/v1/events", &creds.api_key, &event, "Datadog event API error").await?;
        self.post(
            "/api/v2/series",
            &creds.api_key,
            &Self::series(scenario, spike),
            "Datadog metric API error",
        )
        .await?;

        debug!(metric = spike.metric, value = spike.value, "Datadog spike sent");
        Ok(ProviderResult::success(format!(
            "Event + metric spike ({}={}) sent to Datadog",
            spike.metric, spike.value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(summary: &str) -> Scenario {
        let mut scenario = Scenario::new("dd-1", "Demo");
        scenario.payload.payload.summary = Some(summary.to_owned());
        scenario
    }

    #[test]
    fn spike_follows_the_summary() {
        assert_eq!(MetricSpike::for_scenario(&scenario("Database pool exhausted")), DB_CONNECTIONS);
        assert_eq!(MetricSpike::for_scenario(&scenario("Elevated API error rate")), ERROR_RATE);
        assert_eq!(MetricSpike::for_scenario(&scenario("Memory pressure on web-3")), MEMORY);
        assert_eq!(MetricSpike::for_scenario(&scenario("Order backlog growing")), QUEUE_DEPTH);
        assert_eq!(MetricSpike::for_scenario(&scenario("Checkout is slow")), RESPONSE_TIME);
    }

    #[test]
    fn custom_details_can_pick_the_metric() {
        let mut scenario = scenario("Checkout is slow");
        scenario.payload.payload.custom_details.insert("error_rate".into(), json!("12%"));
        assert_eq!(MetricSpike::for_scenario(&scenario), ERROR_RATE);
    }

    #[test]
    fn event_carries_demo_tags() {
        let mut scenario = scenario("Checkout is slow");
        scenario.payload.payload.severity = Some("critical".into());
        scenario.payload.payload.custom_details.insert("pd_service".into(), json!("checkout"));

        let event = DatadogProvider::event(&scenario);
        assert_eq!(event["title"], "[DEMO] Checkout is slow");
        assert_eq!(event["alert_type"], "error");
        assert_eq!(event["tags"][1], "service:checkout");
        assert_eq!(event["aggregation_key"], "demo-dd-1");
    }
}
