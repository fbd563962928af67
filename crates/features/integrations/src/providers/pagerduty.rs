use super::summary;
use crate::credentials::{Credentials, PagerDutyCredentials};
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{AlertReceipt, DirectAlerter};
use async_trait::async_trait;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::dedup_key;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

/// Events API v2 `trigger` for `scenario`.
///
/// Scenario metadata goes into `custom_details` first; the scenario's own custom details are
/// merged over it.
#[must_use]
pub fn direct_event(scenario: &Scenario, routing_key: &str, dedup_key: &str) -> Value {
    let alert = &scenario.payload.payload;

    let mut details = Map::new();
    details.insert("scenario_id".into(), json!(scenario.id));
    details.insert("scenario_name".into(), json!(scenario.name));
    details.insert("description".into(), json!(scenario.description));
    details.insert("triggered_by".into(), json!("drill-console"));
    if let Some(integration) = scenario.integration() {
        details.insert("original_integration".into(), json!(integration));
    }
    if let Some(service) = alert.detail("pd_service") {
        details.insert("pd_service".into(), json!(service));
    }
    details.insert("env".into(), json!(alert.detail("env").unwrap_or("production")));
    details.extend(alert.custom_details.clone());

    let source = alert.source.as_deref().or(scenario.integration()).unwrap_or("demo-scenarios");

    json!({
        "routing_key": routing_key,
        "event_action": "trigger",
        "dedup_key": dedup_key,
        "payload": {
            "summary": format!("[DEMO] {}", summary(scenario)),
            "severity": alert.severity.as_deref().unwrap_or("warning"),
            "source": source,
            "custom_details": details,
        },
    })
}

#[derive(Deserialize)]
struct EnqueueResponse {
    dedup_key: Option<String>,
}

/// Triggers incidents directly through the PagerDuty Events API.
#[derive(Debug, Clone)]
pub struct PagerDutyAlerter {
    ctx: ProviderContext,
}

impl PagerDutyAlerter {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl DirectAlerter for PagerDutyAlerter {
    fn is_configured(&self) -> bool {
        self.ctx.credentials.has::<PagerDutyCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn alert(&self, scenario: &Scenario) -> Result<AlertReceipt, IntegrationError> {
        let creds: PagerDutyCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Err(IntegrationError::missing("PagerDuty routing key not configured"));
        }

        let dedup_key = dedup_key(&scenario.id);
        let response = self
            .ctx
            .http
            .post(self.ctx.endpoints.pagerduty_events.as_str())
            .json(&direct_event(scenario, &creds.routing_key, &dedup_key))
            .send()
            .await
            .context("PagerDuty Events API")?;
        let accepted: EnqueueResponse = ensure_success(response, "PagerDuty API error")
            .await?
            .json()
            .await
            .context("PagerDuty Events API")?;

        let dedup_key = accepted.dedup_key.unwrap_or(dedup_key);
        info!(%dedup_key, "Direct alert triggered");
        let message = "Incident triggered directly in PagerDuty".to_owned();
        Ok(AlertReceipt { message, dedup_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_domain::scenario::ScenarioTags;

    #[test]
    fn event_defaults_and_metadata() {
        let mut scenario = Scenario::new("PD-7", "Queue stalled");
        scenario.tags =
            ScenarioTags { integration: Some("uptimerobot".into()), ..ScenarioTags::default() };

        let event = direct_event(&scenario, "R0UTE", "demo-PD-7-1");
        let payload = &event["payload"];
        assert_eq!(event["event_action"], "trigger");
        assert_eq!(payload["summary"], "[DEMO] Queue stalled");
        assert_eq!(payload["severity"], "warning");
        assert_eq!(payload["source"], "uptimerobot");
        assert_eq!(payload["custom_details"]["original_integration"], "uptimerobot");
        assert_eq!(payload["custom_details"]["env"], "production");
    }

    #[test]
    fn scenario_details_override_metadata() {
        let mut scenario = Scenario::new("PD-8", "Cart errors");
        scenario.payload.payload.summary = Some("Cart 500s".into());
        scenario.payload.payload.custom_details.insert("env".into(), json!("staging"));
        scenario.payload.payload.custom_details.insert("triggered_by".into(), json!("chaos"));

        let event = direct_event(&scenario, "R0UTE", "k");
        let details = &event["payload"]["custom_details"];
        assert_eq!(event["payload"]["summary"], "[DEMO] Cart 500s");
        assert_eq!(event["payload"]["source"], "demo-scenarios");
        assert_eq!(details["env"], "staging");
        assert_eq!(details["triggered_by"], "chaos");
        assert!(details.get("original_integration").is_none());
    }
}
