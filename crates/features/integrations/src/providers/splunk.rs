use super::{severity, summary};
use crate::credentials::{Credentials, SplunkCredentials};
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::SPLUNK;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::unix_seconds;
use serde_json::{Map, Value, json};
use tracing::instrument;

/// Sends the scenario to a Splunk HTTP Event Collector.
#[derive(Debug, Clone)]
pub struct SplunkProvider {
    ctx: ProviderContext,
}

impl SplunkProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn event(scenario: &Scenario) -> Value {
        let alert = &scenario.payload.payload;
        let mut event = Map::new();
        event.insert("scenario_id".into(), json!(scenario.id));
        event.insert("scenario_name".into(), json!(scenario.name));
        event.insert("summary".into(), json!(summary(scenario)));
        event.insert("severity".into(), json!(severity(scenario)));
        event.insert("source".into(), json!(alert.source));
        event.extend(alert.custom_details.clone());

        json!({
            "event": event,
            "sourcetype": "pagerduty:demo",
            "source": "demo-dashboard",
            "index": "main",
            "time": unix_seconds(),
        })
    }
}

#[async_trait]
impl IntegrationProvider for SplunkProvider {
    fn key(&self) -> &'static str {
        SPLUNK
    }

    fn name(&self) -> &'static str {
        "Splunk"
    }

    fn full_flow(&self) -> bool {
        false
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<SplunkCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: SplunkCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Err(IntegrationError::missing("Splunk HEC credentials not configured"));
        }

        let response = self
            .ctx
            .http
            .post(creds.hec_url.as_str())
            .header("Authorization", format!("Splunk {}", creds.hec_token))
            .json(&Self::event(scenario))
            .send()
            .await
            .context("Splunk HEC")?;
        ensure_success(response, "Splunk HEC error").await?;

        Ok(ProviderResult::success("Event sent to Splunk"))
    }
}
