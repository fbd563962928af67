use crate::credentials::{Credentials, NewRelicCredentials};
use crate::error::IntegrationError;
use crate::http::ProviderContext;
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::NEWRELIC;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::unix_millis;
use serde_json::{Value, json};
use tracing::instrument;

/// Records a `PagerDutyDemoScenario` custom event through the Insights collector.
#[derive(Debug, Clone)]
pub struct NewRelicProvider {
    ctx: ProviderContext,
}

impl NewRelicProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn events(scenario: &Scenario) -> Value {
        json!([{
            "eventType": "PagerDutyDemoScenario",
            "scenarioId": scenario.id,
            "scenarioName": scenario.name,
            "description": scenario.description,
            "severity": scenario.severity,
            "targetService": scenario.target_service,
            "expectedPriority": scenario.expected_priority,
            "integration": scenario.integration().unwrap_or(NEWRELIC),
            "industry": scenario.tags.industry.join(","),
            "teamType": scenario.tags.team_type.join(","),
            "timestamp": unix_millis(),
        }])
    }
}

#[async_trait]
impl IntegrationProvider for NewRelicProvider {
    fn key(&self) -> &'static str {
        NEWRELIC
    }

    fn name(&self) -> &'static str {
        "New Relic"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<NewRelicCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: NewRelicCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Ok(ProviderResult::fallback("New Relic credentials not configured"));
        }

        let url = ProviderContext::join(
            &self.ctx.endpoints.newrelic,
            &format!("/v1/accounts/{}/events", creds.account_id),
        );
        let sent = self
            .ctx
            .http
            .post(url)
            .header("Api-Key", &creds.license_key)
            .json(&Self::events(scenario))
            .send()
            .await;

        Ok(match sent {
            Ok(response) if response.status().is_success() => {
                ProviderResult::success(format!("Event sent to account {}", creds.account_id))
            },
            Ok(response) => {
                let status = response.status().as_u16();
                let text = response.text().await.unwrap_or_default();
                ProviderResult::fallback(format!("New Relic API error: {status} - {text}"))
            },
            Err(e) => ProviderResult::fallback(e.to_string()),
        })
    }
}
