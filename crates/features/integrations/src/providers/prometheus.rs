use super::{detail_or, severity, summary};
use crate::credentials::{Credentials, PrometheusCredentials};
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::PROMETHEUS;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::rfc3339_now;
use serde_json::{Value, json};
use tracing::instrument;

/// Posts a firing alert to Alertmanager.
#[derive(Debug, Clone)]
pub struct PrometheusProvider {
    ctx: ProviderContext,
}

impl PrometheusProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn alerts(scenario: &Scenario) -> Value {
        let alertname = scenario.name.split_whitespace().collect::<Vec<_>>().join("_");
        let service = scenario
            .payload
            .payload
            .detail("service")
            .or_else(|| scenario.payload.payload.detail("pd_service"))
            .unwrap_or("demo");
        json!([{
            "labels": {
                "alertname": alertname,
                "severity": severity(scenario),
                "service": service,
                "env": detail_or(scenario, "env", "production"),
                "scenario_id": scenario.id,
                "source": "demo-dashboard",
            },
            "annotations": {
                "summary": summary(scenario),
                "description": scenario.description,
                "scenario": scenario.name,
            },
            "startsAt": rfc3339_now(),
            "generatorURL": format!("http://demo-dashboard/scenarios/{}", scenario.id),
        }])
    }
}

#[async_trait]
impl IntegrationProvider for PrometheusProvider {
    fn key(&self) -> &'static str {
        PROMETHEUS
    }

    fn name(&self) -> &'static str {
        "Prometheus"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<PrometheusCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: PrometheusCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Err(IntegrationError::missing("Alertmanager URL not configured"));
        }

        let mut request = self
            .ctx
            .http
            .post(ProviderContext::join(&creds.alertmanager_url, "/api/v2/alerts"))
            .json(&Self::alerts(scenario));
        if !creds.username.is_empty() && !creds.password.is_empty() {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().await.context("Alertmanager")?;
        ensure_success(response, "Alertmanager error").await?;

        Ok(ProviderResult::success("Alert sent to Alertmanager"))
    }
}
