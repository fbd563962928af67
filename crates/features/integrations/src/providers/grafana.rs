use super::{severity, summary};
use crate::credentials::{Credentials, GrafanaCredentials};
use crate::error::IntegrationError;
use crate::http::{ProviderContext, error_detail};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::GRAFANA;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::unix_millis;
use serde_json::{Value, json};
use tracing::instrument;

/// Creates a Grafana annotation that alert rules can pick up.
#[derive(Debug, Clone)]
pub struct GrafanaProvider {
    ctx: ProviderContext,
}

impl GrafanaProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn annotation(scenario: &Scenario) -> Value {
        let now = unix_millis();
        let mut tags = vec!["demo-alert".to_owned()];
        tags.extend(severity(scenario).map(str::to_owned));
        tags.push(scenario.id.clone());
        tags.push(scenario.payload.payload.detail("service").unwrap_or("demo").to_owned());

        json!({
            "time": now,
            "timeEnd": now,
            "tags": tags,
            "text": format!(
                "<b>{}</b><br/>{}<br/><br/>{}",
                scenario.name,
                summary(scenario),
                scenario.description
            ),
        })
    }
}

#[async_trait]
impl IntegrationProvider for GrafanaProvider {
    fn key(&self) -> &'static str {
        GRAFANA
    }

    fn name(&self) -> &'static str {
        "Grafana"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<GrafanaCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: GrafanaCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Ok(ProviderResult::fallback("Grafana credentials not configured"));
        }

        let sent = self
            .ctx
            .http
            .post(ProviderContext::join(&creds.url, "/api/annotations"))
            .bearer_auth(&creds.api_key)
            .json(&Self::annotation(scenario))
            .send()
            .await;

        Ok(match sent {
            Ok(response) if response.status().is_success() => {
                ProviderResult::success("Annotation created in Grafana")
            },
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                ProviderResult::fallback(
                    error_detail(&body).unwrap_or_else(|| format!("Grafana API error: {status}")),
                )
            },
            Err(e) => ProviderResult::fallback(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_is_tagged_for_alert_rules() {
        let mut scenario = Scenario::new("gf-1", "Latency");
        scenario.payload.payload.severity = Some("warning".into());
        let annotation = GrafanaProvider::annotation(&scenario);
        assert_eq!(annotation["tags"], json!(["demo-alert", "warning", "gf-1", "demo"]));
        assert_eq!(annotation["time"], annotation["timeEnd"]);
    }
}
