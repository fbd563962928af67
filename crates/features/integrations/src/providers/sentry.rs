use crate::credentials::{Credentials, SentryCredentials};
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::SENTRY;
use drill_domain::scenario::Scenario;
use drill_kernel::ids::rfc3339_now;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};

fn level(scenario: &Scenario) -> &'static str {
    match scenario.severity.as_deref() {
        Some("critical") => "fatal",
        Some("error") => "error",
        _ => "warning",
    }
}

/// Creates a Sentry issue, retrying through the `store` endpoint when issue creation fails.
#[derive(Debug, Clone)]
pub struct SentryProvider {
    ctx: ProviderContext,
}

#[derive(Deserialize)]
struct CreatedIssue {
    id: Option<String>,
}

impl SentryProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn project_url(&self, creds: &SentryCredentials, endpoint: &str) -> String {
        ProviderContext::join(
            &self.ctx.endpoints.sentry,
            &format!("/api/0/projects/{}/{}/{endpoint}/", creds.org, creds.project),
        )
    }

    fn issue(scenario: &Scenario) -> Value {
        let tags = &scenario.tags;
        let severity = scenario.severity.as_deref().unwrap_or("unknown");
        json!({
            "title": format!("[{severity}] {}", scenario.name),
            "culprit": scenario.target_service,
            "message": scenario.description,
            "level": level(scenario),
            "tags": {
                "scenario_id": scenario.id,
                "service": scenario.target_service,
                "integration": scenario.integration().unwrap_or(SENTRY),
                "industry": tags.industry.join(","),
                "team_type": tags.team_type.join(","),
            },
            "extra": {
                "payload": scenario.payload,
                "expected_priority": scenario.expected_priority,
                "features_demonstrated": scenario.showcased_features(),
            },
        })
    }

    fn store_event(scenario: &Scenario, event_id: &str) -> Value {
        json!({
            "event_id": event_id,
            "timestamp": rfc3339_now(),
            "platform": "other",
            "level": level(scenario),
            "logger": "pagerduty-demo",
            "transaction": scenario.target_service,
            "server_name": "drill-console",
            "environment": "demo",
            "message": {
                "formatted": format!(
                    "[{}] {}: {}",
                    scenario.id, scenario.name, scenario.description
                ),
            },
            "tags": {
                "scenario_id": scenario.id,
                "service": scenario.target_service,
                "severity": scenario.severity,
            },
            "extra": { "scenario": scenario },
        })
    }

    async fn create_issue(
        &self,
        creds: &SentryCredentials,
        scenario: &Scenario,
    ) -> Result<String, IntegrationError> {
        let response = self
            .ctx
            .http
            .post(self.project_url(creds, "issues"))
            .bearer_auth(&creds.auth_token)
            .json(&Self::issue(scenario))
            .send()
            .await
            .context("Sentry issue API")?;
        let issue: CreatedIssue = ensure_success(response, "Sentry API error")
            .await?
            .json()
            .await
            .context("Sentry issue API")?;
        Ok(format!("Issue created: {}", issue.id.as_deref().unwrap_or("pending")))
    }

    async fn store(&self, creds: &SentryCredentials, scenario: &Scenario) -> ProviderResult {
        let event_id = uuid::Uuid::new_v4().simple().to_string();
        let sent = self
            .ctx
            .http
            .post(self.project_url(creds, "store"))
            .bearer_auth(&creds.auth_token)
            .header(
                "X-Sentry-Auth",
                format!(
                    "Sentry sentry_version=7, sentry_client=drill/1.0, sentry_key={}",
                    creds.auth_token
                ),
            )
            .json(&Self::store_event(scenario, &event_id))
            .send()
            .await;

        match sent {
            Ok(response) if response.status().is_success() => {
                ProviderResult::success(format!("Event sent: {}...", &event_id[..8]))
            },
            Ok(response) => ProviderResult::fallback(format!(
                "Sentry API error: {}",
                response.status().as_u16()
            )),
            Err(e) => ProviderResult::fallback(e.to_string()),
        }
    }
}

#[async_trait]
impl IntegrationProvider for SentryProvider {
    fn key(&self) -> &'static str {
        SENTRY
    }

    fn name(&self) -> &'static str {
        "Sentry"
    }

    fn full_flow(&self) -> bool {
        false
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<SentryCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: SentryCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Ok(ProviderResult::fallback("Sentry credentials not configured"));
        }

        match self.create_issue(&creds, scenario).await {
            Ok(message) => Ok(ProviderResult::success(message)),
            Err(e) => {
                debug!(error = %e, "Sentry issue creation failed, sending store event");
                Ok(self.store(&creds, scenario).await)
            },
        }
    }
}
