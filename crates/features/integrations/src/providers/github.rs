use super::severity;
use crate::credentials::{Credentials, GitHubCredentials};
use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::GITHUB_ACTIONS;
use drill_domain::scenario::Scenario;
use serde_json::{Value, json};
use tracing::instrument;

/// Starts the configured workflow through `workflow_dispatch`.
#[derive(Debug, Clone)]
pub struct GitHubActionsProvider {
    ctx: ProviderContext,
}

impl GitHubActionsProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn dispatch_body(creds: &GitHubCredentials, scenario: &Scenario) -> Value {
        json!({
            "ref": creds.git_ref,
            "inputs": {
                "scenario_id": scenario.id,
                "scenario_name": scenario.name,
                "severity": severity(scenario).unwrap_or("warning"),
                "summary": super::summary(scenario),
            },
        })
    }
}

#[async_trait]
impl IntegrationProvider for GitHubActionsProvider {
    fn key(&self) -> &'static str {
        GITHUB_ACTIONS
    }

    fn name(&self) -> &'static str {
        "GitHub Actions"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<GitHubCredentials>()
    }

    #[instrument(skip(self, scenario), fields(scenario = %scenario.id))]
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        let creds: GitHubCredentials = self.ctx.credentials.get();
        if !creds.is_configured() {
            return Err(IntegrationError::missing(
                "GitHub token, owner or repository not configured",
            ));
        }

        let url = ProviderContext::join(
            &self.ctx.endpoints.github,
            &format!(
                "/repos/{}/{}/actions/workflows/{}/dispatches",
                creds.owner, creds.repo, creds.workflow
            ),
        );
        let response = self
            .ctx
            .http
            .post(url)
            .bearer_auth(&creds.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .json(&Self::dispatch_body(&creds, scenario))
            .send()
            .await
            .context("GitHub workflow dispatch")?;
        ensure_success(response, "GitHub API error").await?;

        Ok(ProviderResult::success(format!(
            "Workflow {} dispatched on {}/{}@{}",
            creds.workflow, creds.owner, creds.repo, creds.git_ref
        )))
    }
}
