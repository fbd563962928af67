use crate::credentials::UptimeRobotCredentials;
use crate::error::IntegrationError;
use crate::http::ProviderContext;
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::UPTIMEROBOT;
use drill_domain::scenario::Scenario;

/// UptimeRobot alerts come from real monitor state; triggers always fall back.
#[derive(Debug, Clone)]
pub struct UptimeRobotProvider {
    ctx: ProviderContext,
}

impl UptimeRobotProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl IntegrationProvider for UptimeRobotProvider {
    fn key(&self) -> &'static str {
        UPTIMEROBOT
    }

    fn name(&self) -> &'static str {
        "UptimeRobot"
    }

    fn full_flow(&self) -> bool {
        false
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<UptimeRobotCredentials>()
    }

    async fn trigger(&self, _scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        if !self.has_credentials() {
            return Err(IntegrationError::missing("UptimeRobot API key not configured"));
        }
        Ok(ProviderResult::fallback(concat!(
            "UptimeRobot alerts are triggered by actual monitor failures. ",
            "Using Events API instead."
        )))
    }
}
