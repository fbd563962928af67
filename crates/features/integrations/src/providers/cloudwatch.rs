use crate::credentials::CloudWatchCredentials;
use crate::error::IntegrationError;
use crate::http::ProviderContext;
use crate::provider::{IntegrationProvider, ProviderResult};
use async_trait::async_trait;
use drill_domain::constants::CLOUDWATCH;
use drill_domain::scenario::Scenario;

/// CloudWatch alarms need a signed AWS SDK call, so every trigger asks for the direct alert.
#[derive(Debug, Clone)]
pub struct CloudWatchProvider {
    ctx: ProviderContext,
}

impl CloudWatchProvider {
    #[must_use]
    pub const fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl IntegrationProvider for CloudWatchProvider {
    fn key(&self) -> &'static str {
        CLOUDWATCH
    }

    fn name(&self) -> &'static str {
        "CloudWatch"
    }

    fn full_flow(&self) -> bool {
        true
    }

    fn has_credentials(&self) -> bool {
        self.ctx.credentials.has::<CloudWatchCredentials>()
    }

    async fn trigger(&self, _scenario: &Scenario) -> Result<ProviderResult, IntegrationError> {
        if !self.has_credentials() {
            return Err(IntegrationError::missing("AWS credentials not configured"));
        }
        Ok(ProviderResult::fallback("CloudWatch requires AWS SDK. Using Events API instead."))
    }
}
