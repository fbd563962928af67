use crate::error::IntegrationError;
use async_trait::async_trait;
use drill_domain::scenario::Scenario;
use serde::Serialize;
use std::fmt::Debug;

/// What a native trigger reports back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProviderResult {
    /// The tool accepted the event.
    Success { message: String, dedup_key: Option<String> },
    /// The call went through (or was skipped) but the event still needs a direct alert.
    NeedsFallback { reason: String },
}

impl ProviderResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success { message: message.into(), dedup_key: None }
    }

    pub fn fallback(reason: impl Into<String>) -> Self {
        Self::NeedsFallback { reason: reason.into() }
    }
}

/// A monitoring tool the console can fire a scenario at.
#[async_trait]
pub trait IntegrationProvider: Debug + Send + Sync {
    /// Registry key, as used in `scenario.tags.integration`.
    fn key(&self) -> &'static str;

    /// Display name.
    fn name(&self) -> &'static str;

    /// Whether a native success ends the dispatch chain.
    fn full_flow(&self) -> bool;

    fn has_credentials(&self) -> bool;

    /// Sends the scenario to the tool.
    ///
    /// Errors are routing signals: the dispatcher records them and falls back.
    async fn trigger(&self, scenario: &Scenario) -> Result<ProviderResult, IntegrationError>;
}

/// Sends a scenario straight to the alerting service, bypassing the monitoring tools.
#[async_trait]
pub trait DirectAlerter: Debug + Send + Sync {
    fn is_configured(&self) -> bool;

    async fn alert(&self, scenario: &Scenario) -> Result<AlertReceipt, IntegrationError>;
}

/// Acknowledgement of a direct alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReceipt {
    pub message: String,
    pub dedup_key: String,
}
