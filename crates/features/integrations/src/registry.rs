use crate::http::ProviderContext;
use crate::provider::IntegrationProvider;
use crate::providers::{
    CloudWatchProvider, DatadogProvider, GitHubActionsProvider, GrafanaProvider, NewRelicProvider,
    PrometheusProvider, SentryProvider, SplunkProvider, UptimeRobotProvider,
};
use std::sync::Arc;

/// Providers by key, in registration order.
#[derive(Debug, Clone, Default)]
pub struct IntegrationRegistry {
    providers: Vec<Arc<dyn IntegrationProvider>>,
}

impl IntegrationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The nine built-in providers.
    #[must_use]
    pub fn standard(ctx: &ProviderContext) -> Self {
        Self::new()
            .with(DatadogProvider::new(ctx.clone()))
            .with(SentryProvider::new(ctx.clone()))
            .with(GitHubActionsProvider::new(ctx.clone()))
            .with(NewRelicProvider::new(ctx.clone()))
            .with(SplunkProvider::new(ctx.clone()))
            .with(CloudWatchProvider::new(ctx.clone()))
            .with(PrometheusProvider::new(ctx.clone()))
            .with(GrafanaProvider::new(ctx.clone()))
            .with(UptimeRobotProvider::new(ctx.clone()))
    }

    #[must_use]
    pub fn with(mut self, provider: impl IntegrationProvider + 'static) -> Self {
        self.register(Arc::new(provider));
        self
    }

    /// Adds `provider`, replacing any provider registered under the same key.
    pub fn register(&mut self, provider: Arc<dyn IntegrationProvider>) {
        match self.providers.iter_mut().find(|p| p.key() == provider.key()) {
            Some(slot) => *slot = provider,
            None => self.providers.push(provider),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<dyn IntegrationProvider>> {
        self.providers.iter().find(|p| p.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn IntegrationProvider>> {
        self.providers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
