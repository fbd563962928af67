use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level console configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfigInner {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub endpoints: EndpointsConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(flatten, default)]
    inner: Arc<ConsoleConfigInner>,
}

impl Deref for ConsoleConfig {
    type Target = ConsoleConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ConsoleConfig {
    fn deref_mut(&mut self) -> &mut ConsoleConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where settings (license, credentials, orchestrator URL) are persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON file holding `{ "scenarios": [...] }`.
    pub scenarios: PathBuf,
}

/// Outbound HTTP settings shared by every provider call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Base URLs of the hosted services. Overridable for staging regions or tests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub pagerduty_events: String,
    pub datadog: String,
    pub sentry: String,
    pub newrelic: String,
    pub github: String,
}

// --- Default ---

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".drill") }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { scenarios: PathBuf::from("scenarios.json") }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 15, user_agent: "drill-console".to_owned() }
    }
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            pagerduty_events: "https://events.pagerduty.com/v2/enqueue".to_owned(),
            datadog: "https://api.us5.datadoghq.com".to_owned(),
            sentry: "https://us.sentry.io".to_owned(),
            newrelic: "https://insights-collector.newrelic.com".to_owned(),
            github: "https://api.github.com".to_owned(),
        }
    }
}
