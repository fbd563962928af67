//! Facade crate for the Drill Console.
//! Re-exports the slices and composes them into a [`Console`].
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Load a [`ConsoleConfig`] (see [`kernel::config`]).
//! - Call [`Console::open`] once and hand the console to the presentation layer.

mod error;

pub use crate::error::{ConsoleError, ConsoleErrorExt};
pub use drill_domain as domain;
pub use drill_integrations as integrations;
pub use drill_kernel as kernel;
pub use drill_licensing as licensing;
pub use drill_scenarios as scenarios;
pub use drill_store as store;

use drill_domain::config::ConsoleConfig;
use drill_integrations::{
    CredentialStore, DispatchOutcome, Dispatcher, IntegrationRegistry, OrchestratorClient,
    PagerDutyAlerter, ProviderContext,
};
use drill_licensing::{FeatureCatalog, LicenseConfig, LicenseConfigStore};
use drill_scenarios::{FilteredScenarios, ScenarioCatalog, ScenarioFilter};
use drill_store::{FileStore, KeyValueStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the console needs at runtime: settings, catalogs, providers and the dispatcher.
#[derive(Debug, Clone)]
pub struct Console {
    config: ConsoleConfig,
    features: &'static FeatureCatalog,
    scenarios: Arc<ScenarioCatalog>,
    licenses: LicenseConfigStore,
    credentials: CredentialStore,
    dispatcher: Dispatcher,
    orchestrator: OrchestratorClient,
}

impl Console {
    /// Opens the settings store under `storage.data_dir` and loads the scenario catalog.
    ///
    /// A missing catalog file yields an empty catalog.
    ///
    /// # Errors
    /// * [`ConsoleError::Store`] if the settings store cannot be opened.
    /// * [`ConsoleError::Scenario`] if the catalog exists but is unreadable or malformed.
    /// * [`ConsoleError::Integration`] if the HTTP client cannot be built.
    pub fn open(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let store = FileStore::builder()
            .root(&config.storage.data_dir)
            .open()
            .context(format!("Opening {}", config.storage.data_dir.display()))?;

        let path = &config.catalog.scenarios;
        let scenarios = if path.exists() {
            ScenarioCatalog::load(path)?
        } else {
            warn!(path = %path.display(), "Scenario catalog not found, starting empty");
            ScenarioCatalog::default()
        };

        Self::with_store(config, Arc::new(store), scenarios)
    }

    /// Composes a console over an existing store and catalog.
    ///
    /// # Errors
    /// Returns [`ConsoleError::Integration`] if the HTTP client cannot be built.
    pub fn with_store(
        config: ConsoleConfig,
        store: Arc<dyn KeyValueStore>,
        scenarios: ScenarioCatalog,
    ) -> Result<Self, ConsoleError> {
        let http = drill_integrations::client(&config.http)?;
        let credentials = CredentialStore::new(store.clone());
        let ctx = ProviderContext::new(http.clone(), credentials.clone(), config.endpoints.clone());

        let dispatcher = Dispatcher::new(
            IntegrationRegistry::standard(&ctx),
            Arc::new(PagerDutyAlerter::new(ctx)),
        );

        info!(scenarios = scenarios.len(), "Console ready");
        Ok(Self {
            features: FeatureCatalog::canonical(),
            scenarios: Arc::new(scenarios),
            licenses: LicenseConfigStore::new(store.clone()),
            orchestrator: OrchestratorClient::new(http, store),
            credentials,
            dispatcher,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    #[must_use]
    pub fn features(&self) -> &'static FeatureCatalog {
        self.features
    }

    #[must_use]
    pub fn scenarios(&self) -> &ScenarioCatalog {
        &self.scenarios
    }

    #[must_use]
    pub fn licenses(&self) -> &LicenseConfigStore {
        &self.licenses
    }

    /// The saved license, read fresh on every call.
    #[must_use]
    pub fn license(&self) -> LicenseConfig {
        self.licenses.load()
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[must_use]
    pub fn orchestrator(&self) -> &OrchestratorClient {
        &self.orchestrator
    }

    /// Scenarios visible under the saved license and `tags`.
    #[must_use]
    pub fn browse(&self, tags: &ScenarioFilter) -> FilteredScenarios<'_> {
        drill_scenarios::filter(self.features, self.scenarios.all(), &self.license(), tags)
    }

    /// Dispatches the scenario with `id`.
    ///
    /// # Errors
    /// Returns [`ConsoleError::Scenario`] for unknown ids. Dispatch itself never fails.
    pub async fn fire(&self, id: &str) -> Result<DispatchOutcome, ConsoleError> {
        let scenario = self.scenarios.require(id)?;
        Ok(self.dispatcher.dispatch(scenario).await)
    }
}
