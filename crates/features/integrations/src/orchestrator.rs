use crate::error::{IntegrationError, IntegrationErrorExt};
use crate::http::{ProviderContext, ensure_success};
use drill_domain::constants::ORCHESTRATOR_URL_KEY;
use drill_store::KeyValueStore;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Result of [`OrchestratorClient::health`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestratorHealth {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whatever else the health endpoint reported.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Client for the demo orchestrator that pauses, resumes and cleans up demo incidents.
///
/// The base URL lives in the settings store under `orchestrator_url`.
#[derive(Debug, Clone)]
pub struct OrchestratorClient {
    http: Client,
    store: Arc<dyn KeyValueStore>,
}

impl OrchestratorClient {
    #[must_use]
    pub fn new(http: Client, store: Arc<dyn KeyValueStore>) -> Self {
        Self { http, store }
    }

    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.store.get(ORCHESTRATOR_URL_KEY).filter(|url| !url.trim().is_empty())
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url().is_some()
    }

    /// Saves the base URL. An empty URL is ignored.
    ///
    /// # Errors
    /// Returns [`IntegrationError::Store`] if the backend cannot persist it.
    pub fn set_url(&self, url: &str) -> Result<(), IntegrationError> {
        let url = url.trim();
        if url.is_empty() {
            return Ok(());
        }
        self.store.set(ORCHESTRATOR_URL_KEY, url).context("Saving orchestrator URL")
    }

    /// # Errors
    /// Returns [`IntegrationError::Store`] if the backend cannot persist the removal.
    pub fn clear_url(&self) -> Result<(), IntegrationError> {
        self.store.remove(ORCHESTRATOR_URL_KEY).context("Clearing orchestrator URL")
    }

    /// Resolves every open demo incident.
    ///
    /// # Errors
    /// * [`IntegrationError::MissingCredentials`] when no URL is configured.
    /// * [`IntegrationError::Http`] or [`IntegrationError::Status`] when the call fails.
    pub async fn cleanup(&self) -> Result<Value, IntegrationError> {
        self.call(Method::POST, "/cleanup", None, None).await
    }

    /// Pauses the demo, or one incident of it.
    ///
    /// # Errors
    /// As [`Self::cleanup`].
    pub async fn pause(&self, incident_id: Option<&str>) -> Result<Value, IntegrationError> {
        self.call(Method::POST, "/pause", Some(Self::incident_body(incident_id)), None).await
    }

    /// # Errors
    /// As [`Self::cleanup`].
    pub async fn resume(&self, incident_id: Option<&str>) -> Result<Value, IntegrationError> {
        self.call(Method::POST, "/resume", Some(Self::incident_body(incident_id)), None).await
    }

    /// # Errors
    /// As [`Self::cleanup`].
    pub async fn status(&self, incident_id: Option<&str>) -> Result<Value, IntegrationError> {
        self.call(Method::GET, "/status", None, incident_id).await
    }

    /// Never fails: errors are reported as `healthy: false`.
    pub async fn health(&self) -> OrchestratorHealth {
        match self.call(Method::GET, "/health", None, None).await {
            Ok(body) => {
                let details = match body {
                    Value::Object(details) => details,
                    _ => Map::new(),
                };
                OrchestratorHealth { healthy: true, error: None, details }
            },
            Err(e) => {
                let error = Some(e.to_string());
                OrchestratorHealth { healthy: false, error, details: Map::new() }
            },
        }
    }

    fn incident_body(incident_id: Option<&str>) -> Value {
        incident_id.map_or_else(|| json!({}), |id| json!({ "incident_id": id }))
    }

    #[instrument(skip(self, body))]
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        incident_id: Option<&str>,
    ) -> Result<Value, IntegrationError> {
        let base = self
            .url()
            .ok_or_else(|| IntegrationError::missing("Orchestrator URL not configured"))?;

        let mut request = self.http.request(method, ProviderContext::join(&base, path));
        if let Some(id) = incident_id {
            request = request.query(&[("incident_id", id)]);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.context(format!("Orchestrator {path}"))?;
        let value: Value = ensure_success(response, "Orchestrator error")
            .await?
            .json()
            .await
            .context(format!("Orchestrator {path}"))?;
        debug!(path, "Orchestrator call succeeded");
        Ok(value)
    }
}
