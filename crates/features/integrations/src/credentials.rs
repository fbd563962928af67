//! # Credentials
//!
//! One typed bundle per provider, stored as a JSON object under `credentials.<provider>`.
//! A bundle counts as configured only when the fields its provider cannot work without are
//! present; optional fields (Datadog app key, Alertmanager basic auth) never decide presence.

use crate::error::{IntegrationError, IntegrationErrorExt};
use drill_domain::constants::{
    CLOUDWATCH, CREDENTIALS_PREFIX, DATADOG, GITHUB_ACTIONS, GRAFANA, NEWRELIC, PAGERDUTY,
    PAGERDUTY_DIRECT, PROMETHEUS, SENTRY, SPLUNK, UPTIMEROBOT,
};
use drill_kernel::secrets::mask_secret;
use drill_store::{JsonStoreExt, KeyValueStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, warn};

/// A provider's credential bundle.
pub trait Credentials: Debug + Default + Serialize + DeserializeOwned {
    /// Provider key the bundle is stored under.
    const PROVIDER: &'static str;

    /// Whether the bundle holds everything the provider needs.
    fn is_configured(&self) -> bool;
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatadogCredentials {
    pub api_key: String,
    pub app_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentryCredentials {
    pub auth_token: String,
    pub org: String,
    pub project: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubCredentials {
    pub token: String,
    pub owner: String,
    pub repo: String,
    /// Workflow file name or id.
    pub workflow: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRelicCredentials {
    pub license_key: String,
    pub user_api_key: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplunkCredentials {
    pub hec_url: String,
    pub hec_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudWatchCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrometheusCredentials {
    pub alertmanager_url: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrafanaCredentials {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeRobotCredentials {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerDutyCredentials {
    pub routing_key: String,
}

impl Default for GitHubCredentials {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner: String::new(),
            repo: String::new(),
            workflow: "demo-alert.yml".to_owned(),
            git_ref: "main".to_owned(),
        }
    }
}

impl Default for CloudWatchCredentials {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: "us-east-1".to_owned(),
        }
    }
}

impl Credentials for DatadogCredentials {
    const PROVIDER: &'static str = DATADOG;

    fn is_configured(&self) -> bool {
        filled(&self.api_key)
    }
}

impl Credentials for SentryCredentials {
    const PROVIDER: &'static str = SENTRY;

    fn is_configured(&self) -> bool {
        filled(&self.auth_token) && filled(&self.org) && filled(&self.project)
    }
}

impl Credentials for GitHubCredentials {
    const PROVIDER: &'static str = GITHUB_ACTIONS;

    fn is_configured(&self) -> bool {
        filled(&self.token) && filled(&self.owner) && filled(&self.repo)
    }
}

impl Credentials for NewRelicCredentials {
    const PROVIDER: &'static str = NEWRELIC;

    fn is_configured(&self) -> bool {
        filled(&self.license_key) && filled(&self.account_id)
    }
}

impl Credentials for SplunkCredentials {
    const PROVIDER: &'static str = SPLUNK;

    fn is_configured(&self) -> bool {
        filled(&self.hec_url) && filled(&self.hec_token)
    }
}

impl Credentials for CloudWatchCredentials {
    const PROVIDER: &'static str = CLOUDWATCH;

    fn is_configured(&self) -> bool {
        filled(&self.access_key_id) && filled(&self.secret_access_key)
    }
}

impl Credentials for PrometheusCredentials {
    const PROVIDER: &'static str = PROMETHEUS;

    fn is_configured(&self) -> bool {
        filled(&self.alertmanager_url)
    }
}

impl Credentials for GrafanaCredentials {
    const PROVIDER: &'static str = GRAFANA;

    fn is_configured(&self) -> bool {
        filled(&self.url) && filled(&self.api_key)
    }
}

impl Credentials for UptimeRobotCredentials {
    const PROVIDER: &'static str = UPTIMEROBOT;

    fn is_configured(&self) -> bool {
        filled(&self.api_key)
    }
}

impl Credentials for PagerDutyCredentials {
    const PROVIDER: &'static str = PAGERDUTY;

    fn is_configured(&self) -> bool {
        filled(&self.routing_key)
    }
}

/// Every provider key that accepts credentials.
pub const CREDENTIAL_PROVIDERS: [&str; 10] = [
    DATADOG,
    SENTRY,
    GITHUB_ACTIONS,
    NEWRELIC,
    SPLUNK,
    CLOUDWATCH,
    PROMETHEUS,
    GRAFANA,
    UPTIMEROBOT,
    PAGERDUTY,
];

/// Secret-bearing field names; everything else is shown in clear.
const SECRET_FIELDS: [&str; 10] = [
    "api_key",
    "app_key",
    "auth_token",
    "token",
    "license_key",
    "user_api_key",
    "hec_token",
    "secret_access_key",
    "password",
    "routing_key",
];

/// Reads and writes provider credentials in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct CredentialStore {
    store: Arc<dyn KeyValueStore>,
}

fn storage_key(provider: &str) -> String {
    format!("{CREDENTIALS_PREFIX}{provider}")
}

/// `pagerduty_direct` shares the PagerDuty bundle.
fn canonical_provider(provider: &str) -> Option<&'static str> {
    let provider = if provider == PAGERDUTY_DIRECT { PAGERDUTY } else { provider };
    CREDENTIAL_PROVIDERS.iter().copied().find(|known| *known == provider)
}

impl CredentialStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored bundle, or its default when nothing usable is stored.
    #[must_use]
    pub fn get<C: Credentials>(&self) -> C {
        match self.store.get_json::<C>(&storage_key(C::PROVIDER)) {
            Ok(Some(bundle)) => bundle,
            Ok(None) => C::default(),
            Err(e) => {
                warn!(provider = C::PROVIDER, error = %e, "Ignoring unreadable credentials");
                C::default()
            },
        }
    }

    /// Replaces the bundle of `C::PROVIDER`.
    ///
    /// # Errors
    /// Returns [`IntegrationError::Store`] if the backend cannot persist it.
    pub fn set<C: Credentials>(&self, bundle: &C) -> Result<(), IntegrationError> {
        self.store
            .set_json(&storage_key(C::PROVIDER), bundle)
            .context(format!("Saving {} credentials", C::PROVIDER))?;
        debug!(provider = C::PROVIDER, "Credentials saved");
        Ok(())
    }

    #[must_use]
    pub fn has<C: Credentials>(&self) -> bool {
        self.get::<C>().is_configured()
    }

    /// Presence check by provider key, using the provider's own rule. Unknown keys are never
    /// configured.
    #[must_use]
    pub fn is_configured(&self, provider: &str) -> bool {
        match canonical_provider(provider) {
            Some(DATADOG) => self.has::<DatadogCredentials>(),
            Some(SENTRY) => self.has::<SentryCredentials>(),
            Some(GITHUB_ACTIONS) => self.has::<GitHubCredentials>(),
            Some(NEWRELIC) => self.has::<NewRelicCredentials>(),
            Some(SPLUNK) => self.has::<SplunkCredentials>(),
            Some(CLOUDWATCH) => self.has::<CloudWatchCredentials>(),
            Some(PROMETHEUS) => self.has::<PrometheusCredentials>(),
            Some(GRAFANA) => self.has::<GrafanaCredentials>(),
            Some(UPTIMEROBOT) => self.has::<UptimeRobotCredentials>(),
            Some(PAGERDUTY) => self.has::<PagerDutyCredentials>(),
            _ => false,
        }
    }

    /// Merges `fields` into the stored bundle of `provider`.
    ///
    /// Empty values leave the stored field untouched. Fields the bundle does not know are
    /// rejected.
    ///
    /// # Errors
    /// * [`IntegrationError::Internal`] for unknown providers or fields.
    /// * [`IntegrationError::Store`] if the backend cannot persist the result.
    pub fn set_fields<K, V>(
        &self,
        provider: &str,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), IntegrationError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let provider = canonical_provider(provider)
            .ok_or_else(|| IntegrationError::from(format!("Unknown provider: {provider}")))?;

        let mut current = self.raw(provider);
        let known = Self::field_names(provider);
        for (field, value) in fields {
            let (field, value) = (field.as_ref(), value.as_ref());
            if !known.iter().any(|k| k == field) {
                return Err(IntegrationError::Internal {
                    message: format!("Unknown field `{field}` for {provider}").into(),
                    context: Some(format!("expected one of {}", known.join(", ")).into()),
                });
            }
            if filled(value) {
                current.insert(field.to_owned(), Value::String(value.trim().to_owned()));
            }
        }

        self.store
            .set_json(&storage_key(provider), &current)
            .context(format!("Saving {provider} credentials"))?;
        debug!(provider, "Credentials updated");
        Ok(())
    }

    /// Removes the bundle of `provider`.
    ///
    /// # Errors
    /// * [`IntegrationError::Internal`] for unknown providers.
    /// * [`IntegrationError::Store`] if the backend cannot persist the removal.
    pub fn clear(&self, provider: &str) -> Result<(), IntegrationError> {
        let provider = canonical_provider(provider)
            .ok_or_else(|| IntegrationError::from(format!("Unknown provider: {provider}")))?;
        self.store
            .remove(&storage_key(provider))
            .context(format!("Clearing {provider} credentials"))
    }

    /// Stored fields of `provider` for display, with secrets masked.
    #[must_use]
    pub fn masked(&self, provider: &str) -> Vec<(String, String)> {
        let Some(provider) = canonical_provider(provider) else {
            return Vec::new();
        };
        self.raw(provider)
            .into_iter()
            .filter_map(|(field, value)| {
                let value = value.as_str()?.to_owned();
                let secret = SECRET_FIELDS.contains(&field.as_str());
                let shown = if secret { mask_secret(&value) } else { value };
                Some((field, shown))
            })
            .collect()
    }

    fn raw(&self, provider: &str) -> Map<String, Value> {
        self.store
            .get_json::<Map<String, Value>>(&storage_key(provider))
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Field names of the bundle stored under `provider`.
    fn field_names(provider: &str) -> Vec<String> {
        fn names<C: Credentials>() -> Vec<String> {
            match serde_json::to_value(C::default()) {
                Ok(Value::Object(map)) => map.keys().cloned().collect(),
                _ => Vec::new(),
            }
        }

        match provider {
            DATADOG => names::<DatadogCredentials>(),
            SENTRY => names::<SentryCredentials>(),
            GITHUB_ACTIONS => names::<GitHubCredentials>(),
            NEWRELIC => names::<NewRelicCredentials>(),
            SPLUNK => names::<SplunkCredentials>(),
            CLOUDWATCH => names::<CloudWatchCredentials>(),
            PROMETHEUS => names::<PrometheusCredentials>(),
            GRAFANA => names::<GrafanaCredentials>(),
            UPTIMEROBOT => names::<UptimeRobotCredentials>(),
            PAGERDUTY => names::<PagerDutyCredentials>(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_store::MemoryStore;

    fn credentials() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn presence_follows_each_provider_rule() {
        let creds = credentials();
        creds.set(&SentryCredentials { auth_token: "tok".into(), org: "acme".into(), ..Default::default() }).unwrap();
        assert!(!creds.is_configured(SENTRY));

        creds.set_fields(SENTRY, [("project", "web")]).unwrap();
        assert!(creds.is_configured(SENTRY));

        creds.set_fields(DATADOG, [("app_key", "only-app")]).unwrap();
        assert!(!creds.is_configured(DATADOG));
    }

    #[test]
    fn pagerduty_direct_shares_the_routing_key() {
        let creds = credentials();
        creds.set(&PagerDutyCredentials { routing_key: "R0UTE".into() }).unwrap();
        assert!(creds.is_configured(PAGERDUTY_DIRECT));

        creds.clear(PAGERDUTY_DIRECT).unwrap();
        assert!(!creds.is_configured(PAGERDUTY));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let creds = credentials();
        creds.set_fields(GITHUB_ACTIONS, [("token", "ghp"), ("owner", "acme"), ("repo", "ops")]).unwrap();
        let github: GitHubCredentials = creds.get();
        assert_eq!(github.workflow, "demo-alert.yml");
        assert_eq!(github.git_ref, "main");
        assert_eq!(creds.get::<CloudWatchCredentials>().region, "us-east-1");
    }

    #[test]
    fn rejects_unknown_providers_and_fields() {
        let creds = credentials();
        assert!(creds.set_fields("pagerduty_legacy", [("x", "y")]).is_err());
        let err = creds.set_fields(GRAFANA, [("password", "y")]).unwrap_err();
        assert!(err.to_string().contains("Unknown field `password` for grafana"));
        assert!(!creds.is_configured("nagios"));
    }

    #[test]
    fn masks_secret_fields_only() {
        let creds = credentials();
        creds.set_fields(GRAFANA, [("url", "https://grafana.acme.io"), ("api_key", "glsa_123456")]).unwrap();
        let shown = creds.masked(GRAFANA);
        assert!(shown.contains(&("url".to_owned(), "https://grafana.acme.io".to_owned())));
        assert!(shown.contains(&("api_key".to_owned(), "glsa•••••••".to_owned())));
    }

    #[test]
    fn masks_alertmanager_password() {
        let creds = credentials();
        creds
            .set_fields(
                PROMETHEUS,
                [
                    ("alertmanager_url", "http://am:9093"),
                    ("username", "ops"),
                    ("password", "hunter2-secret"),
                ],
            )
            .unwrap();

        let shown = creds.masked(PROMETHEUS);
        assert!(shown.contains(&("username".to_owned(), "ops".to_owned())));
        assert!(shown.contains(&("password".to_owned(), "hunt••••••••••".to_owned())));
        assert!(shown.iter().all(|(_, value)| !value.contains("hunter2")));
    }
}
