use crate::credentials::CredentialStore;
use crate::error::{IntegrationError, IntegrationErrorExt};
use drill_domain::config::{EndpointsConfig, HttpConfig};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Builds the HTTP client shared by every provider.
///
/// # Errors
/// Returns [`IntegrationError::Http`] if the TLS backend cannot be initialised.
pub fn client(config: &HttpConfig) -> Result<Client, IntegrationError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .context("Building HTTP client")
}

/// Everything a provider needs to reach its service.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    pub http: Client,
    pub credentials: CredentialStore,
    pub endpoints: Arc<EndpointsConfig>,
}

impl ProviderContext {
    #[must_use]
    pub fn new(http: Client, credentials: CredentialStore, endpoints: EndpointsConfig) -> Self {
        Self { http, credentials, endpoints: Arc::new(endpoints) }
    }

    /// `base` without a trailing slash, followed by `path`.
    pub(crate) fn join(base: &str, path: &str) -> String {
        format!("{}{path}", base.trim_end_matches('/'))
    }
}

/// Most specific error text in a JSON error body: `error`, `message`, `text` or `errors[0]`.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message", "text"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .or_else(|| value.get("errors")?.get(0)?.as_str())
        .map(str::to_owned)
}

/// Passes successful responses through and turns the rest into [`IntegrationError::Status`].
///
/// The message is the body's own error text when it has one, else `"<label>: <status>"`.
pub(crate) async fn ensure_success(
    response: Response,
    label: &str,
) -> Result<Response, IntegrationError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_detail(&body).unwrap_or_else(|| format!("{label}: {}", status.as_u16()));
    Err(IntegrationError::status(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_first_known_error_field() {
        assert_eq!(error_detail(r#"{"error":"bad route"}"#).as_deref(), Some("bad route"));
        assert_eq!(error_detail(r#"{"errors":["Forbidden"]}"#).as_deref(), Some("Forbidden"));
        assert_eq!(error_detail(r#"{"text":"Invalid token","code":4}"#).as_deref(), Some("Invalid token"));
        assert_eq!(error_detail("<html>502</html>"), None);
        assert_eq!(error_detail(r#"{"errors":[]}"#), None);
    }

    #[test]
    fn joins_without_double_slashes() {
        assert_eq!(ProviderContext::join("http://am:9093/", "/api/v2/alerts"), "http://am:9093/api/v2/alerts");
        assert_eq!(ProviderContext::join("http://am:9093", "/api/v2/alerts"), "http://am:9093/api/v2/alerts");
    }
}
