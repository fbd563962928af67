//! # Dispatch Engine
//!
//! Fires one scenario at its declared integration and falls back to a direct alert when the
//! native path is unknown, unconfigured, failing or not sufficient on its own.
//!
//! Each call walks an explicit state machine:
//!
//! ```text
//! Start -> CredentialCheck -> NativeAttempt -> NativeSuccess ------------------> Done
//!   |            |                  |
//!   +------------+------------------+--> NativeFallback -> (direct alert) -----> Done
//! ```
//!
//! Every provider is called at most once and nothing is retried. Provider errors never escape:
//! they become the fallback reason, and [`Dispatcher::dispatch`] always returns an outcome.

use crate::provider::{DirectAlerter, IntegrationProvider, ProviderResult};
use crate::registry::IntegrationRegistry;
use drill_domain::constants::PAGERDUTY_DIRECT;
use drill_domain::scenario::Scenario;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub const NATIVE_FLOW: &str = "native -> tool -> PagerDuty";

const NO_INTEGRATION: &str = "No integration specified";
const NOT_FULL_FLOW: &str = "Integration does not support full flow";
const NO_FALLBACK_KEY: &str = "PagerDuty routing key not configured for fallback";

/// The uniform result of a dispatch, whichever path fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_key: Option<String>,
    /// Integration declared by the scenario, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,
    /// The native call ended the chain.
    pub native_triggered: bool,
    /// A native call was made, successful or not.
    pub native_attempted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_error: Option<String>,
    pub fallback_used: bool,
    /// Why the native path was not final.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_reason: Option<String>,
    /// Human readable path, e.g. `grafana (fallback) -> PagerDuty Direct`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
}

/// What the native step produced before falling back.
#[derive(Debug, Default)]
struct NativeTrace {
    attempted: bool,
    message: Option<String>,
    error: Option<String>,
}

enum State<'a> {
    Start,
    CredentialCheck(&'a dyn IntegrationProvider),
    NativeAttempt(&'a dyn IntegrationProvider),
    NativeSuccess { message: String, dedup_key: Option<String> },
    NativeFallback { reason: String, native: NativeTrace },
    Done(DispatchOutcome),
}

impl State<'_> {
    fn fallback(reason: impl Into<String>) -> Self {
        Self::NativeFallback { reason: reason.into(), native: NativeTrace::default() }
    }
}

/// Per-provider readiness, as shown in the integrations overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub key: &'static str,
    pub name: &'static str,
    pub configured: bool,
    pub full_flow: bool,
    /// A direct alert could be sent if the native path falls short.
    pub fallback_available: bool,
}

/// Routes scenarios to providers. Cheap to clone; holds no mutable state.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<IntegrationRegistry>,
    alerter: Arc<dyn DirectAlerter>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: IntegrationRegistry, alerter: Arc<dyn DirectAlerter>) -> Self {
        Self { registry: Arc::new(registry), alerter }
    }

    #[must_use]
    pub fn registry(&self) -> &IntegrationRegistry {
        &self.registry
    }

    #[instrument(
        skip(self, scenario),
        fields(scenario = %scenario.id, integration = scenario.integration())
    )]
    pub async fn dispatch(&self, scenario: &Scenario) -> DispatchOutcome {
        let integration = scenario.integration();
        let mut state = State::Start;

        loop {
            state = match state {
                State::Start => match integration {
                    None => State::fallback(NO_INTEGRATION),
                    Some(key) => match self.registry.get(key) {
                        Some(provider) => State::CredentialCheck(provider.as_ref()),
                        None => State::fallback(format!("Unknown integration: {key}")),
                    },
                },

                State::CredentialCheck(provider) => {
                    if provider.has_credentials() {
                        State::NativeAttempt(provider)
                    } else {
                        State::fallback(format!("{} credentials not configured", provider.name()))
                    }
                },

                State::NativeAttempt(provider) => {
                    let result = provider.trigger(scenario).await;
                    debug!(?result, "Native trigger finished");
                    match result {
                        Ok(ProviderResult::Success { message, dedup_key })
                            if provider.full_flow() =>
                        {
                            State::NativeSuccess { message, dedup_key }
                        },
                        Ok(ProviderResult::Success { message, .. }) => State::NativeFallback {
                            reason: NOT_FULL_FLOW.to_owned(),
                            native: NativeTrace {
                                attempted: true,
                                message: Some(message),
                                error: None,
                            },
                        },
                        Ok(ProviderResult::NeedsFallback { reason }) => State::NativeFallback {
                            reason,
                            native: NativeTrace { attempted: true, ..NativeTrace::default() },
                        },
                        Err(e) => State::NativeFallback {
                            reason: e.to_string(),
                            native: NativeTrace {
                                attempted: true,
                                message: None,
                                error: Some(e.to_string()),
                            },
                        },
                    }
                },

                State::NativeSuccess { message, dedup_key } => {
                    info!("Native integration accepted the scenario");
                    State::Done(DispatchOutcome {
                        success: true,
                        native_message: Some(message.clone()),
                        message,
                        dedup_key,
                        integration: integration.map(str::to_owned),
                        native_triggered: true,
                        native_attempted: true,
                        flow: Some(NATIVE_FLOW.to_owned()),
                        ..DispatchOutcome::default()
                    })
                },

                State::NativeFallback { reason, native } => {
                    State::Done(self.fallback(scenario, integration, reason, native).await)
                },

                State::Done(outcome) => return outcome,
            };
        }
    }

    async fn fallback(
        &self,
        scenario: &Scenario,
        integration: Option<&str>,
        reason: String,
        native: NativeTrace,
    ) -> DispatchOutcome {
        let base = DispatchOutcome {
            integration: integration.map(str::to_owned),
            native_attempted: native.attempted,
            native_message: native.message,
            native_error: native.error,
            original_reason: Some(reason),
            ..DispatchOutcome::default()
        };

        if !self.alerter.is_configured() {
            warn!(reason = ?base.original_reason, "No direct alert credential, dispatch failed");
            return DispatchOutcome { message: NO_FALLBACK_KEY.to_owned(), ..base };
        }

        match self.alerter.alert(scenario).await {
            Ok(receipt) => {
                info!(
                    dedup_key = %receipt.dedup_key,
                    reason = ?base.original_reason,
                    "Fallback alert sent"
                );
                DispatchOutcome {
                    success: true,
                    message: receipt.message,
                    dedup_key: Some(receipt.dedup_key),
                    fallback_used: true,
                    flow: Some(format!(
                        "{} (fallback) -> PagerDuty Direct",
                        integration.unwrap_or("unknown")
                    )),
                    ..base
                }
            },
            Err(e) => {
                warn!(error = %e, "Fallback alert failed");
                DispatchOutcome { message: e.to_string(), fallback_used: true, ..base }
            },
        }
    }

    /// Readiness of every registered provider, followed by the direct alert path.
    #[must_use]
    pub fn integration_status(&self) -> Vec<IntegrationStatus> {
        let fallback_available = self.alerter.is_configured();
        self.registry
            .iter()
            .map(|provider| IntegrationStatus {
                key: provider.key(),
                name: provider.name(),
                configured: provider.has_credentials(),
                full_flow: provider.full_flow(),
                fallback_available,
            })
            .chain(std::iter::once(IntegrationStatus {
                key: PAGERDUTY_DIRECT,
                name: "PagerDuty Direct",
                configured: fallback_available,
                full_flow: true,
                fallback_available: false,
            }))
            .collect()
    }

    /// `pagerduty_direct` reports the direct alert credential; unknown keys are unconfigured.
    #[must_use]
    pub fn is_integration_configured(&self, key: &str) -> bool {
        if key == PAGERDUTY_DIRECT {
            return self.alerter.is_configured();
        }
        self.registry.get(key).is_some_and(|provider| provider.has_credentials())
    }
}
