//! # Integrations
//!
//! Fires incident scenarios at monitoring tools and, when a tool cannot finish the job alone,
//! straight at PagerDuty.
//!
//! ## Architecture
//!
//! 1.  **Credentials ([`credentials`])**: typed per-provider bundles in the settings store.
//! 2.  **Providers ([`providers`])**: one [`IntegrationProvider`] per tool. A provider either
//!     reports [`ProviderResult::Success`] or asks for a fallback; transport errors are plain
//!     [`IntegrationError`]s.
//! 3.  **Registry ([`IntegrationRegistry`])**: providers by key, with their full-flow flags.
//! 4.  **Dispatch ([`dispatch`])**: the native-then-fallback state machine producing a
//!     [`DispatchOutcome`].
//! 5.  **Orchestrator ([`OrchestratorClient`])**: optional remote controls for running demos.

pub mod credentials;
pub mod dispatch;
mod error;
mod http;
mod orchestrator;
mod provider;
pub mod providers;
mod registry;

pub use crate::credentials::{CREDENTIAL_PROVIDERS, CredentialStore, Credentials};
pub use crate::dispatch::{DispatchOutcome, Dispatcher, IntegrationStatus};
pub use crate::error::{IntegrationError, IntegrationErrorExt};
pub use crate::http::{ProviderContext, client};
pub use crate::orchestrator::{OrchestratorClient, OrchestratorHealth};
pub use crate::provider::{AlertReceipt, DirectAlerter, IntegrationProvider, ProviderResult};
pub use crate::providers::PagerDutyAlerter;
pub use crate::registry::IntegrationRegistry;
