//! # Scenarios
//!
//! The incident scenario catalog and the filters applied to it before display.
//!
//! ```rust
//! use drill_licensing::{FeatureCatalog, LicenseConfig, PlanKey};
//! use drill_scenarios::{Facet, ScenarioCatalog, ScenarioFilter, filter};
//!
//! let scenarios = ScenarioCatalog::from_json(
//!     r#"{ "scenarios": [
//!         { "id": "a", "name": "Checkout latency", "severity": "critical",
//!           "required_features": ["response_mobilizer"] },
//!         { "id": "b", "name": "Noisy disk", "severity": "warning",
//!           "required_features": ["service_orchestration_rules"] }
//!     ] }"#,
//! )
//! .unwrap();
//!
//! let license = LicenseConfig::with_plan(PlanKey::Business);
//! let tags = ScenarioFilter::new().with(Facet::Severity, ["critical"]);
//! let result = filter(FeatureCatalog::canonical(), scenarios.all(), &license, &tags);
//!
//! assert_eq!(result.summary.total, 2);
//! assert_eq!(result.summary.license_visible, 1);
//! assert_eq!(result.scenarios[0].id, "a");
//! ```

mod catalog;
mod error;
mod filter;

pub use crate::catalog::ScenarioCatalog;
pub use crate::error::{ScenarioError, ScenarioErrorExt};
pub use crate::filter::{
    Facet, FilterSummary, FilteredScenarios, ScenarioFilter, available_options, facets, filter,
    filter_by_license,
};
pub use drill_domain::scenario::{AlertPayload, EventEnvelope, Scenario, ScenarioTags, TraceStep};
