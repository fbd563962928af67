//! # Licensing
//!
//! Simulated license entitlements for the drill console.
//!
//! A license is a [`LicenseConfig`]: an optional [`PlanKey`] and a set of enabled add-ons.
//! Features live in a static category tree ([`catalog`]); the [`engine`] decides which of
//! them a license unlocks, and [`rollup`] summarizes the answer per category.
//!
//! ## Architecture
//!
//! 1.  **Catalog ([`catalog`])**: the canonical [`FeatureCatalog`], built once per process.
//!     Categories are an explicit `Leaf | Branch` tree that keeps declaration order.
//! 2.  **Engine ([`engine`])**: pure predicates over `(catalog, key, config)`. Plans grant by
//!     rank, add-ons grant independently, unknown keys fail open.
//! 3.  **Rollups ([`rollup`])**: `all | partial | none` status per category and overall.
//! 4.  **Persistence ([`store`])**: [`LicenseConfigStore`] keeps the license in the settings
//!     store; loading never fails.
//!
//! ## Example
//!
//! ```rust
//! use drill_licensing::{AddonSet, FeatureCatalog, LicenseConfig, PlanKey};
//!
//! let catalog = FeatureCatalog::canonical();
//! let config = LicenseConfig::with_plan(PlanKey::Professional).addon(AddonSet::INCIDENT_WORKFLOWS);
//!
//! assert!(catalog.is_feature_available("workflows_full", &config));
//! assert!(!catalog.is_feature_available("response_mobilizer", &config));
//! ```

pub mod catalog;
pub mod engine;
mod error;
pub mod rollup;
pub mod store;

pub use crate::catalog::{
    ADDONS, AddonInfo, Category, CategoryNode, Feature, FeatureCatalog, addon_label, plan_display,
};
pub use crate::engine::LicenseInfo;
pub use crate::error::{LicenseError, LicenseErrorExt};
pub use crate::rollup::{CategoryReport, FlatCategory, Rollup, RollupStatus, Summary};
pub use crate::store::{LicenseConfigStore, parse_addon, parse_plan};
pub use drill_domain::license::{AddonSet, LicenseConfig, PlanKey};
