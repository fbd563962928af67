//! # Entitlement Engine
//!
//! Answers "is this feature unlocked under this license?" for a [`FeatureCatalog`].
//!
//! Two predicates exist and deliberately differ:
//!
//! * [`FeatureCatalog::is_feature_available`] drives per-feature badges and category rollups.
//!   It is strict: once any filter is active, a feature is available only through a granting
//!   plan or an enabled add-on.
//! * [`FeatureCatalog::has_feature`] drives catalog filtering. It additionally stays permissive
//!   while no plan is selected, so enabling an add-on alone never hides plan-gated scenarios.
//!
//! Both share the same shortcuts:
//!
//! 1.  **Unfiltered**: no plan and no add-on means everything is available.
//! 2.  **Fail-open**: unknown feature keys are available under every configuration.
//! 3.  **Rank, not equality**: a plan grants a feature when it ranks at least as high as one of
//!     the feature's grantor plans.
//!
//! Nothing is cached; every call reads the [`LicenseConfig`] it is given.

use crate::catalog::{Feature, FeatureCatalog, addon_label};
use drill_domain::license::{LicenseConfig, PlanKey};
use drill_domain::scenario::Scenario;
use serde::Serialize;
use std::collections::BTreeSet;

/// What a set of required features demands of a license, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseInfo {
    pub minimum_plan: PlanKey,
    /// Add-ons of add-on-only features, in order of first appearance.
    pub required_addons: Vec<&'static str>,
    pub required_features: Vec<String>,
}

fn plan_grants(feature: &Feature, plan: PlanKey) -> bool {
    feature.plans.iter().any(|grantor| grantor.rank() <= plan.rank())
}

impl FeatureCatalog {
    /// Per-feature availability (badges, rollups).
    #[must_use]
    pub fn is_feature_available(&self, key: &str, config: &LicenseConfig) -> bool {
        if config.is_unfiltered() {
            return true;
        }
        let Some(feature) = self.get(key) else {
            return true;
        };
        if feature.is_free() {
            return true;
        }

        if let Some(plan) = config.plan
            && !feature.plans.is_empty()
            && plan_grants(feature, plan)
        {
            return true;
        }

        config.has_addon(feature.addons)
    }

    /// Availability used to filter the scenario catalog.
    #[must_use]
    pub fn has_feature(&self, key: &str, config: &LicenseConfig) -> bool {
        if config.is_unfiltered() {
            return true;
        }
        let Some(feature) = self.get(key) else {
            return true;
        };
        if feature.is_free() {
            return true;
        }

        if let Some(plan) = config.plan
            && plan_grants(feature, plan)
        {
            return true;
        }
        if config.has_addon(feature.addons) {
            return true;
        }

        config.plan.is_none()
    }

    /// `true` when every key satisfies [`Self::has_feature`]. Vacuously true for no keys.
    #[must_use]
    pub fn grants_all<S: AsRef<str>>(&self, required: &[S], config: &LicenseConfig) -> bool {
        required.iter().all(|key| self.has_feature(key.as_ref(), config))
    }

    #[must_use]
    pub fn scenario_visible(&self, scenario: &Scenario, config: &LicenseConfig) -> bool {
        self.grants_all(&scenario.required_features, config)
    }

    /// The most demanding of each feature's lowest grantor plan.
    ///
    /// Features without plan requirements and unknown keys do not count; with nothing left the
    /// result is the lowest tier.
    #[must_use]
    pub fn minimum_plan_for<S: AsRef<str>>(&self, required: &[S]) -> PlanKey {
        required
            .iter()
            .filter_map(|key| self.get(key.as_ref()))
            .filter_map(Feature::minimum_plan)
            .max_by_key(|plan| plan.rank())
            .unwrap_or(PlanKey::LOWEST)
    }

    /// Add-ons needed by add-on-only features.
    ///
    /// Features that a plan can also grant are assumed satisfiable by plan and skipped.
    #[must_use]
    pub fn required_addons_for<S: AsRef<str>>(&self, required: &[S]) -> Vec<&'static str> {
        let mut addons = Vec::new();
        for feature in required.iter().filter_map(|key| self.get(key.as_ref())) {
            if !feature.plans.is_empty() {
                continue;
            }
            for addon in feature.addons.keys() {
                if !addons.contains(&addon) {
                    addons.push(addon);
                }
            }
        }
        addons
    }

    #[must_use]
    pub fn scenario_license_info<S: AsRef<str>>(&self, required: &[S]) -> LicenseInfo {
        LicenseInfo {
            minimum_plan: self.minimum_plan_for(required),
            required_addons: self.required_addons_for(required),
            required_features: required.iter().map(|key| key.as_ref().to_owned()).collect(),
        }
    }

    /// Human readable requirement, e.g. `"Business+ plan OR Incident Workflows add-on"`.
    ///
    /// Returns `None` for unknown keys.
    #[must_use]
    pub fn feature_requirements(&self, key: &str) -> Option<String> {
        let feature = self.get(key)?;
        let mut requirements = Vec::with_capacity(2);

        if let Some(plan) = feature.minimum_plan() {
            requirements.push(format!("{}+ plan", plan.label()));
        }

        if !feature.addons.is_empty() {
            let names: Vec<&str> = feature.addons.iter().map(addon_label).collect();
            requirements.push(format!("{} add-on", names.join(" or ")));
        }

        if requirements.is_empty() {
            return Some("All plans".to_owned());
        }
        Some(requirements.join(" OR "))
    }

    /// Every catalog key satisfying [`Self::has_feature`].
    #[must_use]
    pub fn available_features(&self, config: &LicenseConfig) -> BTreeSet<&'static str> {
        self.keys().into_iter().filter(|key| self.has_feature(key, config)).collect()
    }
}
