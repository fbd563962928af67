use crate::error::{LicenseError, LicenseErrorExt};
use drill_domain::constants::LICENSE_CONFIG_KEY;
use drill_domain::license::{ADDON_KEYS, AddonSet, LicenseConfig, PlanKey};
use drill_store::{JsonStoreExt, KeyValueStore};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persists the simulated license under the `license_config` key.
#[derive(Debug, Clone)]
pub struct LicenseConfigStore {
    store: Arc<dyn KeyValueStore>,
}

impl LicenseConfigStore {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The saved license, or the unfiltered default when nothing usable is stored.
    #[must_use]
    pub fn load(&self) -> LicenseConfig {
        match self.store.get_json::<LicenseConfig>(LICENSE_CONFIG_KEY) {
            Ok(Some(config)) => config,
            Ok(None) => LicenseConfig::default(),
            Err(e) => {
                warn!(error = %e, "Failed to load license config, using defaults");
                LicenseConfig::default()
            },
        }
    }

    /// Replaces the saved license.
    ///
    /// # Errors
    /// Returns [`LicenseError::Store`] if the backend cannot persist it.
    pub fn save(&self, config: &LicenseConfig) -> Result<(), LicenseError> {
        self.store.set_json(LICENSE_CONFIG_KEY, config).context("Saving license config")?;
        debug!(plan = ?config.plan, addons = ?config.addons, "License config saved");
        Ok(())
    }

    /// Loads, applies `edit` and saves, returning the new configuration.
    ///
    /// # Errors
    /// Returns [`LicenseError::Store`] if the backend cannot persist the result.
    pub fn update(
        &self,
        edit: impl FnOnce(&mut LicenseConfig),
    ) -> Result<LicenseConfig, LicenseError> {
        let mut config = self.load();
        edit(&mut config);
        self.save(&config)?;
        Ok(config)
    }

    /// Drops the saved license, returning to the unfiltered state.
    ///
    /// # Errors
    /// Returns [`LicenseError::Store`] if the backend cannot persist the removal.
    pub fn clear(&self) -> Result<(), LicenseError> {
        self.store.remove(LICENSE_CONFIG_KEY).context("Clearing license config")
    }

    /// The saved license as pretty JSON.
    ///
    /// # Errors
    /// Returns [`LicenseError::Serde`] if encoding fails.
    pub fn export_json(&self) -> Result<String, LicenseError> {
        serde_json::to_string_pretty(&self.load()).context("Exporting license config")
    }

    /// Replaces the saved license with one parsed from JSON.
    ///
    /// # Errors
    /// * [`LicenseError::Serde`] if `raw` is not a license document.
    /// * [`LicenseError::Store`] if the backend cannot persist it.
    pub fn import_json(&self, raw: &str) -> Result<LicenseConfig, LicenseError> {
        let config: LicenseConfig =
            serde_json::from_str(raw).context("Importing license config")?;
        self.save(&config)?;
        Ok(config)
    }
}

/// Parses a plan key such as `digital_operations`.
///
/// # Errors
/// Returns [`LicenseError::Internal`] for unknown keys.
pub fn parse_plan(raw: &str) -> Result<PlanKey, LicenseError> {
    PlanKey::from_str(raw.trim()).map_err(|_| LicenseError::Internal {
        message: format!("Unknown plan: {raw}").into(),
        context: Some(
            "expected professional, business, digital_operations or enterprise_im".into(),
        ),
    })
}

/// Parses an add-on key such as `aiops`.
///
/// # Errors
/// Returns [`LicenseError::Internal`] for unknown keys.
pub fn parse_addon(raw: &str) -> Result<AddonSet, LicenseError> {
    let addon = AddonSet::from(raw.trim());
    if addon.is_empty() {
        let known: Vec<&str> = ADDON_KEYS.iter().map(|(key, _)| *key).collect();
        return Err(LicenseError::Internal {
            message: format!("Unknown add-on: {raw}").into(),
            context: Some(format!("expected one of {}", known.join(", ")).into()),
        });
    }
    Ok(addon)
}
