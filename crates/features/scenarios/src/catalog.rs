use crate::error::{ScenarioError, ScenarioErrorExt};
use drill_domain::scenario::Scenario;
use fxhash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Deserialize)]
struct CatalogFile {
    scenarios: Vec<Scenario>,
}

/// The immutable scenario list, indexed by id.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    by_id: FxHashMap<String, usize>,
}

impl ScenarioCatalog {
    /// Builds a catalog, keeping the given order.
    ///
    /// # Errors
    /// Returns [`ScenarioError::DuplicateId`] if two scenarios share an id.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self, ScenarioError> {
        let mut by_id = FxHashMap::default();
        for (position, scenario) in scenarios.iter().enumerate() {
            if by_id.insert(scenario.id.clone(), position).is_some() {
                return Err(ScenarioError::DuplicateId {
                    message: scenario.id.clone().into(),
                    context: Some(format!("scenario #{position}").into()),
                });
            }
        }
        Ok(Self { scenarios, by_id })
    }

    /// Parses `{ "scenarios": [...] }`.
    ///
    /// # Errors
    /// * [`ScenarioError::Serde`] if the document does not match the scenario shape.
    /// * [`ScenarioError::DuplicateId`] if two scenarios share an id.
    pub fn from_json(raw: &str) -> Result<Self, ScenarioError> {
        let file: CatalogFile = serde_json::from_str(raw).context("Parsing scenario catalog")?;
        Self::new(file.scenarios)
    }

    /// Reads and parses a catalog file.
    ///
    /// # Errors
    /// [`ScenarioError::Io`] if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Reading scenario catalog {}", path.display()))?;
        let catalog = Self::from_json(&raw)?;
        info!(path = %path.display(), scenarios = catalog.len(), "Scenario catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn all(&self) -> &[Scenario] {
        &self.scenarios
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.by_id.get(id).map(|&position| &self.scenarios[position])
    }

    /// Like [`Self::get`], for callers that need the scenario to exist.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Internal`] for unknown ids.
    pub fn require(&self, id: &str) -> Result<&Scenario, ScenarioError> {
        self.get(id).ok_or_else(|| ScenarioError::Internal {
            message: format!("Unknown scenario: {id}").into(),
            context: None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
