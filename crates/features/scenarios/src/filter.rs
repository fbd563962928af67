//! # Scenario Filtering
//!
//! Two passes narrow the catalog: the license pass hides scenarios whose required features are
//! not unlocked ([`FeatureCatalog::has_feature`]), then the tag pass applies the facets of a
//! [`ScenarioFilter`].
//!
//! Within a facet any selected value may match; across facets every active facet must match.

use drill_domain::license::LicenseConfig;
use drill_domain::scenario::Scenario;
use drill_licensing::FeatureCatalog;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use tracing::debug;

/// A filterable scenario dimension. The string form is the query-string key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Facet {
    Industry,
    TeamType,
    OrgStyle,
    Features,
    Integration,
    Tool,
    ToolType,
    Severity,
    AgentType,
}

impl Facet {
    /// Does `scenario` carry at least one of `wanted` on this facet?
    fn matches(self, scenario: &Scenario, wanted: &[String]) -> bool {
        let tags = &scenario.tags;
        let any_in = |values: &[String]| wanted.iter().any(|w| values.contains(w));
        let equals = |value: Option<&str>| value.is_some_and(|v| wanted.iter().any(|w| w == v));

        match self {
            Self::Industry => any_in(&tags.industry),
            Self::TeamType => any_in(&tags.team_type),
            Self::OrgStyle => any_in(&tags.org_style),
            Self::Features => any_in(scenario.showcased_features()),
            Self::Integration => equals(tags.integration.as_deref()),
            Self::Tool => wanted.iter().any(|w| scenario.tools().contains(&w.as_str())),
            Self::ToolType => any_in(&tags.tool_type),
            Self::Severity => equals(scenario.severity.as_deref()),
            Self::AgentType => wanted.iter().any(|agent| {
                let tool = format!("pagerduty_agent_{agent}");
                let feature = format!("agent_{agent}");
                tags.tool.contains(&tool) || tags.features.contains(&feature)
            }),
        }
    }
}

/// Selected values per facet. Facets with no values are inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioFilter {
    facets: BTreeMap<Facet, Vec<String>>,
}

impl ScenarioFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection of `facet`.
    #[must_use]
    pub fn with<I, S>(mut self, facet: Facet, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(facet, values);
        self
    }

    pub fn set<I, S>(&mut self, facet: Facet, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selected: Vec<String> = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if !value.is_empty() && !selected.contains(&value) {
                selected.push(value);
            }
        }

        if selected.is_empty() {
            self.facets.remove(&facet);
        } else {
            self.facets.insert(facet, selected);
        }
    }

    /// Adds `value` to the facet, or removes it if already selected.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let mut selected = self.values(facet).to_vec();
        if let Some(position) = selected.iter().position(|v| v == value) {
            selected.remove(position);
        } else {
            selected.push(value.to_owned());
        }
        self.set(facet, selected);
    }

    #[must_use]
    pub fn values(&self, facet: Facet) -> &[String] {
        self.facets.get(&facet).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.facets.is_empty()
    }

    /// Number of selected values across all facets.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.facets.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.facets.clear();
    }

    #[must_use]
    pub fn matches(&self, scenario: &Scenario) -> bool {
        self.facets.iter().all(|(facet, wanted)| facet.matches(scenario, wanted))
    }

    /// Parses `industry=banking,retail&severity=critical`.
    ///
    /// Unknown keys and empty values are skipped. A leading `?` is accepted. Values are
    /// percent-decoded after splitting on `,`, and `+` reads as a space.
    #[must_use]
    pub fn parse_query(query: &str) -> Self {
        let mut filter = Self::new();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let Some((key, values)) = pair.split_once('=') else {
                continue;
            };
            let key = decode_component(key);
            let Ok(facet) = Facet::from_str(&key) else {
                debug!(key = %key, "Ignoring unknown filter key");
                continue;
            };
            filter.set(facet, values.split(',').map(decode_component));
        }
        filter
    }

    /// The inverse of [`Self::parse_query`], in facet order. Values are percent-encoded.
    #[must_use]
    pub fn to_query(&self) -> String {
        self.facets
            .iter()
            .map(|(facet, values)| {
                let values: Vec<Cow<'_, str>> =
                    values.iter().map(|v| urlencoding::encode(v)).collect();
                format!("{facet}={}", values.join(","))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Form-style decoding; malformed escapes are kept as written.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Counts shown next to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    /// After license and tag filters.
    pub shown: usize,
    /// After the license filter only.
    pub license_visible: usize,
    pub total: usize,
}

/// The result of [`filter`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredScenarios<'a> {
    pub scenarios: Vec<&'a Scenario>,
    pub summary: FilterSummary,
}

/// Scenarios whose required features are all unlocked. Unfiltered licenses keep everything.
#[must_use]
pub fn filter_by_license<'a>(
    catalog: &FeatureCatalog,
    scenarios: &'a [Scenario],
    config: &LicenseConfig,
) -> Vec<&'a Scenario> {
    if config.is_unfiltered() {
        return scenarios.iter().collect();
    }
    scenarios.iter().filter(|s| catalog.scenario_visible(s, config)).collect()
}

/// License filter, then tag filter.
#[must_use]
pub fn filter<'a>(
    catalog: &FeatureCatalog,
    scenarios: &'a [Scenario],
    config: &LicenseConfig,
    tags: &ScenarioFilter,
) -> FilteredScenarios<'a> {
    let licensed = filter_by_license(catalog, scenarios, config);
    let license_visible = licensed.len();
    let shown: Vec<&Scenario> = licensed.into_iter().filter(|s| tags.matches(s)).collect();

    let summary = FilterSummary { shown: shown.len(), license_visible, total: scenarios.len() };
    debug!(?summary, query = %tags.to_query(), "Scenarios filtered");
    FilteredScenarios { scenarios: shown, summary }
}

/// Facet values present in the scenarios, used to grey out options that would match nothing.
///
/// Looks at `filtered` while any facet is active and at `all` otherwise. Covers industry,
/// team type, integration, severity and features (required plus demonstrated).
#[must_use]
pub fn available_options(
    all: &[Scenario],
    filtered: &[&Scenario],
    filter: &ScenarioFilter,
) -> BTreeMap<Facet, BTreeSet<String>> {
    let mut options: BTreeMap<Facet, BTreeSet<String>> =
        [Facet::Industry, Facet::TeamType, Facet::Integration, Facet::Severity, Facet::Features]
            .into_iter()
            .map(|facet| (facet, BTreeSet::new()))
            .collect();

    let source: Vec<&Scenario> =
        if filter.is_active() { filtered.to_vec() } else { all.iter().collect() };

    for scenario in source {
        let mut add = |facet: Facet, values: &[String]| {
            if let Some(set) = options.get_mut(&facet) {
                set.extend(values.iter().cloned());
            }
        };
        add(Facet::Industry, &scenario.tags.industry);
        add(Facet::TeamType, &scenario.tags.team_type);
        add(Facet::Features, &scenario.required_features);
        add(Facet::Features, &scenario.features_demonstrated);
        if let Some(integration) = scenario.integration() {
            add(Facet::Integration, &[integration.to_owned()]);
        }
        if let Some(severity) = scenario.severity.as_deref().filter(|s| !s.is_empty()) {
            add(Facet::Severity, &[severity.to_owned()]);
        }
    }
    options
}

/// Every facet in display order.
pub fn facets() -> impl Iterator<Item = Facet> {
    Facet::iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_deactivate_a_facet() {
        let filter = ScenarioFilter::new().with(Facet::Industry, ["", ""]);
        assert!(!filter.is_active());
        assert_eq!(filter.to_query(), "");
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut filter = ScenarioFilter::new();
        filter.toggle(Facet::Severity, "critical");
        filter.toggle(Facet::Severity, "warning");
        assert_eq!(filter.values(Facet::Severity), ["critical", "warning"]);
        assert_eq!(filter.active_count(), 2);

        filter.toggle(Facet::Severity, "critical");
        filter.toggle(Facet::Severity, "warning");
        assert!(!filter.is_active());
    }

    #[test]
    fn query_keys_use_snake_case() {
        let filter = ScenarioFilter::parse_query("?team_type=sre&agent_type=scribe&bogus=1&tool=");
        assert_eq!(filter.values(Facet::TeamType), ["sre"]);
        assert_eq!(filter.values(Facet::AgentType), ["scribe"]);
        assert_eq!(filter.active_count(), 2);
        assert_eq!(filter.to_query(), "team_type=sre&agent_type=scribe");
    }
}
