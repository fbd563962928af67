use bitflags::bitflags;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A license tier. Variants are declared in rank order, so `Ord` follows capability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanKey {
    Professional,
    Business,
    DigitalOperations,
    EnterpriseIm,
}

impl PlanKey {
    /// The lowest tier; used when nothing demands more.
    pub const LOWEST: Self = Self::Professional;

    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Professional => 0,
            Self::Business => 1,
            Self::DigitalOperations => 2,
            Self::EnterpriseIm => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Business => "Business",
            Self::DigitalOperations => "Dig Ops",
            Self::EnterpriseIm => "EIM",
        }
    }
}

bitflags! {
    /// Enabled add-ons. Each add-on is independent of the plan rank.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct AddonSet: u16 {
        const AIOPS = 1 << 0;
        const AUTOMATION_ACTIONS = 1 << 1;
        const STATUS_PAGES = 1 << 2;
        const RUNBOOK_AUTOMATION = 1 << 3;
        const INCIDENT_WORKFLOWS = 1 << 4;
        const CUSTOMER_SERVICE_OPS = 1 << 5;
        const WORKFLOW_AUTOMATION = 1 << 6;
    }
}

/// Add-on keys paired with their flag, in display order.
pub const ADDON_KEYS: [(&str, AddonSet); 7] = [
    ("aiops", AddonSet::AIOPS),
    ("automation_actions", AddonSet::AUTOMATION_ACTIONS),
    ("status_pages", AddonSet::STATUS_PAGES),
    ("runbook_automation", AddonSet::RUNBOOK_AUTOMATION),
    ("incident_workflows", AddonSet::INCIDENT_WORKFLOWS),
    ("customer_service_ops", AddonSet::CUSTOMER_SERVICE_OPS),
    ("workflow_automation", AddonSet::WORKFLOW_AUTOMATION),
];

impl AddonSet {
    /// Key of a single-flag set; `None` for empty or combined sets.
    #[must_use]
    pub fn key(self) -> Option<&'static str> {
        ADDON_KEYS.iter().find(|(_, flag)| *flag == self).map(|(key, _)| *key)
    }

    /// Keys of every enabled add-on, in display order.
    pub fn keys(self) -> impl Iterator<Item = &'static str> {
        ADDON_KEYS.into_iter().filter(move |(_, flag)| self.contains(*flag)).map(|(key, _)| key)
    }
}

impl Default for AddonSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&str> for AddonSet {
    fn from(s: &str) -> Self {
        ADDON_KEYS.iter().find(|(key, _)| *key == s).map_or_else(Self::empty, |(_, flag)| *flag)
    }
}

/// Serialized as `{ "aiops": true, "status_pages": false, ... }` over every known add-on.
impl Serialize for AddonSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ADDON_KEYS.len()))?;
        for (key, flag) in ADDON_KEYS {
            map.serialize_entry(key, &self.contains(flag))?;
        }
        map.end()
    }
}

/// Accepts a `{ key: bool }` map; unknown keys and `false` entries are ignored.
impl<'de> Deserialize<'de> for AddonSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddonVisitor;

        impl<'de> Visitor<'de> for AddonVisitor {
            type Value = AddonSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of add-on keys to booleans")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = AddonSet::empty();
                while let Some((key, enabled)) = access.next_entry::<String, bool>()? {
                    if enabled {
                        set |= AddonSet::from(key.as_str());
                    }
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(AddonVisitor)
    }
}

/// The simulated license: an optional plan plus enabled add-ons.
///
/// `plan: None` with no add-on is the "unfiltered" state in which everything is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseConfig {
    pub plan: Option<PlanKey>,
    #[serde(default)]
    pub addons: AddonSet,
}

impl LicenseConfig {
    #[must_use]
    pub const fn new(plan: Option<PlanKey>, addons: AddonSet) -> Self {
        Self { plan, addons }
    }

    #[must_use]
    pub const fn with_plan(plan: PlanKey) -> Self {
        Self { plan: Some(plan), addons: AddonSet::empty() }
    }

    #[must_use]
    pub const fn addon(mut self, addon: AddonSet) -> Self {
        self.addons = self.addons.union(addon);
        self
    }

    /// No plan and no add-on: the license filter is off.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.plan.is_none() && self.addons.is_empty()
    }

    #[must_use]
    pub const fn has_addon(&self, addon: AddonSet) -> bool {
        self.addons.intersects(addon)
    }
}
