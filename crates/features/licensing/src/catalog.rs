//! Static feature catalog: the category tree and the flat key index.

use drill_domain::license::{AddonSet, PlanKey};
use fxhash::FxHashMap;
use std::sync::LazyLock;

/// Smallest unit of entitlement.
///
/// Granted when the configured plan ranks at least as high as any grantor plan, or when one of
/// `addons` is enabled. A feature with neither is granted unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub key: &'static str,
    pub name: &'static str,
    pub plans: &'static [PlanKey],
    pub addons: AddonSet,
}

impl Feature {
    /// No grantor plan and no add-on.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.plans.is_empty() && self.addons.is_empty()
    }

    /// The lowest-ranked grantor plan.
    #[must_use]
    pub fn minimum_plan(&self) -> Option<PlanKey> {
        self.plans.iter().copied().min_by_key(|plan| plan.rank())
    }
}

/// A node of the category tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNode {
    Leaf(Vec<Feature>),
    Branch(Vec<Category>),
}

/// A named node. Children keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub node: CategoryNode,
}

impl Category {
    /// Every feature occurrence below this node, depth-first.
    pub fn features(&self) -> Box<dyn Iterator<Item = &Feature> + '_> {
        match &self.node {
            CategoryNode::Leaf(features) => Box::new(features.iter()),
            CategoryNode::Branch(children) => Box::new(children.iter().flat_map(Self::features)),
        }
    }
}

/// Display metadata for an add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddonInfo {
    pub flag: AddonSet,
    pub key: &'static str,
    pub label: &'static str,
    pub short_label: &'static str,
    pub description: &'static str,
}

/// Add-ons offered in the license picker.
pub const ADDONS: [AddonInfo; 5] = [
    AddonInfo {
        flag: AddonSet::AIOPS,
        key: "aiops",
        label: "AIOps",
        short_label: "AIOps",
        description: "Event Intelligence, Noise Reduction & Automation",
    },
    AddonInfo {
        flag: AddonSet::AUTOMATION_ACTIONS,
        key: "automation_actions",
        label: "Automation Actions",
        short_label: "AA",
        description: "Automated Diagnostics & Remediation",
    },
    AddonInfo {
        flag: AddonSet::STATUS_PAGES,
        key: "status_pages",
        label: "Status Pages",
        short_label: "Status Pages",
        description: "Internal & External Status Communication",
    },
    AddonInfo {
        flag: AddonSet::RUNBOOK_AUTOMATION,
        key: "runbook_automation",
        label: "Runbook Automation",
        short_label: "RBA",
        description: "Process Automation Integration",
    },
    AddonInfo {
        flag: AddonSet::INCIDENT_WORKFLOWS,
        key: "incident_workflows",
        label: "Incident Workflows",
        short_label: "IW",
        description: "Workflow Builder & Triggers",
    },
];

/// Label of a single add-on, falling back to its key.
#[must_use]
pub fn addon_label(addon: AddonSet) -> &'static str {
    ADDONS
        .iter()
        .find(|info| info.flag == addon)
        .map(|info| info.label)
        .or_else(|| addon.key())
        .unwrap_or("unknown")
}

/// Label of the plan picker entry; `None` is the "no filter" entry.
#[must_use]
pub const fn plan_display(plan: Option<PlanKey>) -> &'static str {
    match plan {
        Some(plan) => plan.label(),
        None => "All Plans (No Filter)",
    }
}

/// The category tree plus a key index over it.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    tree: Vec<Category>,
    index: FxHashMap<&'static str, Feature>,
}

impl FeatureCatalog {
    /// Builds a catalog from a tree.
    ///
    /// When a key appears under several leaves, the index keeps the definition met last in
    /// depth-first order. Leaves keep their own entries.
    #[must_use]
    pub fn from_tree(tree: Vec<Category>) -> Self {
        let mut index = FxHashMap::default();
        for category in &tree {
            for feature in category.features() {
                index.insert(feature.key, *feature);
            }
        }
        Self { tree, index }
    }

    /// The built-in catalog.
    #[must_use]
    pub fn canonical() -> &'static Self {
        static CANONICAL: LazyLock<FeatureCatalog> =
            LazyLock::new(|| FeatureCatalog::from_tree(canonical_tree()));
        &CANONICAL
    }

    #[must_use]
    pub fn tree(&self) -> &[Category] {
        &self.tree
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Feature> {
        self.index.get(key)
    }

    /// Distinct feature keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.index.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

const ANY: &[PlanKey] = &[];
const PRO: &[PlanKey] = &[PlanKey::Professional];
const BIZ: &[PlanKey] = &[PlanKey::Business];
const DIGOPS: &[PlanKey] = &[PlanKey::DigitalOperations];
const EIM: &[PlanKey] = &[PlanKey::EnterpriseIm];
const NO_ADDON: AddonSet = AddonSet::empty();

#[must_use]
pub const fn feature(
    key: &'static str,
    name: &'static str,
    plans: &'static [PlanKey],
    addons: AddonSet,
) -> Feature {
    Feature { key, name, plans, addons }
}

#[must_use]
pub fn leaf(name: &'static str, features: Vec<Feature>) -> Category {
    Category { name, node: CategoryNode::Leaf(features) }
}

#[must_use]
pub fn branch(name: &'static str, children: Vec<Category>) -> Category {
    Category { name, node: CategoryNode::Branch(children) }
}

#[rustfmt::skip]
fn canonical_tree() -> Vec<Category> {
    vec![
        branch("Event Management", vec![
            leaf("Event Routing", vec![
                feature("basic_routing", "Basic Routing", PRO, NO_ADDON),
                feature("service_event_rules", "Service Event Rules", PRO, NO_ADDON),
                feature("event_transforms", "Event Transforms", PRO, NO_ADDON),
            ]),
            branch("Event Orchestration", vec![
                leaf("Service Orchestration", vec![
                    feature("service_orchestration_rules", "Service Orchestration Rules", DIGOPS, AddonSet::AIOPS),
                    feature("nested_rules", "Nested Rules", DIGOPS, AddonSet::AIOPS),
                    feature("rule_variables", "Rule Variables", DIGOPS, AddonSet::AIOPS),
                ]),
                leaf("Global Orchestration", vec![
                    feature("global_event_orchestration", "Global Event Orchestration", ANY, AddonSet::AIOPS),
                    feature("global_routing_rules", "Global Routing Rules", ANY, AddonSet::AIOPS),
                    feature("integration_routing", "Integration-Level Routing", ANY, AddonSet::AIOPS),
                ]),
                leaf("Orchestration Conditions", vec![
                    feature("basic_conditions", "Basic Conditions (If/Else)", PRO, NO_ADDON),
                    feature("threshold_conditions", "Threshold Conditions", DIGOPS, AddonSet::AIOPS),
                    feature("recurring_conditions", "Recurring/Frequency Conditions", DIGOPS, AddonSet::AIOPS),
                    feature("schedule_conditions", "Schedule-Based Conditions", DIGOPS, AddonSet::AIOPS),
                    feature("time_window_conditions", "Time Window Conditions", DIGOPS, AddonSet::AIOPS),
                ]),
                leaf("Event Enrichment", vec![
                    feature("basic_enrichment", "Basic Enrichment (Static)", PRO, NO_ADDON),
                    feature("dynamic_enrichment", "Dynamic Field Enrichment", DIGOPS, AddonSet::AIOPS),
                    feature("severity_mapping", "Severity Mapping", DIGOPS, AddonSet::AIOPS),
                    feature("priority_mapping", "Priority Mapping", PRO, NO_ADDON),
                ]),
            ]),
        ]),
        branch("Noise Reduction", vec![
            leaf("Alert Suppression", vec![
                feature("alert_suppression", "Alert Suppression", DIGOPS, AddonSet::AIOPS),
                feature("transient_alert_suppression", "Transient Alert Suppression", DIGOPS, AddonSet::AIOPS),
                feature("maintenance_windows", "Maintenance Windows", PRO, NO_ADDON),
            ]),
            branch("Alert Grouping", vec![
                leaf("Time-Based Grouping", vec![
                    feature("time_based_grouping", "Time-Based Alert Grouping", DIGOPS, AddonSet::AIOPS),
                ]),
                leaf("Content-Based Grouping", vec![
                    feature("content_based_grouping", "Content-Based Alert Grouping", DIGOPS, AddonSet::AIOPS),
                ]),
                leaf("Intelligent Grouping", vec![
                    feature("intelligent_alert_grouping", "Intelligent Alert Grouping (ML)", DIGOPS, AddonSet::AIOPS),
                    feature("global_alert_grouping", "Global Alert Grouping", ANY, AddonSet::AIOPS),
                    feature("unified_grouping", "Unified Alerting Group", ANY, AddonSet::AIOPS),
                ]),
            ]),
            leaf("Incident Pausing", vec![
                feature("auto_pause_incidents", "Auto-Pause Incidents", DIGOPS, AddonSet::AIOPS),
                feature("paused_notifications", "Paused Incident Notifications", DIGOPS, AddonSet::AIOPS),
            ]),
        ]),
        branch("AIOps & Intelligence", vec![
            leaf("Machine Learning", vec![
                feature("intelligent_alert_grouping", "Intelligent Alert Grouping", DIGOPS, AddonSet::AIOPS),
                feature("probable_origin", "Probable Origin", ANY, AddonSet::AIOPS),
                feature("outlier_detection", "Outlier Incident Detection", DIGOPS, AddonSet::AIOPS),
                feature("triage_suggestions", "Triage Suggestions", ANY, AddonSet::AIOPS),
            ]),
            leaf("Incident Context", vec![
                feature("past_incidents", "Past Incidents", DIGOPS, AddonSet::AIOPS),
                feature("related_incidents", "Related Incidents", DIGOPS, AddonSet::AIOPS),
                feature("similar_incidents", "Similar Incidents", DIGOPS, AddonSet::AIOPS),
            ]),
            leaf("Change Intelligence", vec![
                feature("change_events", "Change Events", PRO, NO_ADDON),
                feature("change_correlation", "Change Correlation", DIGOPS, AddonSet::AIOPS),
                feature("recent_changes", "Recent Changes View", DIGOPS, AddonSet::AIOPS),
            ]),
        ]),
        branch("Incident Response", vec![
            leaf("On-Call Management", vec![
                feature("escalation_policies", "Escalation Policies", PRO, NO_ADDON),
                feature("on_call_schedules", "On-Call Schedules", PRO, NO_ADDON),
                feature("schedule_overrides", "Schedule Overrides", PRO, NO_ADDON),
                feature("on_call_handoffs", "On-Call Handoffs", PRO, NO_ADDON),
            ]),
            leaf("Incident Priority", vec![
                feature("priority_levels", "Priority Levels", PRO, NO_ADDON),
                feature("priority_assignment", "Priority Assignment", PRO, NO_ADDON),
                feature("dynamic_priority", "Dynamic Priority Updates", BIZ, NO_ADDON),
            ]),
            leaf("Response Coordination", vec![
                feature("response_mobilizer", "Response Mobilizer", BIZ, NO_ADDON),
                feature("add_responders", "Add Responders", BIZ, NO_ADDON),
                feature("conference_bridge", "Conference Bridge", BIZ, NO_ADDON),
                feature("response_plays", "Response Plays", BIZ, NO_ADDON),
            ]),
            leaf("Enterprise Incident Management", vec![
                feature("incident_tasks", "Incident Tasks", EIM, NO_ADDON),
                feature("incident_roles", "Incident Roles", PRO, NO_ADDON),
                feature("incident_types", "Custom Incident Types", BIZ, NO_ADDON),
                feature("status_updates", "Status Updates", PRO, NO_ADDON),
                feature("incident_timeline", "Incident Timeline", PRO, NO_ADDON),
            ]),
        ]),
        branch("Automation", vec![
            leaf("Incident Workflows", vec![
                feature("workflows_basic", "Incident Workflows (Limited)", PRO, NO_ADDON),
                feature("workflows_full", "Incident Workflows", BIZ, AddonSet::INCIDENT_WORKFLOWS),
                feature("workflows_advanced", "Advanced Workflows", EIM, AddonSet::INCIDENT_WORKFLOWS),
                feature("workflow_triggers", "Workflow Triggers", BIZ, AddonSet::INCIDENT_WORKFLOWS),
            ]),
            leaf("Automation Actions", vec![
                feature("automation_diagnostics", "Automated Diagnostics", ANY, AddonSet::AUTOMATION_ACTIONS),
                feature("automation_remediation", "Automated Remediation", ANY, AddonSet::AUTOMATION_ACTIONS),
                feature("runbook_automation", "Runbook Automation", ANY, AddonSet::RUNBOOK_AUTOMATION),
                feature("process_automation", "Process Automation", ANY, AddonSet::RUNBOOK_AUTOMATION),
            ]),
            leaf("Event-Triggered Actions", vec![
                feature("webhooks", "Webhooks", PRO, NO_ADDON),
                feature("event_webhooks", "Event-Triggered Webhooks", DIGOPS, AddonSet::AIOPS),
                feature("custom_actions", "Custom Actions", BIZ, NO_ADDON),
            ]),
        ]),
        branch("Stakeholder Communication", vec![
            leaf("Status Pages", vec![
                feature("internal_status_page", "Internal Status Page", ANY, AddonSet::STATUS_PAGES),
                feature("external_status_page", "External Status Page", ANY, AddonSet::STATUS_PAGES),
                feature("status_page_subscribers", "Status Page Subscribers", ANY, AddonSet::STATUS_PAGES),
            ]),
            leaf("Stakeholder Notifications", vec![
                feature("stakeholder_notifications", "Stakeholder Notifications", BIZ, AddonSet::STATUS_PAGES),
                feature("status_update_templates", "Status Update Templates", BIZ, AddonSet::STATUS_PAGES),
                feature("business_subscribers", "Business Subscribers", BIZ, AddonSet::STATUS_PAGES),
            ]),
        ]),
        branch("Integrations", vec![
            branch("Collaboration", vec![
                leaf("Slack", vec![
                    feature("slack_notifications", "Slack Notifications", PRO, NO_ADDON),
                    feature("slack_actions", "Slack Actions", PRO, NO_ADDON),
                    feature("slack_incident_channel", "Slack Incident Channels", BIZ, NO_ADDON),
                    feature("slack_advanced", "Advanced Slack Features", EIM, NO_ADDON),
                ]),
                leaf("Microsoft Teams", vec![
                    feature("teams_notifications", "Teams Notifications", PRO, NO_ADDON),
                    feature("teams_actions", "Teams Actions", PRO, NO_ADDON),
                ]),
            ]),
            branch("ITSM", vec![
                leaf("ServiceNow", vec![
                    feature("servicenow_sync", "ServiceNow Sync", BIZ, NO_ADDON),
                    feature("servicenow_bidirectional", "Bi-directional ServiceNow (ITSM)", EIM, NO_ADDON),
                ]),
                leaf("Jira", vec![
                    feature("jira_integration", "Jira Integration", PRO, NO_ADDON),
                    feature("jira_sync", "Jira Sync", PRO, NO_ADDON),
                ]),
            ]),
            leaf("Monitoring", vec![
                feature("monitoring_integrations", "Monitoring Integrations", PRO, NO_ADDON),
                feature("custom_event_transforms", "Custom Event Transforms", PRO, NO_ADDON),
            ]),
        ]),
        branch("Analytics & Visibility", vec![
            leaf("Incident Analytics", vec![
                feature("basic_analytics", "Basic Analytics", PRO, NO_ADDON),
                feature("advanced_analytics", "Advanced Analytics", BIZ, NO_ADDON),
                feature("operational_reviews", "Operational Reviews", BIZ, NO_ADDON),
            ]),
            leaf("Post-Incident", vec![
                feature("post_incident_reviews", "Post-Incident Reviews", PRO, NO_ADDON),
                feature("postmortems", "Postmortems", PRO, NO_ADDON),
            ]),
            leaf("Service Visibility", vec![
                feature("service_graph", "Service Graph", BIZ, NO_ADDON),
                feature("service_dependencies", "Service Dependencies", BIZ, NO_ADDON),
                feature("business_services", "Business Services", BIZ, NO_ADDON),
                feature("service_standards", "Service Standards", BIZ, NO_ADDON),
                feature("impact_metrics", "Impact Metrics", BIZ, NO_ADDON),
            ]),
            leaf("Custom Fields", vec![
                feature("custom_fields_basic", "Custom Fields (10 max)", PRO, NO_ADDON),
                feature("custom_fields_advanced", "Custom Fields (30 max)", EIM, NO_ADDON),
            ]),
        ]),
    ]
}
