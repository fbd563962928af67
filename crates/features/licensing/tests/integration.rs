use drill_domain::scenario::Scenario;
use drill_licensing::catalog::{branch, feature, leaf};
use drill_licensing::*;

fn canonical() -> &'static FeatureCatalog {
    FeatureCatalog::canonical()
}

#[test]
fn workflows_full_examples() {
    let catalog = canonical();

    let eim = LicenseConfig::with_plan(PlanKey::EnterpriseIm);
    assert!(catalog.is_feature_available("workflows_full", &eim));
    assert!(catalog.has_feature("workflows_full", &eim));

    let pro_with_addon =
        LicenseConfig::with_plan(PlanKey::Professional).addon(AddonSet::INCIDENT_WORKFLOWS);
    assert!(catalog.is_feature_available("workflows_full", &pro_with_addon));
    assert!(catalog.has_feature("workflows_full", &pro_with_addon));

    let pro = LicenseConfig::with_plan(PlanKey::Professional);
    assert!(!catalog.is_feature_available("workflows_full", &pro));
    assert!(!catalog.has_feature("workflows_full", &pro));
}

#[test]
fn predicates_diverge_only_without_a_plan() {
    let catalog = canonical();
    let addon_only = LicenseConfig::default().addon(AddonSet::AIOPS);

    // Plan-gated feature, add-on filter active, no plan selected.
    assert!(catalog.has_feature("response_mobilizer", &addon_only));
    assert!(!catalog.is_feature_available("response_mobilizer", &addon_only));

    // Add-on grants apply to both.
    assert!(catalog.has_feature("probable_origin", &addon_only));
    assert!(catalog.is_feature_available("probable_origin", &addon_only));

    // With a non-granting plan both fail closed.
    let pro = LicenseConfig::with_plan(PlanKey::Professional);
    assert!(!catalog.has_feature("response_mobilizer", &pro));
    assert!(!catalog.is_feature_available("response_mobilizer", &pro));
}

#[test]
fn unknown_keys_fail_open() {
    let catalog = canonical();
    let pro = LicenseConfig::with_plan(PlanKey::Professional);
    assert!(catalog.is_feature_available("quantum_paging", &pro));
    assert!(catalog.has_feature("quantum_paging", &pro));
    assert_eq!(catalog.feature_requirements("quantum_paging"), None);
}

#[test]
fn requirement_texts() {
    let catalog = canonical();
    assert_eq!(
        catalog.feature_requirements("workflows_full").as_deref(),
        Some("Business+ plan OR Incident Workflows add-on")
    );
    assert_eq!(catalog.feature_requirements("probable_origin").as_deref(), Some("AIOps add-on"));
    assert_eq!(catalog.feature_requirements("basic_routing").as_deref(), Some("Professional+ plan"));
    assert_eq!(
        catalog.feature_requirements("service_graph").as_deref(),
        Some("Business+ plan")
    );

    let custom = FeatureCatalog::from_tree(vec![leaf(
        "Basics",
        vec![feature("free_lunch", "Free Lunch", &[], AddonSet::empty())],
    )]);
    assert_eq!(custom.feature_requirements("free_lunch").as_deref(), Some("All plans"));
}

#[test]
fn features_without_grantors_are_always_granted() {
    let catalog = FeatureCatalog::from_tree(vec![leaf(
        "Core",
        vec![feature("free_thing", "Free", &[], AddonSet::empty())],
    )]);

    for config in [
        LicenseConfig::with_plan(PlanKey::Professional),
        LicenseConfig::with_plan(PlanKey::EnterpriseIm),
        LicenseConfig::default().addon(AddonSet::AIOPS),
    ] {
        assert!(catalog.is_feature_available("free_thing", &config));
        assert!(catalog.has_feature("free_thing", &config));
    }
}

#[test]
fn license_info_takes_most_demanding_plan() {
    let catalog = canonical();
    let required = [
        "workflows_full",
        "probable_origin",
        "incident_tasks",
        "automation_diagnostics",
        "triage_suggestions",
        "not_a_feature",
    ];

    let info = catalog.scenario_license_info(&required);
    assert_eq!(info.minimum_plan, PlanKey::EnterpriseIm);
    assert_eq!(info.required_addons, vec!["aiops", "automation_actions"]);
    assert_eq!(info.required_features.len(), required.len());

    let none: [&str; 0] = [];
    assert_eq!(catalog.minimum_plan_for(&none), PlanKey::Professional);
    assert_eq!(catalog.minimum_plan_for(&["probable_origin"]), PlanKey::Professional);
    assert!(catalog.required_addons_for(&["workflows_full"]).is_empty());
}

#[test]
fn scenario_visibility_is_and_over_required() {
    let catalog = canonical();
    let business = LicenseConfig::with_plan(PlanKey::Business);

    let mut scenario = Scenario::new("PD-100", "Major incident bridge");
    assert!(catalog.scenario_visible(&scenario, &business));

    scenario.required_features = vec!["response_mobilizer".into(), "conference_bridge".into()];
    assert!(catalog.scenario_visible(&scenario, &business));

    scenario.required_features.push("incident_tasks".into());
    assert!(!catalog.scenario_visible(&scenario, &business));
}

#[test]
fn canonical_catalog_shape() {
    let catalog = canonical();
    assert_eq!(catalog.len(), 94);
    assert_eq!(catalog.tree().len(), 8);

    let flat = catalog.flatten();
    assert_eq!(flat.len(), 31);
    assert_eq!(flat.iter().map(|c| c.features.len()).sum::<usize>(), 95);
    assert_eq!(flat[0].path, vec!["Event Management", "Event Routing"]);
    assert_eq!(flat[1].depth, 3);

    // The index keeps the definition met last.
    let grouping = catalog.get("intelligent_alert_grouping").unwrap();
    assert_eq!(grouping.name, "Intelligent Alert Grouping");
}

#[test]
fn rollups_count_per_occurrence() {
    let catalog = canonical();
    let pro = LicenseConfig::with_plan(PlanKey::Professional);

    let by_name = |name: &str| catalog.tree().iter().find(|c| c.name == name).unwrap();

    let events = catalog.rollup(by_name("Event Management"), &pro);
    assert_eq!((events.total, events.available, events.status), (18, 6, RollupStatus::Partial));

    let comms = catalog.rollup(by_name("Stakeholder Communication"), &pro);
    assert_eq!(comms.status, RollupStatus::None);

    let all = LicenseConfig::default();
    let noise = catalog.rollup(by_name("Noise Reduction"), &all);
    assert_eq!((noise.total, noise.status), (10, RollupStatus::All));

    let total: usize = catalog.tree().iter().map(|c| catalog.rollup(c, &pro).total).sum();
    assert_eq!(total, 95);
}

#[test]
fn overall_summary_uses_distinct_keys() {
    let catalog = canonical();

    let pro = catalog.summary(&LicenseConfig::with_plan(PlanKey::Professional));
    assert_eq!((pro.available, pro.total, pro.percentage), (31, 94, 33));
    assert_eq!(pro.status, RollupStatus::Partial);

    let digops = catalog.summary(&LicenseConfig::with_plan(PlanKey::DigitalOperations));
    assert_eq!((digops.available, digops.percentage), (75, 80));

    let everything = LicenseConfig::with_plan(PlanKey::EnterpriseIm)
        .addon(AddonSet::AIOPS)
        .addon(AddonSet::AUTOMATION_ACTIONS)
        .addon(AddonSet::STATUS_PAGES)
        .addon(AddonSet::RUNBOOK_AUTOMATION);
    let full = catalog.summary(&everything);
    assert_eq!((full.available, full.status), (94, RollupStatus::All));
}

#[test]
fn available_features_follow_has_feature() {
    let catalog = canonical();
    let pro = catalog.available_features(&LicenseConfig::with_plan(PlanKey::Professional));
    assert_eq!(pro.len(), 31);
    assert!(pro.contains("basic_routing"));
    assert!(!pro.contains("probable_origin"));

    let addon_only = catalog.available_features(&LicenseConfig::default().addon(AddonSet::AIOPS));
    assert_eq!(addon_only.len(), 94);
}

#[test]
fn report_walks_every_node() {
    let catalog = FeatureCatalog::from_tree(vec![branch(
        "Root",
        vec![
            leaf("Empty", vec![]),
            leaf("Paging", vec![feature("paging", "Paging", &[PlanKey::Business], AddonSet::empty())]),
        ],
    )]);
    let report = catalog.report(&LicenseConfig::with_plan(PlanKey::Business));

    let names: Vec<_> = report.iter().map(|r| (r.name, r.depth)).collect();
    assert_eq!(names, vec![("Root", 1), ("Empty", 2), ("Paging", 2)]);
    assert_eq!(report[0].rollup.status, RollupStatus::All);
    assert_eq!(report[1].rollup.status, RollupStatus::None);
    assert_eq!(report[2].features, vec![("paging", "Paging", true)]);
}

#[test]
fn labels() {
    assert_eq!(plan_display(None), "All Plans (No Filter)");
    assert_eq!(plan_display(Some(PlanKey::EnterpriseIm)), "EIM");
    assert_eq!(addon_label(AddonSet::AUTOMATION_ACTIONS), "Automation Actions");
    assert_eq!(addon_label(AddonSet::CUSTOMER_SERVICE_OPS), "customer_service_ops");
}
