use drill_domain::license::{AddonSet, LicenseConfig, PlanKey};
use serde_json::json;
use std::str::FromStr;
use strum::IntoEnumIterator;

#[test]
fn plan_ranks_follow_declaration_order() {
    let ranks: Vec<u8> = PlanKey::iter().map(PlanKey::rank).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
    assert!(PlanKey::Business < PlanKey::EnterpriseIm);
}

#[test]
fn plan_keys_use_snake_case() {
    assert_eq!(PlanKey::from_str("digital_operations").unwrap(), PlanKey::DigitalOperations);
    assert_eq!(PlanKey::EnterpriseIm.to_string(), "enterprise_im");
    assert_eq!(PlanKey::DigitalOperations.label(), "Dig Ops");
    assert!(PlanKey::from_str("platinum").is_err());
}

#[test]
fn addon_strings_map_to_flags() {
    assert_eq!(AddonSet::from("aiops"), AddonSet::AIOPS);
    assert_eq!(AddonSet::from("incident_workflows"), AddonSet::INCIDENT_WORKFLOWS);
    assert!(AddonSet::from("unknown").is_empty());
    assert_eq!(AddonSet::STATUS_PAGES.key(), Some("status_pages"));

    let both = AddonSet::AIOPS | AddonSet::STATUS_PAGES;
    assert_eq!(both.key(), None);
    assert_eq!(both.keys().collect::<Vec<_>>(), vec!["aiops", "status_pages"]);
}

#[test]
fn addon_keys_collect_into_one_set() {
    let set: AddonSet = ["aiops", "status_pages", "bogus"].into_iter().map(AddonSet::from).collect();
    assert_eq!(set, AddonSet::AIOPS | AddonSet::STATUS_PAGES);
}

#[test]
fn license_config_round_trips_through_addon_map() {
    let config = LicenseConfig::with_plan(PlanKey::Business).addon(AddonSet::AIOPS);
    let value = serde_json::to_value(config).unwrap();
    assert_eq!(value["plan"], "business");
    assert_eq!(value["addons"]["aiops"], true);
    assert_eq!(value["addons"]["status_pages"], false);

    let back: LicenseConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, config);
}

#[test]
fn unknown_addons_and_false_entries_are_ignored() {
    let config: LicenseConfig = serde_json::from_value(json!({
        "plan": null,
        "addons": { "aiops": false, "legacy_thing": true, "status_pages": true }
    }))
    .unwrap();

    assert_eq!(config.plan, None);
    assert_eq!(config.addons, AddonSet::STATUS_PAGES);
    assert!(!config.is_unfiltered());
    assert!(LicenseConfig::default().is_unfiltered());
}
