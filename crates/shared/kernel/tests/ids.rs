use drill_kernel::ids::{dedup_key, dedup_key_at};

#[test]
fn dedup_key_embeds_scenario_and_time() {
    assert_eq!(dedup_key_at("PD-042", 12), "demo-PD-042-12");

    let key = dedup_key("PD-042");
    let millis = key.strip_prefix("demo-PD-042-").expect("prefix");
    assert!(millis.parse::<i64>().unwrap() > 1_600_000_000_000);
}
