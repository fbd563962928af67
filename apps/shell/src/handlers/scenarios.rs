use crate::args::ScenarioArgs;
use anyhow::Result;
use drill::Console;
use drill::scenarios::{Facet, Scenario, ScenarioFilter, available_options};

/// Builds the tag filter from `--query` and the per-facet flags. Flags win over the query.
#[must_use]
pub fn build_filter(args: ScenarioArgs) -> ScenarioFilter {
    let mut filter = args.query.as_deref().map(ScenarioFilter::parse_query).unwrap_or_default();

    let flags = [
        (Facet::Industry, args.industry),
        (Facet::TeamType, args.team_type),
        (Facet::OrgStyle, args.org_style),
        (Facet::Features, args.features),
        (Facet::Integration, args.integration),
        (Facet::Tool, args.tool),
        (Facet::ToolType, args.tool_type),
        (Facet::AgentType, args.agent_type),
        (Facet::Severity, args.severity),
    ];
    for (facet, values) in flags {
        if !values.is_empty() {
            filter.set(facet, values);
        }
    }
    filter
}

/// Prints the scenarios visible under the saved license and the given tags.
///
/// # Errors
/// Never fails today; kept fallible like the other handlers.
pub fn list_scenarios(console: &Console, args: ScenarioArgs) -> Result<()> {
    let show_options = args.options;
    let filter = build_filter(args);
    let result = console.browse(&filter);
    let summary = result.summary;

    if filter.is_active() {
        println!("🔎 Filter: {}", filter.to_query());
    }
    println!(
        "Showing {} of {} scenarios ({} in catalog)",
        summary.shown, summary.license_visible, summary.total
    );

    if result.scenarios.is_empty() {
        println!("ℹ️ No scenarios match.");
    }
    for scenario in &result.scenarios {
        println!(
            "  {:<28} {:<9} {:<14} {}",
            scenario.id,
            scenario.severity.as_deref().unwrap_or("-"),
            scenario.integration().unwrap_or("-"),
            scenario.name
        );
    }

    if show_options {
        println!();
        let options = available_options(console.scenarios().all(), &result.scenarios, &filter);
        for (facet, values) in options {
            let values: Vec<&str> = values.iter().map(String::as_str).collect();
            println!("  {facet:<12} {}", values.join(", "));
        }
    }
    Ok(())
}

/// Prints one scenario with what it demands of a license.
///
/// # Errors
/// Returns an error for unknown ids.
pub fn show_scenario(console: &Console, id: &str) -> Result<()> {
    let scenario = console.scenarios().require(id)?;
    let features = console.features();
    let license = console.license();
    let info = features.scenario_license_info(&scenario.required_features);

    println!("{} ({})", scenario.name, scenario.id);
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }
    println!();
    print_field("Severity", scenario.severity.as_deref());
    print_field("Integration", scenario.integration());
    print_field("Target service", scenario.target_service.as_deref());
    print_field("Priority", scenario.expected_priority.as_deref());

    println!("  {:<16} {}+", "Minimum plan", info.minimum_plan.label());
    if !info.required_addons.is_empty() {
        println!("  {:<16} {}", "Add-ons", info.required_addons.join(", "));
    }
    let visible = license.is_unfiltered() || features.scenario_visible(scenario, &license);
    println!("  {:<16} {}", "Licensed", if visible { "yes" } else { "no" });

    print_features(console, scenario);

    if !scenario.trace.is_empty() {
        println!();
        println!("Orchestration trace:");
        for step in &scenario.trace {
            let parts: Vec<&str> = [&step.rule, &step.matched, &step.action, &step.result]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .collect();
            println!("  [{}] {}", step.stage, parts.join(" | "));
        }
    }
    Ok(())
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        println!("  {label:<16} {value}");
    }
}

fn print_features(console: &Console, scenario: &Scenario) {
    let features = console.features();
    let license = console.license();
    let showcased = scenario.showcased_features();
    if showcased.is_empty() {
        return;
    }

    println!();
    println!("Features:");
    for key in showcased {
        let mark = if features.is_feature_available(key, &license) { "✅" } else { "🔒" };
        let name = features.get(key).map_or(key.as_str(), |f| f.name);
        let needs = features.feature_requirements(key).unwrap_or_default();
        println!("  {mark} {name:<40} {needs}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use crate::args::Command;
    use clap::Parser;

    fn scenario_args(argv: &[&str]) -> ScenarioArgs {
        let cli = Cli::parse_from(std::iter::once("drill").chain(argv.iter().copied()));
        match cli.command {
            Command::Scenarios(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_override_the_query() {
        let args = scenario_args(&[
            "scenarios",
            "--query",
            "industry=retail&severity=critical",
            "--industry",
            "media",
            "--industry",
            "finance",
        ]);
        let filter = build_filter(args);

        assert_eq!(filter.values(Facet::Industry), ["media", "finance"]);
        assert_eq!(filter.values(Facet::Severity), ["critical"]);
    }

    #[test]
    fn no_flags_means_no_filter() {
        assert!(!build_filter(scenario_args(&["scenarios"])).is_active());
    }
}
