use anyhow::Result;
use drill::Console;
use drill::licensing::{RollupStatus, plan_display};

fn status_mark(status: RollupStatus) -> &'static str {
    match status {
        RollupStatus::All => "✅",
        RollupStatus::Partial => "◐",
        RollupStatus::None => "🔒",
    }
}

/// Prints the feature tree with per-category rollups and the overall summary.
///
/// # Errors
/// Never fails today; kept fallible like the other handlers.
pub fn list_features(console: &Console, detail: bool) -> Result<()> {
    let license = console.license();
    let catalog = console.features();

    for category in catalog.report(&license) {
        let indent = "  ".repeat(category.depth - 1);
        println!(
            "{indent}{} {} ({}/{})",
            status_mark(category.rollup.status),
            category.name,
            category.rollup.available,
            category.rollup.total
        );

        if detail {
            for (key, name, available) in &category.features {
                let mark = if *available { "✅" } else { "🔒" };
                let needs = catalog.feature_requirements(key).unwrap_or_default();
                println!("{indent}    {mark} {name:<44} {needs}");
            }
        }
    }

    let summary = catalog.summary(&license);
    println!();
    println!(
        "{}: {} of {} features ({}%)",
        plan_display(license.plan),
        summary.available,
        summary.total,
        summary.percentage
    );
    Ok(())
}
