use anyhow::{Context, Result};
use drill::Console;
use drill::licensing::{ADDONS, AddonSet, LicenseConfig, parse_addon, parse_plan, plan_display};
use std::path::Path;

/// Prints the saved license and the overall availability it yields.
///
/// # Errors
/// Never fails today; kept fallible like the other handlers.
pub fn show_license(console: &Console) -> Result<()> {
    let license = console.license();
    if license.is_unfiltered() {
        println!("ℹ️ No license selected: every scenario is shown.");
        return Ok(());
    }

    println!("Plan: {}", plan_display(license.plan));
    for addon in ADDONS {
        let mark = if license.has_addon(addon.flag) { "✅" } else { "  " };
        println!("  {mark} {:<20} {}", addon.label, addon.description);
    }

    let summary = console.features().summary(&license);
    println!();
    println!("{} of {} features ({}%)", summary.available, summary.total, summary.percentage);
    Ok(())
}

/// Replaces the saved license with `plan` and `addons`.
///
/// # Errors
/// Returns an error for unknown plan or add-on keys, or if the license cannot be saved.
pub fn set_license(console: &Console, plan: Option<&str>, addons: &[String]) -> Result<()> {
    let plan = plan.map(parse_plan).transpose()?;
    let addons = addons.iter().map(|raw| parse_addon(raw)).collect::<Result<AddonSet, _>>()?;

    let license = LicenseConfig::new(plan, addons);
    console.licenses().save(&license)?;

    println!("✅ License saved: {}", plan_display(license.plan));
    show_license(console)
}

/// # Errors
/// Returns an error if the removal cannot be persisted.
pub fn clear_license(console: &Console) -> Result<()> {
    console.licenses().clear()?;
    println!("✅ License cleared.");
    Ok(())
}

/// # Errors
/// Returns an error if the license cannot be encoded.
pub fn export_license(console: &Console) -> Result<()> {
    println!("{}", console.licenses().export_json()?);
    Ok(())
}

/// # Errors
/// Returns an error if `file` is unreadable, not a license document, or cannot be saved.
pub fn import_license(console: &Console, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let license = console.licenses().import_json(&raw)?;
    println!("✅ License imported: {}", plan_display(license.plan));
    Ok(())
}
