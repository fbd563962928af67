use anyhow::Result;
use drill::Console;
use drill::integrations::DispatchOutcome;

/// Fires the scenario with `id` and prints the outcome.
///
/// # Errors
/// Returns an error for unknown ids or if `json` output cannot be encoded. A failed dispatch is
/// reported, not returned.
pub async fn fire(console: &Console, id: &str, json: bool) -> Result<()> {
    let outcome = console.fire(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &DispatchOutcome) {
    let mark = if outcome.success { "✅" } else { "❌" };
    println!("{mark} {}", outcome.message);

    let rows = [
        ("Flow", outcome.flow.as_deref()),
        ("Integration", outcome.integration.as_deref()),
        ("Dedup key", outcome.dedup_key.as_deref()),
        ("Native", outcome.native_message.as_deref()),
        ("Native error", outcome.native_error.as_deref()),
        ("Fallback reason", outcome.original_reason.as_deref()),
    ];
    for (label, value) in rows {
        if let Some(value) = value {
            println!("  {label:<16} {value}");
        }
    }
}

/// Prints every integration with its readiness.
///
/// # Errors
/// Never fails today; kept fallible like the other handlers.
pub fn list_integrations(console: &Console) -> Result<()> {
    println!("  {:<18} {:<20} {:<11} {:<10} Fallback", "Key", "Name", "Configured", "Full flow");
    for status in console.dispatcher().integration_status() {
        println!(
            "  {:<18} {:<20} {:<11} {:<10} {}",
            status.key,
            status.name,
            yes_no(status.configured),
            yes_no(status.full_flow),
            yes_no(status.fallback_available)
        );
    }
    Ok(())
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
