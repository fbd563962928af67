use crate::args::OrchestratorAction;
use anyhow::Result;
use drill::Console;
use serde_json::Value;

/// Runs one orchestrator action and prints the response.
///
/// # Errors
/// Returns an error when no URL is configured, the call fails, or a new URL cannot be saved.
/// `health` never fails.
pub async fn handle(console: &Console, action: OrchestratorAction) -> Result<()> {
    let orchestrator = console.orchestrator();

    let response = match action {
        OrchestratorAction::SetUrl { url } => {
            orchestrator.set_url(&url)?;
            match orchestrator.url() {
                Some(url) => println!("✅ Orchestrator URL set to {url}"),
                None => println!("ℹ️ Empty URL ignored."),
            }
            return Ok(());
        },
        OrchestratorAction::ClearUrl => {
            orchestrator.clear_url()?;
            println!("✅ Orchestrator URL cleared.");
            return Ok(());
        },
        OrchestratorAction::Cleanup => orchestrator.cleanup().await?,
        OrchestratorAction::Pause { incident } => orchestrator.pause(incident.as_deref()).await?,
        OrchestratorAction::Resume { incident } => orchestrator.resume(incident.as_deref()).await?,
        OrchestratorAction::Status { incident } => orchestrator.status(incident.as_deref()).await?,
        OrchestratorAction::Health => serde_json::to_value(orchestrator.health().await)?,
    };

    print_json(&response)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
