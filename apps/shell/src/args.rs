//! # CLI Argument Definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "drill")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Browse incident scenarios, simulate licenses and fire demo alerts")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON); `drill.*` in the working directory by default.
    /// Defaults apply when it does not exist.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write JSON logs into this directory.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List scenarios visible under the saved license
    Scenarios(ScenarioArgs),
    /// Show one scenario with its license requirements and orchestration trace
    Show {
        id: String,
    },
    /// Feature catalog with availability under the saved license
    Features {
        /// Print the per-feature lines under every leaf category
        #[arg(long)]
        detail: bool,
    },
    /// Inspect or change the simulated license
    License {
        #[command(subcommand)]
        action: LicenseAction,
    },
    /// Fire a scenario at its integration, falling back to a direct alert
    Fire {
        id: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Integration readiness
    Integrations,
    /// Manage provider credentials
    Creds {
        #[command(subcommand)]
        action: CredsAction,
    },
    /// Control the remote demo orchestrator
    Orchestrator {
        #[command(subcommand)]
        action: OrchestratorAction,
    },
}

#[derive(Debug, Args)]
pub struct ScenarioArgs {
    /// Query string, e.g. `industry=retail,media&severity=critical`
    #[arg(long)]
    pub query: Option<String>,
    #[arg(long)]
    pub industry: Vec<String>,
    #[arg(long)]
    pub team_type: Vec<String>,
    #[arg(long)]
    pub org_style: Vec<String>,
    #[arg(long = "feature")]
    pub features: Vec<String>,
    #[arg(long)]
    pub integration: Vec<String>,
    #[arg(long)]
    pub tool: Vec<String>,
    #[arg(long)]
    pub tool_type: Vec<String>,
    #[arg(long)]
    pub agent_type: Vec<String>,
    #[arg(long)]
    pub severity: Vec<String>,
    /// Also list the facet values still available
    #[arg(long)]
    pub options: bool,
}

#[derive(Debug, Subcommand)]
pub enum LicenseAction {
    /// Print the saved license and the overall availability
    Show,
    /// Replace the saved license
    Set {
        /// professional, business, digital_operations or enterprise_im
        #[arg(long)]
        plan: Option<String>,
        /// Add-on key; repeat for several
        #[arg(long = "addon")]
        addons: Vec<String>,
    },
    /// Return to the unfiltered state
    Clear,
    /// Print the saved license as JSON
    Export,
    /// Replace the saved license with a JSON document
    Import {
        file: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum CredsAction {
    /// Show stored fields with secrets masked
    Show {
        provider: String,
    },
    /// Merge `field=value` pairs into the provider's credentials
    Set {
        provider: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Forget the provider's credentials
    Clear {
        provider: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum OrchestratorAction {
    /// Save the orchestrator base URL
    SetUrl {
        url: String,
    },
    /// Forget the orchestrator base URL
    ClearUrl,
    /// Resolve every open demo incident
    Cleanup,
    Pause {
        #[arg(long)]
        incident: Option<String>,
    },
    Resume {
        #[arg(long)]
        incident: Option<String>,
    },
    Status {
        #[arg(long)]
        incident: Option<String>,
    },
    Health,
}
