#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod args;
pub mod handlers;

use crate::args::{Cli, Command, CredsAction, LicenseAction};
use crate::handlers::{creds, dispatch, features, license, orchestrator, scenarios};
use anyhow::{Context, Result};
use clap::Parser;
use drill::Console;
use drill::domain::config::ConsoleConfig;
use drill::kernel::config::load_config_or_env;
use drill_logger::{FileSink, Logger, verbosity_level};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).level(verbosity_level(cli.verbose));
    if let Some(dir) = &cli.log_dir {
        logger = logger.file(FileSink::new(dir).json());
    }
    let _logger = logger.init()?;

    let config: ConsoleConfig =
        load_config_or_env(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    let console = Console::open(config).context("Failed to open the console")?;

    match cli.command {
        Command::Scenarios(args) => scenarios::list_scenarios(&console, args)?,
        Command::Show { id } => scenarios::show_scenario(&console, &id)?,
        Command::Features { detail } => features::list_features(&console, detail)?,
        Command::License { action } => match action {
            LicenseAction::Show => license::show_license(&console)?,
            LicenseAction::Set { plan, addons } => {
                license::set_license(&console, plan.as_deref(), &addons)?;
            },
            LicenseAction::Clear => license::clear_license(&console)?,
            LicenseAction::Export => license::export_license(&console)?,
            LicenseAction::Import { file } => license::import_license(&console, &file)?,
        },
        Command::Fire { id, json } => dispatch::fire(&console, &id, json).await?,
        Command::Integrations => dispatch::list_integrations(&console)?,
        Command::Creds { action } => match action {
            CredsAction::Show { provider } => creds::show_credentials(&console, &provider)?,
            CredsAction::Set { provider, fields } => {
                creds::set_credentials(&console, &provider, &fields)?;
            },
            CredsAction::Clear { provider } => creds::clear_credentials(&console, &provider)?,
        },
        Command::Orchestrator { action } => orchestrator::handle(&console, action).await?,
    }

    Ok(())
}
