use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use relay_admin::config::{ClientConfig, Overrides};

use crate::Commands;

#[derive(Parser)]
#[command(name = "relay-admin")]
#[command(about = "Administer a mail relay appliance", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Appliance base URL (overrides RELAY_ADMIN_URL and the config file)
    #[arg(long, value_name = "URL", global = true)]
    url: Option<String>,

    /// Where the session token is kept
    #[arg(long, value_name = "PATH", global = true)]
    session_file: Option<PathBuf>,

    /// Keep the session token in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let overrides = Overrides {
        base_url: cli.url,
        session_file: cli.session_file,
        ephemeral_session: cli.ephemeral,
    };
    let config =
        ClientConfig::load(cli.config.as_deref(), &overrides).context("load configuration")?;

    match cli.command {
        None => relay_admin::tui::run(config)?,
        Some(command) => {
            relay_admin::logging::init_stderr(&config.log_filter);
            let mut api = config.api_client()?;
            tracing::debug!(server = %config.base_url, "cli");
            crate::cli_exec::handle_command(&mut api, &config, command)?
        }
    }

    Ok(())
}
