use anyhow::Result;

use crate::config::ClientConfig;

/// Runs the full-screen client until the operator quits.
pub fn run(config: ClientConfig) -> Result<()> {
    crate::tui_shell::run(config)
}
