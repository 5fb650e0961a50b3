use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::AdminApp;
use crate::config::ClientConfig;

use super::{App, event_loop};

pub(in crate::tui_shell) fn run(config: ClientConfig) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    // The terminal owns stderr while the UI is up.
    if let Err(err) = crate::logging::init_file(&config.log_file, &config.log_filter) {
        eprintln!("warning: logging disabled: {:#}", err);
    }

    let api = config.api_client().context("create API client")?;
    let mut core = AdminApp::new(api, config.peer_test_timeout);
    core.start();
    tracing::info!(server = %config.base_url, "admin console started");

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::new(core);
    let res = event_loop::run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}
