use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Reads a secret from the terminal without echo, or one line from stdin when
/// it is not a terminal.
pub(super) fn read_secret(label: &str) -> Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush().ok();

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read password from stdin")?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    enable_raw_mode().context("enable raw mode")?;
    let res = read_masked();
    disable_raw_mode().ok();
    eprintln!();
    res
}

fn read_masked() -> Result<String> {
    let mut out = String::new();
    loop {
        let Event::Key(key) = event::read().context("read key")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(out),
            KeyCode::Backspace => {
                out.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                anyhow::bail!("cancelled");
            }
            KeyCode::Esc => anyhow::bail!("cancelled"),
            KeyCode::Char(c) => out.push(c),
            _ => {}
        }
    }
}

/// `given`, or a prompt when absent. Empty answers are refused.
pub(super) fn secret_or_prompt(given: Option<String>, label: &str) -> Result<String> {
    let value = match given {
        Some(v) => v,
        None => read_secret(label)?,
    };
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", label.to_lowercase());
    }
    Ok(value)
}
