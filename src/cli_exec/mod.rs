use anyhow::{Context, Result};
use serde_json::Value;

use relay_admin::api::{ApiClient, ApiError};
use relay_admin::config::ClientConfig;

use crate::{
    ClusterCommands, Commands, ConfigCommands, DomainCommands, MailCommands, RouteCommands,
    UserCommands,
};

mod cluster;
mod dispatch;
mod mail;
mod prompt;
mod relay;
mod session;
mod users;

pub(super) fn handle_command(
    api: &mut ApiClient,
    config: &ClientConfig,
    command: Commands,
) -> Result<()> {
    dispatch::handle_command(api, config, command)
}

fn require_session(api: &ApiClient) -> Result<()> {
    if api.session().is_logged_in() {
        Ok(())
    } else {
        anyhow::bail!("not logged in (run `relay-admin login <username>`)")
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize json")?
    );
    Ok(())
}

/// Server responses to mutations are shown as-is.
fn print_response(value: &Value) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::String(s) => {
            println!("{}", s);
            Ok(())
        }
        other => print_json(other),
    }
}

/// Keeps the server's body untouched, for errors operators report verbatim.
fn verbatim(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!(err.verbatim())
}

/// Plain-text rendering of a view table, columns padded to their widest cell.
fn print_table(table: &relay_admin::views::Table, empty_note: &str) {
    if table.is_empty() {
        println!("{}", empty_note);
        return;
    }
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    println!("{}", line(table.headers.to_vec()));
    for row in &table.rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}
