//! Operator client for the mail-relay appliance: session handling, the API
//! client, the application state machine and its terminal front end.

pub mod api;
pub mod app;
pub mod cluster_form;
pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod state;
pub mod tui;
pub mod views;

mod tui_shell;

#[cfg(test)]
pub(crate) mod fake_appliance;
