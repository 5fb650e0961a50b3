use anyhow::Result;

use crate::config::ClientConfig;

mod app;

mod commands;
mod input;
mod modal;
mod suggest;
mod view;
mod views;
mod wizard;

// Shared by the submodules through `super::...`.
use app::{App, CommandDef, Modal, ModalKind, TextInputAction, fmt_ts_ui};
use view::render_view_chrome;

pub(crate) fn run(config: ClientConfig) -> Result<()> {
    app::run(config)
}
