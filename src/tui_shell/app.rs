use anyhow::Result;

use crate::app::AdminApp;
use crate::cluster_form::FormField;
use crate::config::ClientConfig;
use crate::state::Screen;

use super::commands::{login_command_defs, main_command_defs, settings_command_defs};
use super::input::Input;
use super::suggest::rank_commands;
use super::wizard::{LoginWizard, PasswdWizard, UserWizard};

mod cmd_dispatch;
mod cmd_settings;
mod cmd_text_input;
mod event_loop;
mod log_types;
mod modal_types;
mod parse_utils;
mod render;
mod runtime;
mod time_utils;

pub(super) use self::log_types::CommandDef;
use self::log_types::{EntryKind, LastResult};
pub(super) use self::modal_types::{Modal, ModalKind, TextInputAction};
pub(super) use self::time_utils::fmt_ts_ui;
use self::time_utils::now_ts;

pub(super) fn run(config: ClientConfig) -> Result<()> {
    runtime::run(config)
}

pub(super) struct App {
    core: AdminApp,

    input: Input,
    suggestions: Vec<CommandDef>,
    suggestion_selected: usize,
    modal: Option<Modal>,

    last_command: Option<String>,
    last_result: Option<LastResult>,

    /// When the screen's server data was last fetched.
    updated_at: String,
    seen_renders: u64,
    seen_screen: Screen,

    login_wizard: LoginWizard,
    passwd_wizard: PasswdWizard,
    user_wizard: Option<UserWizard>,

    settings_selected: usize,

    quit: bool,
}

impl App {
    pub(super) fn new(core: AdminApp) -> Self {
        let seen_renders = core.render_count();
        let seen_screen = core.state().screen;
        let mut app = Self {
            core,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            modal: None,
            last_command: None,
            last_result: None,
            updated_at: now_ts(),
            seen_renders,
            seen_screen,
            login_wizard: LoginWizard::default(),
            passwd_wizard: PasswdWizard::default(),
            user_wizard: None,
            settings_selected: 0,
            quit: false,
        };
        if seen_screen == Screen::Login {
            app.start_login(None);
        } else if app.core.state().password_change_required {
            app.start_passwd();
        }
        app
    }

    fn settings_open(&self) -> bool {
        self.core.state().screen == Screen::Main && self.core.state().settings_open
    }

    pub(super) fn available_command_defs(&self) -> Vec<CommandDef> {
        if self.core.state().screen == Screen::Login {
            login_command_defs()
        } else if self.settings_open() {
            settings_command_defs()
        } else {
            main_command_defs()
        }
    }

    pub(super) fn prompt(&self) -> &'static str {
        if self.core.state().screen == Screen::Login {
            "login>"
        } else if self.settings_open() {
            "settings>"
        } else {
            "relay>"
        }
    }

    /// Picks up what the last controller call changed: fresh data, or a
    /// session that ended underneath us.
    pub(super) fn sync_core(&mut self) {
        let renders = self.core.render_count();
        if renders != self.seen_renders {
            self.seen_renders = renders;
            self.updated_at = now_ts();
        }

        let screen = self.core.state().screen;
        if screen != self.seen_screen {
            self.seen_screen = screen;
            self.settings_selected = 0;
            match screen {
                Screen::Login => {
                    self.user_wizard = None;
                    if self.modal.is_none() {
                        self.start_login(None);
                    }
                }
                Screen::Main => {
                    if self.core.state().password_change_required && self.modal.is_none() {
                        self.start_passwd();
                    }
                }
            }
        }
    }

    pub(super) fn recompute_suggestions(&mut self) {
        if self.input.buf.trim().is_empty() {
            self.suggestions.clear();
            self.suggestion_selected = 0;
            return;
        }
        self.suggestions = rank_commands(&self.input.buf, &self.available_command_defs());
        self.suggestion_selected = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
    }

    pub(super) fn apply_selected_suggestion(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        let sel = self
            .suggestion_selected
            .min(self.suggestions.len().saturating_sub(1));
        let cmd = self.suggestions[sel].name;

        let raw = self.input.buf.trim_start_matches('/').trim_start();
        let mut iter = raw.splitn(2, char::is_whitespace);
        let _first = iter.next();
        let rest = iter.next().unwrap_or("").trim_start();
        if rest.is_empty() {
            self.input.set(format!("{} ", cmd));
        } else {
            self.input.set(format!("{} {}", cmd, rest));
        }
        self.recompute_suggestions();
    }

    pub(super) fn push_output(&mut self, lines: Vec<String>) {
        self.last_result = Some(LastResult {
            ts: now_ts(),
            kind: EntryKind::Output,
            lines,
        });
    }

    pub(super) fn push_error(&mut self, msg: String) {
        self.last_result = Some(LastResult {
            ts: now_ts(),
            kind: EntryKind::Error,
            lines: vec![msg],
        });
    }

    pub(super) fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }

    pub(super) fn modal_mut(&mut self) -> Option<&mut Modal> {
        self.modal.as_mut()
    }

    pub(super) fn close_modal(&mut self) {
        self.modal = None;
    }

    pub(super) fn cancel_wizards(&mut self) {
        self.login_wizard = LoginWizard::default();
        self.passwd_wizard = PasswdWizard::default();
        self.user_wizard = None;
    }

    fn selected_field(&self) -> FormField {
        FormField::ALL[self.settings_selected.min(FormField::ALL.len() - 1)]
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let n = FormField::ALL.len() as isize;
        let cur = self.settings_selected as isize;
        self.settings_selected = (cur + delta).rem_euclid(n) as usize;
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
