//! Application view state and its transition function.
//!
//! `ViewState` is an immutable value; every user-visible change goes through
//! [`ViewState::apply`], which never performs I/O.

use std::fmt;
use std::str::FromStr;

use crate::model::{MailEvent, MailSearch, Role, UserAccount};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Mail,
    Config,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Mail, Tab::Config, Tab::Users];

    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Mail => "mail",
            Tab::Config => "config",
            Tab::Users => "users",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Mail => "Mail log",
            Tab::Config => "Routing",
            Tab::Users => "Users",
        }
    }

    pub fn next(self) -> Self {
        let i = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(i + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(i + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" | "dash" | "home" => Ok(Tab::Dashboard),
            "mail" | "log" | "search" => Ok(Tab::Mail),
            "config" | "routing" | "routes" => Ok(Tab::Config),
            "users" | "user" => Ok(Tab::Users),
            other => Err(format!(
                "unknown tab '{}' (dashboard|mail|config|users)",
                other
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Login,
    Main,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    Result,
    Error,
}

/// Content of the output area: the last action's result or error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub kind: OutputKind,
    pub title: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    pub screen: Screen,
    pub tab: Tab,
    pub mail_rows: Vec<MailEvent>,
    pub last_search: MailSearch,
    pub users: Vec<UserAccount>,
    pub settings_open: bool,
    pub output: Option<Output>,
    pub login_error: Option<String>,
    /// Set while the appliance cannot be reached.
    pub banner: Option<String>,
    /// Role reported at login, when the server sent one.
    pub role: Option<Role>,
    pub password_change_required: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    LoggedIn {
        role: Option<Role>,
        must_change_password: bool,
    },
    LoginFailed(String),
    LoggedOut,
    SessionExpired,
    SelectTab(Tab),
    OpenSettings,
    CloseSettings,
    SearchCompleted {
        filters: MailSearch,
        rows: Vec<MailEvent>,
    },
    UsersLoaded(Vec<UserAccount>),
    ShowResult {
        title: String,
        text: String,
    },
    ShowError {
        title: String,
        text: String,
    },
    NetworkUnavailable(String),
    Reachable,
    PasswordChanged,
    ClearOutput,
}

pub const SESSION_EXPIRED_MESSAGE: &str = "session expired; please log in again";

impl ViewState {
    /// Starting state: the main screen when a token is already stored.
    pub fn initial(logged_in: bool) -> Self {
        Self {
            screen: if logged_in { Screen::Main } else { Screen::Login },
            ..Self::default()
        }
    }

    /// Main screen for a stored session, with the identity it was saved with.
    pub fn resumed(role: Option<Role>, must_change_password: bool) -> Self {
        Self {
            screen: Screen::Main,
            role,
            password_change_required: must_change_password,
            ..Self::default()
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.screen == Screen::Main
    }

    pub fn apply(self, transition: Transition) -> Self {
        match transition {
            Transition::LoggedIn {
                role,
                must_change_password,
            } => Self {
                screen: Screen::Main,
                tab: Tab::Dashboard,
                role,
                password_change_required: must_change_password,
                ..Self::default()
            },
            Transition::LoginFailed(message) => Self {
                screen: Screen::Login,
                login_error: Some(message),
                ..self
            },
            Transition::LoggedOut => Self::default(),
            Transition::SessionExpired => Self {
                login_error: Some(SESSION_EXPIRED_MESSAGE.to_string()),
                ..Self::default()
            },
            Transition::SelectTab(tab) => Self {
                tab,
                output: None,
                ..self
            },
            Transition::OpenSettings => Self {
                settings_open: true,
                ..self
            },
            Transition::CloseSettings => Self {
                settings_open: false,
                ..self
            },
            Transition::SearchCompleted { filters, rows } => Self {
                last_search: filters,
                mail_rows: rows,
                ..self
            },
            Transition::UsersLoaded(users) => Self { users, ..self },
            Transition::ShowResult { title, text } => Self {
                output: Some(Output {
                    kind: OutputKind::Result,
                    title,
                    text,
                }),
                ..self
            },
            Transition::ShowError { title, text } => Self {
                output: Some(Output {
                    kind: OutputKind::Error,
                    title,
                    text,
                }),
                ..self
            },
            Transition::NetworkUnavailable(message) => Self {
                banner: Some(message),
                ..self
            },
            Transition::Reachable => Self {
                banner: None,
                ..self
            },
            Transition::PasswordChanged => Self {
                password_change_required: false,
                ..self
            },
            Transition::ClearOutput => Self {
                output: None,
                ..self
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
