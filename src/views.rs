//! View models: plain data built from the view state and the latest server
//! snapshot. Front ends render these and nothing else.

use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::app::Snapshot;
use crate::cluster_form::ClusterSettingsForm;
use crate::state::{OutputKind, Screen, Tab, ViewState};

mod dashboard;
mod login;
mod mail;
mod routing;
mod settings;
mod users;

pub use self::dashboard::{DashboardModel, build_dashboard};
pub use self::login::{LoginModel, build_login};
pub use self::mail::{MailModel, build_mail};
pub use self::routing::{RoutingModel, build_routing};
pub use self::settings::{SettingsModel, SettingsRow, build_settings};
pub use self::users::{UsersModel, build_users};

/// Labelled value shown in a summary strip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabLabel {
    pub tab: Tab,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TabBody {
    Dashboard(DashboardModel),
    Mail(MailModel),
    Routing(RoutingModel),
    Users(UsersModel),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputModel {
    pub title: String,
    pub lines: Vec<String>,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainModel {
    pub server: String,
    pub tabs: Vec<TabLabel>,
    pub body: TabBody,
    /// Present iff the settings overlay is open.
    pub settings: Option<SettingsModel>,
    pub output: Option<OutputModel>,
    pub banner: Option<String>,
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenModel {
    Login(LoginModel),
    Main(Box<MainModel>),
}

pub const PASSWORD_CHANGE_NOTICE: &str =
    "password change required: run 'passwd' before continuing";

/// Composes the whole screen for the current state.
pub fn compose(
    state: &ViewState,
    snapshot: &Snapshot,
    form: Option<&ClusterSettingsForm>,
    server: &str,
) -> ScreenModel {
    if state.screen == Screen::Login {
        return ScreenModel::Login(build_login(state, server));
    }

    let tabs = Tab::ALL
        .into_iter()
        .map(|tab| TabLabel {
            tab,
            title: tab.title(),
            active: tab == state.tab,
        })
        .collect();

    let body = match state.tab {
        Tab::Dashboard => TabBody::Dashboard(build_dashboard(&snapshot.dashboard)),
        Tab::Mail => TabBody::Mail(build_mail(state)),
        Tab::Config => TabBody::Routing(build_routing(&snapshot.config)),
        Tab::Users => TabBody::Users(build_users(state)),
    };

    let settings = match (state.settings_open, form) {
        (true, Some(form)) => Some(build_settings(form)),
        _ => None,
    };

    let output = state.output.as_ref().map(|o| OutputModel {
        title: o.title.clone(),
        lines: o.text.lines().map(str::to_string).collect(),
        is_error: o.kind == OutputKind::Error,
    });

    ScreenModel::Main(Box::new(MainModel {
        server: server.to_string(),
        tabs,
        body,
        settings,
        output,
        banner: state.banner.clone(),
        notice: state
            .password_change_required
            .then(|| PASSWORD_CHANGE_NOTICE.to_string()),
    }))
}

fn ts_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]",
        )
        .ok()
    })
    .as_deref()
}

/// RFC 3339 timestamps shortened for tables; anything else passes through.
pub fn fmt_timestamp(ts: &str) -> String {
    let parsed = OffsetDateTime::parse(ts, &Rfc3339).ok();
    match (parsed, ts_format()) {
        (Some(dt), Some(fmt)) => dt.format(fmt).unwrap_or_else(|_| ts.to_string()),
        _ => ts.to_string(),
    }
}

fn or_dash(v: Option<&str>) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
