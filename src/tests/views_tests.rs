use crate::cluster_form::FormField;
use crate::model::{
    ClusterMode, ClusterSettings, DomainEntry, MailEvent, RouteEntry, TlsMode, UserAccount,
};
use crate::state::Transition;

use super::*;

fn main_state(tab: Tab) -> ViewState {
    ViewState::initial(true).apply(Transition::SelectTab(tab))
}

fn main_model(model: ScreenModel) -> MainModel {
    match model {
        ScreenModel::Main(m) => *m,
        ScreenModel::Login(l) => panic!("expected main screen, got {:?}", l),
    }
}

#[test]
fn login_screen_carries_error() {
    let state = ViewState::initial(false).apply(Transition::LoginFailed("invalid credentials".into()));
    let ScreenModel::Login(login) = compose(&state, &Snapshot::default(), None, "http://x") else {
        panic!("expected login");
    };
    assert_eq!(login.error.as_deref(), Some("invalid credentials"));
    assert_eq!(login.server, "http://x");
}

#[test]
fn active_tab_is_marked_and_selects_body() {
    let mut snapshot = Snapshot::default();
    snapshot.config.domains.push(DomainEntry {
        domain: "example.com".into(),
    });
    snapshot.config.latest_version = 7;
    snapshot.config.routes.push(RouteEntry {
        sender_domain: "example.com".into(),
        target_host: "smtp.up".into(),
        target_port: 587,
        tls_mode: TlsMode::Opportunistic,
        ..RouteEntry::default()
    });

    let main = main_model(compose(&main_state(Tab::Config), &snapshot, None, "s"));
    let active: Vec<Tab> = main.tabs.iter().filter(|t| t.active).map(|t| t.tab).collect();
    assert_eq!(active, vec![Tab::Config]);

    let TabBody::Routing(routing) = main.body else {
        panic!("expected routing body");
    };
    assert_eq!(routing.version, "v7");
    assert_eq!(routing.domains, vec!["example.com".to_string()]);
    assert_eq!(routing.routes.rows[0][1], "smtp.up:587");
    assert_eq!(routing.routes.rows[0][3], "-");
}

#[test]
fn dashboard_lists_rejections_with_reason() {
    let mut snapshot = Snapshot::default();
    snapshot.dashboard.processed_24h = 12;
    snapshot.dashboard.rejected_last_100.push(MailEvent {
        timestamp: "2026-10-19T08:15:00Z".into(),
        sender: Some("spam@bad.example".into()),
        reason: Some("relay denied".into()),
        ..MailEvent::default()
    });

    let main = main_model(compose(&main_state(Tab::Dashboard), &snapshot, None, "s"));
    let TabBody::Dashboard(dash) = main.body else {
        panic!("expected dashboard body");
    };
    assert_eq!(dash.stats[0].value, "12");
    assert_eq!(dash.stats[4].value, "-");
    assert_eq!(
        dash.rejected.rows[0],
        vec![
            "2026-10-19 08:15".to_string(),
            "spam@bad.example".to_string(),
            "-".to_string(),
            "relay denied".to_string(),
        ]
    );
}

#[test]
fn settings_overlay_only_when_open_and_form_present() {
    let form = ClusterSettingsForm::from_settings(&ClusterSettings {
        has_tls: true,
        ..ClusterSettings::default()
    });
    let closed = main_model(compose(&main_state(Tab::Dashboard), &Snapshot::default(), Some(&form), "s"));
    assert!(closed.settings.is_none());

    let open = main_state(Tab::Dashboard).apply(Transition::OpenSettings);
    let main = main_model(compose(&open, &Snapshot::default(), Some(&form), "s"));
    let settings = main.settings.expect("settings");
    assert_eq!(settings.tls_status, "installed");
    assert_eq!(settings.suggested_vip, "10.0.0.50");

    let row = |f: FormField| settings.rows.iter().find(|r| r.field == f).expect("row");
    assert!(row(FormField::MasterApiUrl).inert);
    assert!(!row(FormField::NodeIp).inert);
    assert_eq!(row(FormField::TlsCrt).value, "stored (unchanged)");
    assert_eq!(row(FormField::SshPrivateKey).value, "not set");
    assert_eq!(row(FormField::VrrpPriority).value, "100");
}

#[test]
fn slave_mode_makes_master_link_live() {
    let mut form = ClusterSettingsForm::from_settings(&ClusterSettings {
        cluster_mode: ClusterMode::Slave,
        ..ClusterSettings::default()
    });
    form.clear_secret(FormField::TlsKey).expect("clear");
    let settings = build_settings(&form);
    let url = settings
        .rows
        .iter()
        .find(|r| r.field == FormField::MasterApiUrl)
        .expect("row");
    assert!(!url.inert);
    let key = settings
        .rows
        .iter()
        .find(|r| r.field == FormField::TlsKey)
        .expect("row");
    assert_eq!(key.value, "will be cleared");
    assert!(settings.dirty);
}

#[test]
fn users_table_and_admin_gate() {
    let state = main_state(Tab::Users)
        .apply(Transition::UsersLoaded(vec![UserAccount {
            id: 3,
            username: "ops".into(),
            role: crate::model::Role::Operator,
            must_change_password: true,
        }]));
    let model = build_users(&state);
    assert_eq!(
        model.users.rows[0],
        vec!["3", "ops", "Operator", "yes"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert!(model.can_manage);

    let operator = ViewState::initial(false).apply(Transition::LoggedIn {
        role: Some(crate::model::Role::Operator),
        must_change_password: true,
    });
    assert!(!build_users(&operator).can_manage);
    let main = main_model(compose(&operator, &Snapshot::default(), None, "s"));
    assert_eq!(main.notice.as_deref(), Some(PASSWORD_CHANGE_NOTICE));
}

#[test]
fn output_is_split_into_lines() {
    let state = main_state(Tab::Dashboard).apply(Transition::ShowError {
        title: "Apply".into(),
        text: "line one\nline two".into(),
    });
    let main = main_model(compose(&state, &Snapshot::default(), None, "s"));
    let out = main.output.expect("output");
    assert!(out.is_error);
    assert_eq!(out.lines, vec!["line one", "line two"]);
}

#[test]
fn non_rfc3339_timestamps_pass_through() {
    assert_eq!(fmt_timestamp("yesterday"), "yesterday");
    assert_eq!(fmt_timestamp("2026-01-02T03:04:05Z"), "2026-01-02 03:04");
}
