use std::time::Duration;

use serde_json::{Value, json};

use crate::api::ApiClient;
use crate::cluster_form::FormField;
use crate::fake_appliance::{ADMIN_TOKEN, FakeAppliance};
use crate::model::{ClusterMode, MailSearch, NewRoute, NewUser, Role, UserUpdate};
use crate::session::SessionStore;
use crate::state::{OutputKind, Screen, Tab};
use crate::views::{ScreenModel, TabBody};

use super::*;

const RENDER_READS: [&str; 3] = [
    "GET /api/dashboard",
    "GET /api/config",
    "GET /api/cluster/settings",
];

fn logged_in_app(fake: &FakeAppliance) -> AdminApp {
    let mut session = SessionStore::ephemeral();
    session.set(ADMIN_TOKEN).expect("set token");
    let api = ApiClient::new(Box::new(fake.clone()), session);
    let mut app = AdminApp::new(api, Duration::from_secs(10));
    app.start();
    fake.clear_log();
    app
}

fn output_text(app: &AdminApp) -> String {
    app.state()
        .output
        .as_ref()
        .map(|o| o.text.clone())
        .unwrap_or_default()
}

#[test]
fn render_fetches_users_only_on_users_tab() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);

    for tab in [Tab::Mail, Tab::Config, Tab::Users, Tab::Dashboard, Tab::Users] {
        fake.clear_log();
        app.select_tab(tab);
        let mut expected: Vec<String> = RENDER_READS.iter().map(|s| s.to_string()).collect();
        if tab == Tab::Users {
            expected.push("GET /api/users".to_string());
        }
        assert_eq!(fake.paths(), expected, "tab {}", tab);
    }
}

#[test]
fn pending_requests_coalesce_into_one_render() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    let before = app.render_count();

    app.request_render();
    app.request_render();
    app.request_render();
    app.flush_renders();

    assert_eq!(app.render_count(), before + 1);
    assert_eq!(fake.paths().len(), RENDER_READS.len());
}

#[test]
fn unauthorized_dashboard_returns_to_login_and_clears_token() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    fake.expire_tokens();

    app.refresh();

    assert_eq!(app.state().screen, Screen::Login);
    assert_eq!(app.api().session().get(), None);
    assert_eq!(fake.paths(), vec!["GET /api/dashboard".to_string()]);
    assert!(matches!(app.screen_model(), ScreenModel::Login(_)));
}

#[test]
fn added_domain_is_visible_after_mutation() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    assert!(!app.snapshot().config.domains.iter().any(|d| d.domain == "example.com"));

    app.add_domain("example.com");

    assert!(app.snapshot().config.domains.iter().any(|d| d.domain == "example.com"));
    let paths = fake.paths();
    assert_eq!(paths[0], "POST /api/domains");
    assert_eq!(&paths[1..], &RENDER_READS);
}

#[test]
fn rejected_mutation_shows_detail_and_skips_render() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.add_domain("example.com");
    fake.clear_log();

    app.add_domain("example.com");

    assert_eq!(fake.paths(), vec!["POST /api/domains".to_string()]);
    let out = app.state().output.clone().expect("output");
    assert_eq!(out.kind, OutputKind::Error);
    assert_eq!(out.text, "domain already exists");
}

#[test]
fn route_is_submitted_with_fixed_tls_policy() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.add_route(&NewRoute::new("example.com", "smtp.example.net", 2525));

    let body = fake.last_body("/api/routes").expect("body");
    assert_eq!(body["tls_mode"], "opportunistic");
    assert_eq!(body["tls_verify"], false);
    assert_eq!(app.snapshot().config.routes.len(), 1);
}

#[test]
fn blank_hours_search_defaults_to_24() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.select_tab(Tab::Mail);

    app.search(MailSearch::default());

    let req = fake.last_request("/api/mail/search").expect("search");
    assert!(req.query.contains(&("hours".to_string(), "24".to_string())));
    assert_eq!(app.state().mail_rows.len(), 1);
    match app.screen_model() {
        ScreenModel::Main(main) => match &main.body {
            TabBody::Mail(mail) => assert_eq!(mail.rows.rows.len(), 1),
            other => panic!("unexpected body {:?}", other),
        },
        other => panic!("unexpected screen {:?}", other),
    }
}

#[test]
fn valid_login_stores_token_and_shows_dashboard_numbers() {
    let fake = FakeAppliance::new();
    fake.set_processed_24h(1234);
    let api = ApiClient::new(Box::new(fake.clone()), SessionStore::ephemeral());
    let mut app = AdminApp::new(api, Duration::from_secs(10));
    app.start();
    assert_eq!(app.state().screen, Screen::Login);
    assert!(fake.requests().is_empty());

    app.login("admin", "Admin123");

    assert_eq!(app.api().session().get(), Some(ADMIN_TOKEN));
    assert_eq!(app.state().screen, Screen::Main);
    assert_eq!(app.state().role, Some(Role::Admin));
    let ScreenModel::Main(main) = app.screen_model() else {
        panic!("expected main screen");
    };
    let TabBody::Dashboard(dash) = &main.body else {
        panic!("expected dashboard");
    };
    assert_eq!(dash.stats[0].value, "1234");
}

#[test]
fn invalid_login_shows_detail_and_stores_nothing() {
    let fake = FakeAppliance::new();
    let api = ApiClient::new(Box::new(fake.clone()), SessionStore::ephemeral());
    let mut app = AdminApp::new(api, Duration::from_secs(10));

    app.login("admin", "nope");

    assert_eq!(app.api().session().get(), None);
    assert_eq!(app.state().screen, Screen::Login);
    assert_eq!(app.state().login_error.as_deref(), Some("invalid credentials"));
    assert_eq!(fake.paths(), vec!["POST /api/login".to_string()]);
}

#[test]
fn unreachable_server_sets_banner_until_next_success() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    fake.set_unreachable(true);

    app.refresh();
    assert!(app.state().banner.is_some());
    assert_eq!(app.state().screen, Screen::Main);
    assert_eq!(fake.paths(), vec!["GET /api/dashboard".to_string()]);

    fake.set_unreachable(false);
    app.refresh();
    assert!(app.state().banner.is_none());
}

#[test]
fn malformed_read_falls_back_to_default_and_continues() {
    let fake = FakeAppliance::new();
    fake.serve_garbage("/api/config");
    let mut app = logged_in_app(&fake);
    app.refresh();

    assert_eq!(fake.paths(), RENDER_READS.to_vec());
    assert!(app.snapshot().config.domains.is_empty());
}

#[test]
fn restart_restores_role_and_password_flag_from_session() {
    let fake = FakeAppliance::new();
    let mut session = SessionStore::ephemeral();
    session
        .set_login(ADMIN_TOKEN, Some(Role::ReadOnly), true)
        .expect("set session");
    let api = ApiClient::new(Box::new(fake.clone()), session);
    let app = AdminApp::new(api, Duration::from_secs(10));

    assert_eq!(app.state().screen, Screen::Main);
    assert_eq!(app.state().role, Some(Role::ReadOnly));
    assert!(app.state().password_change_required);
}

#[test]
fn login_records_role_in_session() {
    let fake = FakeAppliance::new();
    let api = ApiClient::new(Box::new(fake.clone()), SessionStore::ephemeral());
    let mut app = AdminApp::new(api, Duration::from_secs(10));
    app.login("admin", "Admin123");

    assert_eq!(app.api().session().role(), Some(Role::Admin));
    assert!(!app.api().session().must_change_password());
}

#[test]
fn odd_rejected_rows_do_not_hide_dashboard_counts() {
    let fake = FakeAppliance::new();
    fake.set_processed_24h(7);
    fake.push_rejected(json!({"created_at": null, "sender": null, "reason": "spam"}));
    fake.push_rejected(json!("not a row"));
    let mut app = logged_in_app(&fake);
    app.refresh();

    let dashboard = &app.snapshot().dashboard;
    assert_eq!(dashboard.processed_24h, 7);
    assert_eq!(dashboard.rejected_last_100.len(), 1);
    assert_eq!(dashboard.rejected_last_100[0].timestamp, "");
    assert_eq!(dashboard.rejected_last_100[0].reason.as_deref(), Some("spam"));
}

#[test]
fn unknown_cluster_mode_is_saved_back_unchanged() {
    let fake = FakeAppliance::new();
    fake.set_cluster_field("cluster_mode", json!("backup"));
    fake.set_cluster_field("peer_ssh_user", Value::Null);
    let mut app = logged_in_app(&fake);
    app.open_settings();

    let form = app.form().expect("form");
    assert_eq!(form.node_ip, "10.0.0.11");
    assert_eq!(form.cluster_mode, ClusterMode::Other("backup".to_string()));

    app.set_form_field(FormField::VrrpPriority, "120").expect("priority");
    app.save_cluster();

    let body = fake.last_body("/api/cluster/settings").expect("save body");
    assert_eq!(body["cluster_mode"], "backup");
    assert_eq!(body["node_id"], "node-a");
    assert_eq!(body["node_ip"], "10.0.0.11");
    assert_eq!(body["peer_node_ip"], "10.0.0.12");
    assert_eq!(body["vip_address"], "10.0.0.50");
    assert_eq!(body["peer_ssh_user"], "root");
    assert_eq!(body["vrrp_priority"], 120);
}

#[test]
fn mistyped_cluster_settings_open_no_form_and_save_sends_nothing() {
    let fake = FakeAppliance::new();
    fake.set_cluster_field("node_ip", json!(["10.0.0.11"]));
    let mut app = logged_in_app(&fake);
    app.open_settings();

    assert!(app.form().is_none());
    let out = app.state().output.clone().expect("output");
    assert_eq!(out.kind, OutputKind::Error);
    assert!(out.text.contains("/api/cluster/settings"));

    fake.clear_log();
    app.set_form_field(FormField::VrrpPriority, "120").expect("no form to edit");
    app.save_cluster();

    assert!(fake.requests().is_empty());
    assert_eq!(
        app.state().output.as_ref().map(|o| o.kind),
        Some(OutputKind::Error)
    );
}

#[test]
fn non_json_cluster_settings_are_not_turned_into_defaults() {
    let fake = FakeAppliance::new();
    fake.serve_garbage("/api/cluster/settings");
    let mut app = logged_in_app(&fake);
    app.open_settings();

    assert!(app.form().is_none());
    assert_eq!(app.state().screen, Screen::Main);
    assert!(app.state().banner.is_none());
}

#[test]
fn invalid_priority_sends_nothing() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.open_settings();
    fake.clear_log();

    app.set_form_field(FormField::VrrpPriority, "ten").expect("text");
    app.save_cluster();

    assert!(fake.requests().is_empty());
    let out = app.state().output.clone().expect("output");
    assert_eq!(out.kind, OutputKind::Error);
    assert!(out.text.contains("vrrp_priority"));
}

#[test]
fn save_rebuilds_form_from_server_state() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.open_settings();
    assert!(!app.form().expect("form").has_tls);

    app.set_form_field(FormField::TlsCrt, "CERT").expect("crt");
    app.set_form_field(FormField::TlsKey, "KEY").expect("key");
    app.set_form_field(FormField::NodeIp, "192.168.1.7").expect("ip");
    assert_eq!(app.suggest_vip().as_deref(), Some("192.168.1.50"));
    app.save_cluster();

    let body = fake.last_body("/api/cluster/settings").expect("save body");
    assert_eq!(body["tls_crt"], "CERT");
    assert_eq!(body["vip_address"], "192.168.1.50");
    assert!(body.get("ssh_private_key").is_none());

    let form = app.form().expect("form rebuilt");
    assert!(form.has_tls);
    assert!(!form.is_dirty());
    assert_eq!(form.vip_address, "192.168.1.50");
}

#[test]
fn rerender_with_settings_open_keeps_local_edits() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.open_settings();
    app.set_form_field(FormField::NodeId, "local-edit").expect("edit");

    app.refresh();

    assert_eq!(app.form().expect("form").node_id, "local-edit");
}

#[test]
fn peer_test_timeout_is_reported_once() {
    let fake = FakeAppliance::new();
    fake.hang_peer_test(true);
    let mut app = logged_in_app(&fake);
    app.open_settings();
    fake.clear_log();

    app.test_peer();

    assert_eq!(fake.paths(), vec!["POST /api/cluster/test-peer".to_string()]);
    assert_eq!(output_text(&app), "peer test timed out after 10s");
}

#[test]
fn duplicate_user_error_is_shown_verbatim() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.select_tab(Tab::Users);

    app.create_user(&NewUser {
        username: "admin".into(),
        password: "whatever".into(),
        role: Role::ReadOnly,
    });

    assert_eq!(output_text(&app), r#"{"detail":"username already exists"}"#);
}

#[test]
fn created_user_appears_and_update_omits_blank_password() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.select_tab(Tab::Users);

    app.create_user(&NewUser {
        username: "ops".into(),
        password: "Secret123".into(),
        role: Role::Operator,
    });
    assert!(app.state().users.iter().any(|u| u.username == "ops"));

    app.update_user(2, &UserUpdate::new(Role::ReadOnly, false, Some(String::new())));
    let body = fake.last_body("/api/users/2").expect("patch body");
    assert!(body.get("password").is_none());
    let ops = app
        .state()
        .users
        .iter()
        .find(|u| u.id == 2)
        .expect("ops listed");
    assert_eq!(ops.role, Role::ReadOnly);
    assert!(!ops.must_change_password);
}

#[test]
fn test_and_apply_show_results_without_refetch() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);

    app.test_config();
    app.apply_config();

    assert_eq!(
        fake.paths(),
        vec![
            "POST /api/config/test".to_string(),
            "POST /api/config/apply".to_string()
        ]
    );
    assert!(output_text(&app).contains("applied"));
}

#[test]
fn logout_clears_token_and_cached_data() {
    let fake = FakeAppliance::new();
    let mut app = logged_in_app(&fake);
    app.select_tab(Tab::Users);

    app.logout();

    assert_eq!(app.api().session().get(), None);
    assert!(app.state().users.is_empty());
    assert_eq!(app.snapshot(), &Snapshot::default());
}
