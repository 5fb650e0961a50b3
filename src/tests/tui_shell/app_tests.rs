use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::ApiClient;
use crate::fake_appliance::{ADMIN_TOKEN, FakeAppliance};
use crate::session::SessionStore;
use crate::state::Tab;

use super::*;

fn app_with(fake: &FakeAppliance, logged_in: bool) -> App {
    let mut session = SessionStore::ephemeral();
    if logged_in {
        session.set(ADMIN_TOKEN).expect("set token");
    }
    let api = ApiClient::new(Box::new(fake.clone()), session);
    let mut core = AdminApp::new(api, Duration::from_secs(10));
    core.start();
    fake.clear_log();
    App::new(core)
}

fn press(app: &mut App, code: KeyCode) {
    event_loop::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    app.sync_core();
}

fn type_line(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
    press(app, KeyCode::Enter);
}

fn last_error(app: &App) -> Option<String> {
    app.last_result
        .as_ref()
        .filter(|r| r.kind == EntryKind::Error)
        .map(|r| r.lines.join("\n"))
}

fn pending_action(app: &App) -> Option<TextInputAction> {
    match app.modal.as_ref().map(|m| &m.kind) {
        Some(ModalKind::TextInput { action, .. }) => Some(action.clone()),
        _ => None,
    }
}

#[test]
fn login_prompt_walks_username_then_password() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, false);
    assert_eq!(pending_action(&app), Some(TextInputAction::LoginUsername));

    type_line(&mut app, "admin");
    assert_eq!(pending_action(&app), Some(TextInputAction::LoginPassword));
    let masked = matches!(
        app.modal.as_ref().map(|m| &m.kind),
        Some(ModalKind::TextInput { masked: true, .. })
    );
    assert!(masked);

    type_line(&mut app, "Admin123");
    assert_eq!(app.core.state().screen, Screen::Main);
    assert!(app.modal.is_none());
    assert_eq!(fake.paths()[0], "POST /api/login");
}

#[test]
fn failed_login_stays_on_login_and_reports() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, false);
    type_line(&mut app, "admin");
    type_line(&mut app, "wrong");

    assert_eq!(app.core.state().screen, Screen::Login);
    assert_eq!(last_error(&app).as_deref(), Some("login: invalid credentials"));
    assert!(app.core.api().session().get().is_none());
}

#[test]
fn domain_command_reaches_appliance() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    type_line(&mut app, "domain add example.com");

    assert_eq!(fake.paths()[0], "POST /api/domains");
    assert!(app.core.snapshot().config.domains.iter().any(|d| d.domain == "example.com"));
    assert_eq!(app.last_command.as_deref(), Some("relay> domain add example.com"));
}

#[test]
fn bad_route_port_sends_nothing() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    type_line(&mut app, "route add example.com smtp.example.net 70000");

    assert!(fake.requests().is_empty());
    assert!(last_error(&app).is_some_and(|e| e.contains("invalid port")));
}

#[test]
fn unknown_and_prefixed_commands() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    type_line(&mut app, "frobnicate");
    assert!(last_error(&app).is_some_and(|e| e.starts_with("unknown command")));
    assert!(fake.requests().is_empty());

    type_line(&mut app, "tab users");
    assert_eq!(app.core.state().tab, Tab::Users);
    assert!(fake.paths().contains(&"GET /api/users".to_string()));
}

#[test]
fn settings_commands_edit_the_form() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    type_line(&mut app, "settings");
    assert!(app.settings_open());
    assert_eq!(app.prompt(), "settings>");

    type_line(&mut app, "set node_ip 192.168.1.7");
    type_line(&mut app, "vip");
    let form = app.core.form().expect("form");
    assert_eq!(form.vip_address, "192.168.1.50");
    assert!(form.is_dirty());

    press(&mut app, KeyCode::Esc);
    assert!(!app.settings_open());
}

#[test]
fn enter_on_selected_row_opens_editor() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);
    type_line(&mut app, "settings");

    press(&mut app, KeyCode::Down);
    let field = app.selected_field();
    press(&mut app, KeyCode::Enter);
    assert_eq!(pending_action(&app), Some(TextInputAction::EditField(field)));

    press(&mut app, KeyCode::Esc);
    assert!(app.modal.is_none());
}

#[test]
fn user_add_prompts_for_password_then_creates() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    type_line(&mut app, "user add ops operator");
    assert_eq!(pending_action(&app), Some(TextInputAction::UserPassword));

    // Empty passwords are refused in place.
    press(&mut app, KeyCode::Enter);
    assert_eq!(pending_action(&app), Some(TextInputAction::UserPassword));

    type_line(&mut app, "Secret123");
    assert!(app.modal.is_none());
    let body = fake.last_body("/api/users").expect("create body");
    assert_eq!(body["username"], "ops");
    assert_eq!(body["role"], "Operator");
    assert!(app.core.state().users.iter().any(|u| u.username == "ops"));
}

#[test]
fn suggestions_follow_typed_prefix() {
    let fake = FakeAppliance::new();
    let mut app = app_with(&fake, true);

    press(&mut app, KeyCode::Char('s'));
    press(&mut app, KeyCode::Char('e'));
    let names: Vec<&str> = app.suggestions.iter().map(|d| d.name).collect();
    assert_eq!(names.first(), Some(&"search"));
    assert!(names.contains(&"settings"));

    press(&mut app, KeyCode::Esc);
    assert!(app.input.buf.is_empty());
    assert!(app.suggestions.is_empty());
}
