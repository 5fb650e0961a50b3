mod common;

use std::time::Duration;

use anyhow::Result;

use relay_admin::app::AdminApp;
use relay_admin::model::{NewUser, Role, UserUpdate};
use relay_admin::state::{OutputKind, Tab};

#[test]
fn admin_creates_and_updates_accounts_on_users_tab() -> Result<()> {
    let stub = common::spawn_stub()?;
    let mut app = AdminApp::new(common::api_client(&stub.base_url)?, Duration::from_secs(5));
    app.start();
    app.login(common::ADMIN_USER, common::ADMIN_PASSWORD);
    app.select_tab(Tab::Users);
    assert_eq!(app.state().users.len(), 1);

    app.create_user(&NewUser {
        username: "oper".to_string(),
        password: "Oper-pass-1".to_string(),
        role: Role::Operator,
    });
    let oper = app
        .state()
        .users
        .iter()
        .find(|u| u.username == "oper")
        .cloned()
        .expect("new account listed");
    assert_eq!(oper.role, Role::Operator);
    assert!(oper.must_change_password);

    app.update_user(oper.id, &UserUpdate::new(Role::ReadOnly, false, None));
    let updated = app
        .state()
        .users
        .iter()
        .find(|u| u.id == oper.id)
        .cloned()
        .expect("account still listed");
    assert_eq!(updated.role, Role::ReadOnly);
    assert!(!updated.must_change_password);

    // Duplicate usernames come back as the server's raw body.
    app.create_user(&NewUser {
        username: "oper".to_string(),
        password: "x".to_string(),
        role: Role::Operator,
    });
    let out = app.state().output.clone().expect("error shown");
    assert_eq!(out.kind, OutputKind::Error);
    assert_eq!(out.text, r#"{"detail":"username already exists"}"#);
    Ok(())
}

#[test]
fn read_only_account_is_refused_mutations() -> Result<()> {
    let stub = common::spawn_stub()?;
    let mut admin = common::admin_client(&stub)?;
    admin
        .create_user(&NewUser {
            username: "viewer".to_string(),
            password: "Viewer-pass-1".to_string(),
            role: Role::ReadOnly,
        })
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut app = AdminApp::new(common::api_client(&stub.base_url)?, Duration::from_secs(5));
    app.start();
    app.login("viewer", "Viewer-pass-1");
    assert_eq!(app.state().role, Some(Role::ReadOnly));

    app.add_domain("example.com");
    let out = app.state().output.clone().expect("error shown");
    assert_eq!(out.kind, OutputKind::Error);
    assert!(out.text.contains("insufficient role"), "{}", out.text);
    assert!(app.snapshot().config.domains.is_empty());
    Ok(())
}

#[test]
fn cli_user_lifecycle() -> Result<()> {
    let stub = common::spawn_stub()?;
    common::run_cli_ok(&stub, &["login", "admin", "--password", "Admin123"])?;

    common::run_cli_ok(
        &stub,
        &["users", "add", "ops", "--role", "operator", "--password", "Ops-pass-1"],
    )?;
    let listed = common::run_cli_ok(&stub, &["users", "list", "--json"])?;
    let users: serde_json::Value = serde_json::from_str(&listed)?;
    let ops = users
        .as_array()
        .and_then(|a| a.iter().find(|u| u["username"] == "ops"))
        .cloned()
        .expect("ops listed");
    assert_eq!(ops["role"], "Operator");

    let id = ops["id"].to_string();
    common::run_cli_ok(&stub, &["users", "update", &id, "--role", "ReadOnly"])?;
    let table = common::run_cli_ok(&stub, &["users", "list"])?;
    assert!(table.contains("ReadOnly"), "{}", table);

    let bad_role = common::run_cli(&stub, &["users", "add", "x", "--role", "root", "--password", "p"])?;
    assert!(!bad_role.status.success());
    assert!(String::from_utf8_lossy(&bad_role.stderr).contains("unknown role"));
    Ok(())
}
