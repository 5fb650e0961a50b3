use relay_admin::model::{NewUser, UserAccount, UserUpdate};

use super::*;

fn account_json(a: &Account) -> UserAccount {
    UserAccount {
        id: a.id,
        username: a.username.clone(),
        role: a.role,
        must_change_password: a.must_change_password,
    }
}

pub(super) async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Vec<UserAccount>>, Response> {
    require_role(&subject, &[Role::Admin])?;
    let accounts = state.accounts.read().await;
    Ok(Json(accounts.iter().map(account_json).collect()))
}

pub(super) async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(req): Json<NewUser>,
) -> Result<Json<UserAccount>, Response> {
    require_role(&subject, &[Role::Admin])?;
    let username = req.username.trim().to_string();
    if username.is_empty() {
        return Err(bad_request("username must not be empty"));
    }
    if req.password.is_empty() {
        return Err(bad_request("password must not be empty"));
    }

    let mut accounts = state.accounts.write().await;
    if accounts.iter().any(|a| a.username == username) {
        return Err(bad_request("username already exists"));
    }
    let id = accounts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    let account = Account {
        id,
        username,
        password_hash: hash_secret(&req.password),
        role: req.role,
        must_change_password: true,
    };
    tracing::info!(user = %account.username, role = %account.role, by = %subject.username, "user created");
    let out = account_json(&account);
    accounts.push(account);
    Ok(Json(out))
}

pub(super) async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Path(id): Path<i64>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<UserAccount>, Response> {
    require_role(&subject, &[Role::Admin])?;
    let mut accounts = state.accounts.write().await;
    let Some(account) = accounts.iter_mut().find(|a| a.id == id) else {
        return Err(not_found("user not found"));
    };
    account.role = req.role;
    account.must_change_password = req.must_change_password;
    if let Some(password) = req.password.filter(|p| !p.is_empty()) {
        account.password_hash = hash_secret(&password);
    }
    tracing::info!(user = %account.username, role = %account.role, by = %subject.username, "user updated");
    Ok(Json(account_json(account)))
}
