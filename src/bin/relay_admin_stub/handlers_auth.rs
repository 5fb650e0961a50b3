use relay_admin::model::{LoginRequest, LoginResponse, PasswordChange};

use super::*;

pub(super) async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    let found = {
        let accounts = state.accounts.read().await;
        accounts
            .iter()
            .find(|a| a.username == req.username && a.password_hash == hash_secret(&req.password))
            .cloned()
    };
    let Some(account) = found else {
        tracing::info!(user = %req.username, "login rejected");
        return Err(detail(StatusCode::UNAUTHORIZED, "invalid credentials"));
    };

    let token = random_token().map_err(|err| {
        detail(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
    })?;
    state
        .tokens
        .write()
        .await
        .insert(hash_secret(&token), account.id);
    tracing::info!(user = %account.username, role = %account.role, "login");

    Ok(Json(LoginResponse {
        token,
        role: Some(account.role),
        must_change_password: account.must_change_password,
    }))
}

pub(super) async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(req): Json<PasswordChange>,
) -> Result<Json<Value>, Response> {
    let mut accounts = state.accounts.write().await;
    let Some(account) = accounts.iter_mut().find(|a| a.id == subject.account_id) else {
        return Err(unauthorized());
    };
    if account.password_hash != hash_secret(&req.old_password) {
        return Err(bad_request("invalid old password"));
    }
    if req.new_password.is_empty() {
        return Err(bad_request("new password must not be empty"));
    }
    account.password_hash = hash_secret(&req.new_password);
    account.must_change_password = false;
    tracing::info!(user = %account.username, "password changed");
    Ok(Json(json!({"status": "ok"})))
}
