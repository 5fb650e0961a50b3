use super::*;

pub(super) fn hash_secret(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

pub(super) fn random_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };

    let Ok(value) = value.to_str() else {
        return unauthorized();
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let account_id = {
        let tokens = state.tokens.read().await;
        tokens.get(&hash_secret(token)).copied()
    };
    let Some(account_id) = account_id else {
        return unauthorized();
    };

    let subject = {
        let accounts = state.accounts.read().await;
        let Some(a) = accounts.iter().find(|a| a.id == account_id) else {
            return unauthorized();
        };
        Subject {
            account_id: a.id,
            username: a.username.clone(),
            role: a.role,
        }
    };

    let mut req = req;
    req.extensions_mut().insert(subject);
    next.run(req).await
}

#[cfg(test)]
#[path = "../../tests/bin/relay_admin_stub/identity_tests.rs"]
mod tests;
