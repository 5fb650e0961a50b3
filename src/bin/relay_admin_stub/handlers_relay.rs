use relay_admin::model::{DomainEntry, NewRoute, RelayConfig, RouteEntry};

use super::*;

const WRITERS: &[Role] = &[Role::Admin, Role::Operator];

pub(super) async fn get_config(State(state): State<Arc<AppState>>) -> Json<RelayConfig> {
    let mode = state.cluster.read().await.cluster_mode.clone();
    let relay = state.relay.read().await;
    Json(RelayConfig {
        mode: Some(mode.as_str().to_string()),
        domains: relay
            .domains
            .iter()
            .map(|d| DomainEntry { domain: d.clone() })
            .collect(),
        routes: relay
            .routes
            .iter()
            .map(|r| RouteEntry {
                sender_domain: r.sender_domain.clone(),
                target_host: r.target_host.clone(),
                target_port: r.target_port,
                tls_mode: r.tls_mode,
                tls_verify: r.tls_verify,
                auth_username: r.auth_username.clone(),
            })
            .collect(),
        latest_version: relay.version,
    })
}

pub(super) async fn add_domain(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(req): Json<DomainEntry>,
) -> Result<Json<Value>, Response> {
    require_role(&subject, WRITERS)?;
    let domain = req.domain.trim().to_ascii_lowercase();
    if domain.is_empty() {
        return Err(bad_request("domain must not be empty"));
    }

    let mut relay = state.relay.write().await;
    if relay.domains.iter().any(|d| d == &domain) {
        return Err(bad_request("domain already exists"));
    }
    relay.domains.push(domain.clone());
    relay.version += 1;
    tracing::info!(%domain, version = relay.version, "domain added");
    Ok(Json(json!({"status": "saved", "version": relay.version})))
}

pub(super) async fn add_route(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(req): Json<NewRoute>,
) -> Result<Json<Value>, Response> {
    require_role(&subject, WRITERS)?;
    let sender_domain = req.sender_domain.trim().to_ascii_lowercase();
    let target_host = req.target_host.trim().to_string();
    if sender_domain.is_empty() || target_host.is_empty() {
        return Err(bad_request("sender_domain and target_host are required"));
    }
    if req.target_port == 0 {
        return Err(bad_request("target_port must be between 1 and 65535"));
    }

    let mut relay = state.relay.write().await;
    if relay.routes.iter().any(|r| r.sender_domain == sender_domain) {
        return Err(bad_request("route for sender domain already exists"));
    }
    relay.routes.push(StoredRoute {
        sender_domain: sender_domain.clone(),
        target_host,
        target_port: req.target_port,
        tls_mode: req.tls_mode,
        tls_verify: req.tls_verify,
        auth_username: req.auth_username,
        auth_password: req.auth_password,
    });
    relay.version += 1;
    tracing::info!(%sender_domain, version = relay.version, "route added");
    Ok(Json(json!({"status": "saved", "version": relay.version})))
}

pub(super) async fn test_config(State(state): State<Arc<AppState>>) -> Json<Value> {
    let relay = state.relay.read().await;
    Json(json!({
        "ok": true,
        "checks": {
            "domains": true,
            "sender_relay": true,
            "transport": true,
        },
        "version": relay.version,
    }))
}

pub(super) async fn apply_config(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Result<Json<Value>, Response> {
    require_role(&subject, WRITERS)?;
    let mut relay = state.relay.write().await;
    relay.applied_version = relay.version;
    tracing::info!(version = relay.applied_version, user = %subject.username, "config applied");
    Ok(Json(json!({"status": "applied"})))
}
