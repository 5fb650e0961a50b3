use relay_admin::model::{ClusterSettings, ClusterSettingsUpdate, SecretUpdate};

use super::*;

pub(super) async fn get_cluster_settings(State(state): State<Arc<AppState>>) -> Json<ClusterSettings> {
    let c = state.cluster.read().await;
    Json(ClusterSettings {
        node_id: c.node_id.clone(),
        node_ip: c.node_ip.clone(),
        peer_node_ip: c.peer_node_ip.clone(),
        vip_address: c.vip_address.clone(),
        vrrp_priority: c.vrrp_priority,
        cluster_mode: c.cluster_mode.clone(),
        master_api_url: c.master_api_url.clone(),
        master_api_token: c.master_api_token.clone(),
        peer_ssh_user: c.peer_ssh_user.clone(),
        reject_response_message: c.reject_response_message.clone(),
        has_tls: c.tls_crt.is_some() && c.tls_key.is_some(),
        has_ssh_key: c.ssh_private_key.is_some(),
    })
}

pub(super) async fn save_cluster_settings(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
    Json(req): Json<ClusterSettingsUpdate>,
) -> Result<Json<Value>, Response> {
    require_role(&subject, &[Role::Admin])?;
    if !(1..=255).contains(&req.vrrp_priority) {
        return Err(bad_request("vrrp_priority must be between 1 and 255"));
    }

    let mut c = state.cluster.write().await;
    c.node_id = req.node_id;
    c.node_ip = req.node_ip;
    c.peer_node_ip = req.peer_node_ip;
    c.vip_address = req.vip_address;
    c.vrrp_priority = req.vrrp_priority;
    c.cluster_mode = req.cluster_mode;
    c.master_api_url = req.master_api_url;
    c.master_api_token = req.master_api_token;
    c.peer_ssh_user = req.peer_ssh_user;
    c.reject_response_message = req.reject_response_message;
    apply_secret(&mut c.tls_crt, req.tls_crt);
    apply_secret(&mut c.tls_key, req.tls_key);
    apply_secret(&mut c.ssh_private_key, req.ssh_private_key);
    apply_secret(&mut c.ssh_known_hosts, req.ssh_known_hosts);

    tracing::info!(
        node_id = %c.node_id,
        mode = %c.cluster_mode,
        user = %subject.username,
        "cluster settings saved"
    );
    Ok(Json(json!({
        "status": "saved",
        "note": "settings applied; keepalived and queue sync pick them up automatically",
    })))
}

fn apply_secret(slot: &mut Option<String>, update: SecretUpdate) {
    match update {
        SecretUpdate::Keep => {}
        SecretUpdate::Clear => *slot = None,
        SecretUpdate::Replace(v) => *slot = Some(v),
    }
}

pub(super) async fn test_peer(State(state): State<Arc<AppState>>) -> Result<Json<Value>, Response> {
    let peer = state.cluster.read().await.peer_node_ip.clone();
    if peer.trim().is_empty() {
        return Err(bad_request("peer_node_ip is not configured"));
    }
    if !state.peer_delay.is_zero() {
        tokio::time::sleep(state.peer_delay).await;
    }
    Ok(Json(json!({"ok": true, "peer": peer, "ssh": "reachable"})))
}

#[cfg(test)]
#[path = "../../tests/bin/relay_admin_stub/handlers_cluster_tests.rs"]
mod tests;
