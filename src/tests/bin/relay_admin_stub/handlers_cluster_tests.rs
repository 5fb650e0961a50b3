use super::*;

#[test]
fn apply_secret_keeps_clears_and_replaces() {
    let mut slot = Some("old".to_string());

    apply_secret(&mut slot, SecretUpdate::Keep);
    assert_eq!(slot.as_deref(), Some("old"));

    apply_secret(&mut slot, SecretUpdate::Replace("new".to_string()));
    assert_eq!(slot.as_deref(), Some("new"));

    apply_secret(&mut slot, SecretUpdate::Clear);
    assert_eq!(slot, None);
}

#[test]
fn update_body_without_secret_fields_keeps_them() {
    let body = json!({
        "node_id": "node-a",
        "node_ip": "10.0.0.11",
        "peer_node_ip": "10.0.0.12",
        "vip_address": "10.0.0.50",
        "vrrp_priority": 100,
        "cluster_mode": "master",
        "peer_ssh_user": "root",
        "tls_key": null,
    });
    let update: ClusterSettingsUpdate = serde_json::from_value(body).expect("decode update");
    assert_eq!(update.tls_crt, SecretUpdate::Keep);
    assert_eq!(update.tls_key, SecretUpdate::Clear);
    assert_eq!(update.ssh_private_key, SecretUpdate::Keep);
}
