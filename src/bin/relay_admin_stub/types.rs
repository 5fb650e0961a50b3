use relay_admin::model::{ClusterMode, DEFAULT_PEER_SSH_USER, DEFAULT_VRRP_PRIORITY, MailEvent};

use super::*;

pub(crate) struct AppState {
    pub(crate) accounts: RwLock<Vec<Account>>,

    // blake3(token) -> account id
    pub(crate) tokens: RwLock<std::collections::HashMap<String, i64>>,

    pub(crate) relay: RwLock<RelayStore>,
    pub(crate) cluster: RwLock<ClusterStore>,
    pub(crate) mail: RwLock<MailStore>,

    /// Artificial latency of the peer connectivity check.
    pub(crate) peer_delay: Duration,
}

#[derive(Clone, Debug)]
pub(crate) struct Subject {
    pub(crate) account_id: i64,
    pub(crate) username: String,
    pub(crate) role: Role,
}

#[derive(Clone, Debug)]
pub(crate) struct Account {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) role: Role,
    pub(crate) must_change_password: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct StoredRoute {
    pub(crate) sender_domain: String,
    pub(crate) target_host: String,
    pub(crate) target_port: u16,
    pub(crate) tls_mode: relay_admin::model::TlsMode,
    pub(crate) tls_verify: bool,
    pub(crate) auth_username: Option<String>,

    // Write-only; never returned.
    #[allow(dead_code)]
    pub(crate) auth_password: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct RelayStore {
    pub(crate) domains: Vec<String>,
    pub(crate) routes: Vec<StoredRoute>,
    pub(crate) version: u64,
    pub(crate) applied_version: u64,
}

#[derive(Clone, Debug)]
pub(crate) struct ClusterStore {
    pub(crate) node_id: String,
    pub(crate) node_ip: String,
    pub(crate) peer_node_ip: String,
    pub(crate) vip_address: String,
    pub(crate) vrrp_priority: i64,
    pub(crate) cluster_mode: ClusterMode,
    pub(crate) master_api_url: Option<String>,
    pub(crate) master_api_token: Option<String>,
    pub(crate) peer_ssh_user: String,
    pub(crate) reject_response_message: Option<String>,
    pub(crate) tls_crt: Option<String>,
    pub(crate) tls_key: Option<String>,
    pub(crate) ssh_private_key: Option<String>,
    pub(crate) ssh_known_hosts: Option<String>,
}

impl Default for ClusterStore {
    fn default() -> Self {
        Self {
            node_id: String::new(),
            node_ip: String::new(),
            peer_node_ip: String::new(),
            vip_address: String::new(),
            vrrp_priority: DEFAULT_VRRP_PRIORITY,
            cluster_mode: ClusterMode::Standalone,
            master_api_url: None,
            master_api_token: None,
            peer_ssh_user: DEFAULT_PEER_SSH_USER.to_string(),
            reject_response_message: None,
            tls_crt: None,
            tls_key: None,
            ssh_private_key: None,
            ssh_known_hosts: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MailStore {
    pub(crate) delivered: Vec<MailEvent>,
    pub(crate) rejected: Vec<MailEvent>,
}
