//! Editable copy of the cluster settings while the settings overlay is open.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{
    ClusterMode, ClusterSettings, ClusterSettingsUpdate, DEFAULT_PEER_SSH_USER,
    DEFAULT_VRRP_PRIORITY, SecretUpdate,
};

/// Node IP assumed when none has been entered yet.
pub const FALLBACK_NODE_IP: &str = "10.0.0.11";

/// Suggests a VIP in the node's /24: the first three dot-separated parts of
/// `node_ip` followed by `.50`. No validation; short inputs keep whatever
/// prefix they have.
pub fn suggest_vip(node_ip: &str) -> String {
    let base = if node_ip.is_empty() {
        FALLBACK_NODE_IP
    } else {
        node_ip
    };
    let prefix: Vec<&str> = base.split('.').take(3).collect();
    format!("{}.50", prefix.join("."))
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("vrrp_priority must be an integer, got '{0}'")]
    InvalidPriority(String),

    #[error("{0}")]
    UnknownMode(String),

    #[error("{0}")]
    UnknownRole(String),

    #[error("unknown settings field '{0}'")]
    UnknownField(String),

    #[error("{0} is not a secret field")]
    NotSecret(FormField),

    #[error("read secret from {}: {source}", .path.display())]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    NodeId,
    NodeIp,
    PeerNodeIp,
    VipAddress,
    VrrpPriority,
    ClusterMode,
    MasterApiUrl,
    MasterApiToken,
    PeerSshUser,
    RejectResponseMessage,
    TlsCrt,
    TlsKey,
    SshPrivateKey,
    SshKnownHosts,
}

impl FormField {
    pub const ALL: [FormField; 14] = [
        FormField::NodeId,
        FormField::NodeIp,
        FormField::PeerNodeIp,
        FormField::VipAddress,
        FormField::VrrpPriority,
        FormField::ClusterMode,
        FormField::MasterApiUrl,
        FormField::MasterApiToken,
        FormField::PeerSshUser,
        FormField::RejectResponseMessage,
        FormField::TlsCrt,
        FormField::TlsKey,
        FormField::SshPrivateKey,
        FormField::SshKnownHosts,
    ];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            FormField::NodeId => "node_id",
            FormField::NodeIp => "node_ip",
            FormField::PeerNodeIp => "peer_node_ip",
            FormField::VipAddress => "vip_address",
            FormField::VrrpPriority => "vrrp_priority",
            FormField::ClusterMode => "cluster_mode",
            FormField::MasterApiUrl => "master_api_url",
            FormField::MasterApiToken => "master_api_token",
            FormField::PeerSshUser => "peer_ssh_user",
            FormField::RejectResponseMessage => "reject_response_message",
            FormField::TlsCrt => "tls_crt",
            FormField::TlsKey => "tls_key",
            FormField::SshPrivateKey => "ssh_private_key",
            FormField::SshKnownHosts => "ssh_known_hosts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::NodeId => "Node ID",
            FormField::NodeIp => "Node IP",
            FormField::PeerNodeIp => "Peer node IP",
            FormField::VipAddress => "VIP address",
            FormField::VrrpPriority => "VRRP priority",
            FormField::ClusterMode => "Cluster mode",
            FormField::MasterApiUrl => "Master API URL",
            FormField::MasterApiToken => "Master API token",
            FormField::PeerSshUser => "Peer SSH user",
            FormField::RejectResponseMessage => "Reject message",
            FormField::TlsCrt => "TLS certificate",
            FormField::TlsKey => "TLS key",
            FormField::SshPrivateKey => "SSH private key",
            FormField::SshKnownHosts => "SSH known_hosts",
        }
    }

    /// Write-only fields the server never echoes back.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            FormField::TlsCrt
                | FormField::TlsKey
                | FormField::SshPrivateKey
                | FormField::SshKnownHosts
        )
    }

    /// Only meaningful when the node runs as a slave.
    pub fn is_master_link(self) -> bool {
        matches!(self, FormField::MasterApiUrl | FormField::MasterApiToken)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let want = s.trim().to_ascii_lowercase().replace('-', "_");
        let want = match want.as_str() {
            "mode" => "cluster_mode",
            "priority" => "vrrp_priority",
            "vip" => "vip_address",
            "peer_ip" => "peer_node_ip",
            other => other,
        };
        FormField::ALL
            .into_iter()
            .find(|f| f.key() == want)
            .ok_or_else(|| FormError::UnknownField(s.trim().to_string()))
    }
}

/// Local edits of [`ClusterSettings`]. Text fields hold exactly what the
/// operator typed; conversion and defaults happen in [`Self::to_update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterSettingsForm {
    pub node_id: String,
    pub node_ip: String,
    pub peer_node_ip: String,
    pub vip_address: String,
    pub vrrp_priority: String,
    pub cluster_mode: ClusterMode,
    pub master_api_url: String,
    pub master_api_token: String,
    pub peer_ssh_user: String,
    pub reject_response_message: String,
    pub tls_crt: SecretUpdate,
    pub tls_key: SecretUpdate,
    pub ssh_private_key: SecretUpdate,
    pub ssh_known_hosts: SecretUpdate,
    pub has_tls: bool,
    pub has_ssh_key: bool,
    dirty: bool,
}

impl ClusterSettingsForm {
    pub fn from_settings(s: &ClusterSettings) -> Self {
        Self {
            node_id: s.node_id.clone(),
            node_ip: s.node_ip.clone(),
            peer_node_ip: s.peer_node_ip.clone(),
            vip_address: s.vip_address.clone(),
            vrrp_priority: s.vrrp_priority.to_string(),
            cluster_mode: s.cluster_mode.clone(),
            master_api_url: s.master_api_url.clone().unwrap_or_default(),
            master_api_token: s.master_api_token.clone().unwrap_or_default(),
            peer_ssh_user: s.peer_ssh_user.clone(),
            reject_response_message: s.reject_response_message.clone().unwrap_or_default(),
            tls_crt: SecretUpdate::Keep,
            tls_key: SecretUpdate::Keep,
            ssh_private_key: SecretUpdate::Keep,
            ssh_known_hosts: SecretUpdate::Keep,
            has_tls: s.has_tls,
            has_ssh_key: s.has_ssh_key,
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the master URL/token inputs are live for the current mode.
    pub fn master_link_active(&self) -> bool {
        self.cluster_mode.uses_master_link()
    }

    /// Current text of a plain field. Secrets are never displayed.
    pub fn text(&self, field: FormField) -> Option<&str> {
        let v = match field {
            FormField::NodeId => &self.node_id,
            FormField::NodeIp => &self.node_ip,
            FormField::PeerNodeIp => &self.peer_node_ip,
            FormField::VipAddress => &self.vip_address,
            FormField::VrrpPriority => &self.vrrp_priority,
            FormField::ClusterMode => return Some(self.cluster_mode.as_str()),
            FormField::MasterApiUrl => &self.master_api_url,
            FormField::MasterApiToken => &self.master_api_token,
            FormField::PeerSshUser => &self.peer_ssh_user,
            FormField::RejectResponseMessage => &self.reject_response_message,
            FormField::TlsCrt
            | FormField::TlsKey
            | FormField::SshPrivateKey
            | FormField::SshKnownHosts => return None,
        };
        Some(v.as_str())
    }

    pub fn secret(&self, field: FormField) -> Option<&SecretUpdate> {
        match field {
            FormField::TlsCrt => Some(&self.tls_crt),
            FormField::TlsKey => Some(&self.tls_key),
            FormField::SshPrivateKey => Some(&self.ssh_private_key),
            FormField::SshKnownHosts => Some(&self.ssh_known_hosts),
            _ => None,
        }
    }

    /// Whether the server already holds material for a secret field.
    pub fn secret_stored(&self, field: FormField) -> bool {
        match field {
            FormField::TlsCrt | FormField::TlsKey => self.has_tls,
            FormField::SshPrivateKey | FormField::SshKnownHosts => self.has_ssh_key,
            _ => false,
        }
    }

    fn secret_mut(&mut self, field: FormField) -> Option<&mut SecretUpdate> {
        match field {
            FormField::TlsCrt => Some(&mut self.tls_crt),
            FormField::TlsKey => Some(&mut self.tls_key),
            FormField::SshPrivateKey => Some(&mut self.ssh_private_key),
            FormField::SshKnownHosts => Some(&mut self.ssh_known_hosts),
            _ => None,
        }
    }

    /// Stores operator input for `field`.
    ///
    /// Secrets: blank keeps the stored value, `@path` loads the file at path,
    /// anything else replaces it.
    pub fn set(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        let slot = match field {
            FormField::ClusterMode => {
                self.cluster_mode = raw.parse().map_err(FormError::UnknownMode)?;
                self.dirty = true;
                return Ok(());
            }
            FormField::TlsCrt
            | FormField::TlsKey
            | FormField::SshPrivateKey
            | FormField::SshKnownHosts => {
                let update = secret_input(raw)?;
                if let Some(slot) = self.secret_mut(field) {
                    *slot = update;
                }
                self.dirty = true;
                return Ok(());
            }
            FormField::NodeId => &mut self.node_id,
            FormField::NodeIp => &mut self.node_ip,
            FormField::PeerNodeIp => &mut self.peer_node_ip,
            FormField::VipAddress => &mut self.vip_address,
            FormField::VrrpPriority => &mut self.vrrp_priority,
            FormField::MasterApiUrl => &mut self.master_api_url,
            FormField::MasterApiToken => &mut self.master_api_token,
            FormField::PeerSshUser => &mut self.peer_ssh_user,
            FormField::RejectResponseMessage => &mut self.reject_response_message,
        };
        *slot = raw.to_string();
        self.dirty = true;
        Ok(())
    }

    /// Marks a secret for removal on the next save.
    pub fn clear_secret(&mut self, field: FormField) -> Result<(), FormError> {
        let slot = self.secret_mut(field).ok_or(FormError::NotSecret(field))?;
        *slot = SecretUpdate::Clear;
        self.dirty = true;
        Ok(())
    }

    pub fn cycle_mode(&mut self) {
        self.cluster_mode = self.cluster_mode.next();
        self.dirty = true;
    }

    pub fn suggested_vip(&self) -> String {
        suggest_vip(&self.node_ip)
    }

    pub fn apply_suggested_vip(&mut self) -> String {
        let vip = self.suggested_vip();
        self.vip_address = vip.clone();
        self.dirty = true;
        vip
    }

    /// Takes the presence flags from fresh server state, keeping local edits.
    pub fn refresh_flags(&mut self, server: &ClusterSettings) {
        self.has_tls = server.has_tls;
        self.has_ssh_key = server.has_ssh_key;
    }

    pub fn to_update(&self) -> Result<ClusterSettingsUpdate, FormError> {
        let priority = self.vrrp_priority.trim();
        let vrrp_priority = if priority.is_empty() {
            DEFAULT_VRRP_PRIORITY
        } else {
            priority
                .parse::<i64>()
                .map_err(|_| FormError::InvalidPriority(priority.to_string()))?
        };
        let peer_ssh_user = match self.peer_ssh_user.trim() {
            "" => DEFAULT_PEER_SSH_USER.to_string(),
            u => u.to_string(),
        };

        Ok(ClusterSettingsUpdate {
            node_id: self.node_id.trim().to_string(),
            node_ip: self.node_ip.trim().to_string(),
            peer_node_ip: self.peer_node_ip.trim().to_string(),
            vip_address: self.vip_address.trim().to_string(),
            vrrp_priority,
            cluster_mode: self.cluster_mode.clone(),
            master_api_url: non_blank(&self.master_api_url),
            master_api_token: non_blank(&self.master_api_token),
            peer_ssh_user,
            reject_response_message: non_blank(&self.reject_response_message),
            tls_crt: self.tls_crt.clone(),
            tls_key: self.tls_key.clone(),
            ssh_private_key: self.ssh_private_key.clone(),
            ssh_known_hosts: self.ssh_known_hosts.clone(),
        })
    }
}

fn secret_input(raw: &str) -> Result<SecretUpdate, FormError> {
    match raw.trim().strip_prefix('@') {
        Some(path) if !path.is_empty() => {
            let path = PathBuf::from(path);
            let contents = std::fs::read_to_string(&path)
                .map_err(|source| FormError::SecretFile { path, source })?;
            Ok(SecretUpdate::from_input(&contents))
        }
        _ => Ok(SecretUpdate::from_input(raw)),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

#[cfg(test)]
#[path = "tests/cluster_form_tests.rs"]
mod tests;
