use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::null_as_default;

pub const DEFAULT_VRRP_PRIORITY: i64 = 100;
pub const DEFAULT_PEER_SSH_USER: &str = "root";

/// HA role of the node. Modes this client does not know are kept verbatim so
/// a save writes them back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClusterMode {
    #[default]
    Standalone,
    Master,
    Slave,
    Other(String),
}

impl ClusterMode {
    pub const ALL: [ClusterMode; 3] = [
        ClusterMode::Standalone,
        ClusterMode::Master,
        ClusterMode::Slave,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ClusterMode::Standalone => "standalone",
            ClusterMode::Master => "master",
            ClusterMode::Slave => "slave",
            ClusterMode::Other(raw) => raw,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ClusterMode::Standalone => ClusterMode::Master,
            ClusterMode::Master => ClusterMode::Slave,
            ClusterMode::Slave | ClusterMode::Other(_) => ClusterMode::Standalone,
        }
    }

    /// Master URL/token only mean something for a slave node.
    pub fn uses_master_link(&self) -> bool {
        matches!(self, ClusterMode::Slave)
    }

    /// Known mode for `raw`, or `Other` holding it as sent.
    pub fn from_wire(raw: &str) -> Self {
        ClusterMode::ALL
            .into_iter()
            .find(|m| m.as_str() == raw)
            .unwrap_or_else(|| ClusterMode::Other(raw.to_string()))
    }
}

impl fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator input accepts only the known modes.
impl FromStr for ClusterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ClusterMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown cluster mode '{}' (standalone|master|slave)", s))
    }
}

impl Serialize for ClusterMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// `null` reads as the default mode.
impl<'de> Deserialize<'de> for ClusterMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => ClusterMode::default(),
            Some(raw) => ClusterMode::from_wire(&raw),
        })
    }
}

/// Cluster/node/TLS/SSH settings as reported by the appliance.
///
/// Secret material is never echoed back; only the `has_*` presence flags are.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    #[serde(deserialize_with = "null_as_default")]
    pub node_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub peer_node_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vip_address: String,
    #[serde(deserialize_with = "priority_or_default")]
    pub vrrp_priority: i64,
    pub cluster_mode: ClusterMode,
    pub master_api_url: Option<String>,
    pub master_api_token: Option<String>,
    #[serde(deserialize_with = "peer_user_or_default")]
    pub peer_ssh_user: String,
    pub reject_response_message: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_tls: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_ssh_key: bool,
}

fn priority_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_VRRP_PRIORITY))
}

fn peer_user_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .unwrap_or_else(|| DEFAULT_PEER_SSH_USER.to_string()))
}

impl Default for ClusterSettings {
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
            has_tls: false,
            has_ssh_key: false,
        }
    }
}

/// Write-only secret field.
///
/// On the wire: `Keep` omits the field, `Clear` sends `null`, `Replace` sends
/// the new value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SecretUpdate {
    #[default]
    Keep,
    Clear,
    Replace(String),
}

impl SecretUpdate {
    pub fn is_keep(&self) -> bool {
        matches!(self, SecretUpdate::Keep)
    }

    /// Blank input leaves the stored secret untouched.
    pub fn from_input(raw: &str) -> Self {
        if raw.trim().is_empty() {
            SecretUpdate::Keep
        } else {
            SecretUpdate::Replace(raw.to_string())
        }
    }
}

impl Serialize for SecretUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SecretUpdate::Keep | SecretUpdate::Clear => serializer.serialize_none(),
            SecretUpdate::Replace(v) => serializer.serialize_some(v),
        }
    }
}

// Only reached when the field is present; a missing field is `Keep` via
// `#[serde(default)]`.
impl<'de> Deserialize<'de> for SecretUpdate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => SecretUpdate::Clear,
            Some(v) => SecretUpdate::Replace(v),
        })
    }
}

/// Body of `POST /api/cluster/settings`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSettingsUpdate {
    pub node_id: String,
    pub node_ip: String,
    pub peer_node_ip: String,
    pub vip_address: String,
    pub vrrp_priority: i64,
    pub cluster_mode: ClusterMode,
    #[serde(default)]
    pub master_api_url: Option<String>,
    #[serde(default)]
    pub master_api_token: Option<String>,
    pub peer_ssh_user: String,
    #[serde(default)]
    pub reject_response_message: Option<String>,
    #[serde(default, skip_serializing_if = "SecretUpdate::is_keep")]
    pub tls_crt: SecretUpdate,
    #[serde(default, skip_serializing_if = "SecretUpdate::is_keep")]
    pub tls_key: SecretUpdate,
    #[serde(default, skip_serializing_if = "SecretUpdate::is_keep")]
    pub ssh_private_key: SecretUpdate,
    #[serde(default, skip_serializing_if = "SecretUpdate::is_keep")]
    pub ssh_known_hosts: SecretUpdate,
}
