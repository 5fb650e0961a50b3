use serde::{Deserialize, Serialize};

use super::{lenient_vec, null_as_default};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    Opportunistic,
    Required,
    #[serde(other)]
    Other,
}

impl TlsMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TlsMode::Opportunistic => "opportunistic",
            TlsMode::Required => "required",
            TlsMode::Other => "other",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteEntry {
    pub sender_domain: String,
    pub target_host: String,
    pub target_port: u16,
    pub tls_mode: TlsMode,
    pub tls_verify: bool,
    pub auth_username: Option<String>,
}

impl Default for RouteEntry {
    fn default() -> Self {
        Self {
            sender_domain: String::new(),
            target_host: String::new(),
            target_port: 25,
            tls_mode: TlsMode::Opportunistic,
            tls_verify: false,
            auth_username: None,
        }
    }
}

/// Body of `POST /api/routes`.
///
/// TLS policy is fixed by this client; construct through [`NewRoute::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoute {
    pub sender_domain: String,
    pub target_host: String,
    pub target_port: u16,
    pub tls_mode: TlsMode,
    pub tls_verify: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,
}

impl NewRoute {
    pub fn new(sender_domain: &str, target_host: &str, target_port: u16) -> Self {
        Self {
            sender_domain: sender_domain.trim().to_string(),
            target_host: target_host.trim().to_string(),
            target_port,
            tls_mode: TlsMode::Opportunistic,
            tls_verify: false,
            auth_username: None,
            auth_password: None,
        }
    }

    /// SASL credentials for the upstream; blank values are dropped.
    pub fn with_auth(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.auth_username = username.filter(|s| !s.trim().is_empty());
        self.auth_password = password.filter(|s| !s.is_empty());
        self
    }
}

/// `GET /api/config`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Cluster mode as the relay engine sees it.
    pub mode: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub domains: Vec<DomainEntry>,
    #[serde(deserialize_with = "lenient_vec")]
    pub routes: Vec<RouteEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub latest_version: u64,
}
