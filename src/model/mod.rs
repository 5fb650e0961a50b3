//! Wire types exchanged with the appliance API.
//!
//! Server-owned entities decode permissively: every field has a default so a
//! partial or older payload still produces a usable value.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

mod cluster;
mod dashboard;
mod mail;
mod relay;
mod users;

pub use self::cluster::{
    ClusterMode, ClusterSettings, ClusterSettingsUpdate, DEFAULT_PEER_SSH_USER,
    DEFAULT_VRRP_PRIORITY, SecretUpdate,
};
pub use self::dashboard::DashboardSnapshot;
pub use self::mail::{DEFAULT_SEARCH_HOURS, MailEvent, MailSearch};
pub use self::relay::{DomainEntry, NewRoute, RelayConfig, RouteEntry, TlsMode};
pub use self::users::{
    LoginRequest, LoginResponse, NewUser, PasswordChange, Role, UserAccount, UserUpdate,
};

/// Reads an explicit `null` as the field's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes a list element by element, dropping the ones that do not fit.
/// Anything other than an array reads as empty.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    })
}
