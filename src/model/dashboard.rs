use serde::{Deserialize, Serialize};

use super::{MailEvent, lenient_vec, null_as_default};

/// `GET /api/dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub processed_24h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub processed_1h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub rejected_16h: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub queue_size: u64,
    pub active_node: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub rejected_last_100: Vec<MailEvent>,
}
