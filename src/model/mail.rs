use serde::{Deserialize, Serialize};

use super::null_as_default;

pub const DEFAULT_SEARCH_HOURS: &str = "24";

/// One audit record from the relay log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailEvent {
    #[serde(alias = "created_at", deserialize_with = "null_as_default")]
    pub timestamp: String,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    #[serde(alias = "client_ip")]
    pub ip: Option<String>,
    pub status: Option<String>,
    pub target: Option<String>,
    #[serde(alias = "tls_used", deserialize_with = "null_as_default")]
    pub tls: bool,
    pub reason: Option<String>,
}

/// Mail search filters as typed by the operator; blanks are "any".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSearch {
    pub sender: String,
    pub recipient: String,
    pub ip: String,
    pub target: String,
    pub status: String,
    pub hours: String,
}

impl MailSearch {
    /// Look-back window; blank falls back to 24 hours.
    pub fn effective_hours(&self) -> &str {
        let h = self.hours.trim();
        if h.is_empty() { DEFAULT_SEARCH_HOURS } else { h }
    }

    /// Query pairs in the order the endpoint documents them. Every key is
    /// always sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sender", self.sender.trim().to_string()),
            ("recipient", self.recipient.trim().to_string()),
            ("ip", self.ip.trim().to_string()),
            ("target", self.target.trim().to_string()),
            ("status", self.status.trim().to_string()),
            ("hours", self.effective_hours().to_string()),
        ]
    }

    /// Sets a filter by its query name. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let slot = match key {
            "sender" | "from" => &mut self.sender,
            "recipient" | "rcpt" | "to" => &mut self.recipient,
            "ip" => &mut self.ip,
            "target" => &mut self.target,
            "status" => &mut self.status,
            "hours" => &mut self.hours,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }
}
