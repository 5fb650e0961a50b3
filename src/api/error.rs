use std::time::Duration;

use thiserror::Error;

use super::TransportError;

/// Failure of one API call, as seen by the action that issued it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401; the stored token has already been cleared.
    #[error("session expired; please log in again")]
    AuthExpired,

    /// Non-2xx answer carrying the server's own explanation.
    #[error("{}", rejection_text(.status, .detail, .body))]
    Rejected {
        status: u16,
        detail: Option<String>,
        body: String,
    },

    #[error("could not reach server: {0}")]
    Network(String),

    #[error("request timed out{}", timeout_suffix(.0))]
    TimedOut(Option<Duration>),

    #[error("encode request: {0}")]
    Encode(String),

    /// A payload that has to be exact did not match the expected shape.
    #[error("unexpected response from {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl ApiError {
    /// Server-supplied `detail`, or `fallback` when there is none.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                detail: Some(d), ..
            } => d.clone(),
            ApiError::Rejected { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }

    /// The raw response body for rejections; the display text otherwise.
    pub fn verbatim(&self) -> String {
        match self {
            ApiError::Rejected { body, status, .. } if body.trim().is_empty() => {
                format!("HTTP {}", status)
            }
            ApiError::Rejected { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::TimedOut(_))
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(msg) => ApiError::Network(msg),
            TransportError::TimedOut(after) => ApiError::TimedOut(after),
        }
    }
}

fn rejection_text(status: &u16, detail: &Option<String>, body: &str) -> String {
    if let Some(d) = detail {
        return d.clone();
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}

fn timeout_suffix(after: &Option<Duration>) -> String {
    after
        .map(|d| format!(" after {}s", d.as_secs()))
        .unwrap_or_default()
}
