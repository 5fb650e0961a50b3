use std::fmt;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        })
    }
}

/// One outgoing call, independent of the HTTP stack that carries it.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
    /// Upper bound for this call only; `None` uses the transport default.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            bearer: None,
            timeout: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    TimedOut(Option<Duration>),
}

/// Carries requests to the appliance. Implemented over HTTP in production and
/// by in-process fakes in tests.
pub trait Transport {
    fn base_url(&self) -> &str;

    fn send(&self, req: &ApiRequest) -> Result<RawResponse, TransportError>;
}
