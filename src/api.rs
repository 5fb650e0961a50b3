//! Authenticated JSON calls against the appliance API.
//!
//! Every call goes through [`ApiClient`], which attaches the stored bearer
//! token, decodes bodies permissively and turns a 401 into a cleared session.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::session::SessionStore;

mod auth;
mod cluster;
mod error;
mod http_client;
mod mail;
mod relay;
mod transport;
mod users;

pub use self::error::ApiError;
pub use self::http_client::HttpTransport;
pub use self::transport::{ApiRequest, Method, RawResponse, Transport, TransportError};

/// Status plus decoded body. `body` is `{}` when the payload was empty or not
/// JSON; `text` keeps the raw payload for verbatim error display.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    pub text: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            return Ok(self.body);
        }
        let detail = match self.body.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        };
        Err(ApiError::Rejected {
            status: self.status,
            detail,
            body: self.text,
        })
    }
}

/// Decodes a response body without ever failing.
pub fn decode_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Null) | Err(_) => Value::Object(serde_json::Map::new()),
        Ok(v) => v,
    }
}

/// Shapes a decoded body into `T`, falling back to `T::default()` when the
/// server sent something else.
pub fn decode_as<T: DeserializeOwned + Default>(body: Value) -> T {
    match serde_json::from_value(body) {
        Ok(v) => v,
        Err(err) => {
            tracing::debug!("unexpected payload shape ({}); using default", err);
            T::default()
        }
    }
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, session: SessionStore) -> Self {
        Self { transport, session }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Authenticated call with an optional JSON body.
    pub fn call(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let mut req = ApiRequest::new(method, path);
        req.body = body;
        self.send_authed(req)
    }

    /// Call without a bearer token. A 401 here is an ordinary rejection.
    pub fn call_anonymous(
        &mut self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let mut req = ApiRequest::new(method, path);
        req.body = body;
        self.send(&req)
    }

    fn send_authed(&mut self, mut req: ApiRequest) -> Result<ApiResponse, ApiError> {
        req.bearer = self.session.get().map(str::to_string);
        let resp = self.send(&req)?;
        if resp.status == 401 {
            tracing::info!(path = %req.path, "session rejected by server; clearing token");
            if let Err(err) = self.session.clear() {
                tracing::warn!("clear session: {:#}", err);
            }
            return Err(ApiError::AuthExpired);
        }
        Ok(resp)
    }

    fn send(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let raw = match self.transport.send(req) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(method = %req.method, path = %req.path, "{}", err);
                return Err(err.into());
            }
        };
        tracing::debug!(method = %req.method, path = %req.path, status = raw.status, "api call");
        Ok(ApiResponse {
            status: raw.status,
            body: decode_body(&raw.body),
            text: String::from_utf8_lossy(&raw.body).into_owned(),
        })
    }

    fn get_value(&mut self, path: &str) -> Result<Value, ApiError> {
        self.send_authed(ApiRequest::new(Method::Get, path))?.into_result()
    }

    fn get_decoded<T: DeserializeOwned + Default>(&mut self, path: &str) -> Result<T, ApiError> {
        self.get_value(path).map(decode_as)
    }

    /// Reads `path` without any fallback: the payload must decode into `T`.
    /// Used where the result is edited and written back.
    fn get_exact<T: DeserializeOwned>(&mut self, path: &str) -> Result<T, ApiError> {
        let resp = self.send_authed(ApiRequest::new(Method::Get, path))?;
        let text = resp.text.clone();
        resp.into_result()?;
        serde_json::from_str(&text).map_err(|err| {
            tracing::warn!(path = %path, "unexpected payload: {}", err);
            ApiError::Malformed {
                path: path.to_string(),
                reason: err.to_string(),
            }
        })
    }

    fn write_json<B: Serialize>(
        &mut self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let mut req = ApiRequest::new(method, path);
        let body = serde_json::to_value(body).map_err(|err| ApiError::Encode(err.to_string()))?;
        req.body = Some(body);
        self.send_authed(req)?.into_result()
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
