use std::time::Duration;

use anyhow::{Context, Result};

use super::{ApiRequest, Method, RawResponse, Transport, TransportError};

pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `timeout` is the default for every request; `None` leaves reqwest's.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("relay-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn send(&self, req: &ApiRequest) -> Result<RawResponse, TransportError> {
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut rb = self
            .client
            .request(method, self.url(&req.path))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !req.query.is_empty() {
            rb = rb.query(&req.query);
        }
        if let Some(token) = &req.bearer {
            rb = rb.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = &req.body {
            rb = rb.body(body.to_string());
        }
        if let Some(timeout) = req.timeout {
            rb = rb.timeout(timeout);
        }

        let resp = rb.send().map_err(|err| classify(err, req.timeout))?;
        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .map_err(|err| classify(err, req.timeout))?
            .to_vec();
        Ok(RawResponse { status, body })
    }
}

fn classify(err: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if err.is_timeout() {
        return TransportError::TimedOut(timeout);
    }
    let mut msg = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    TransportError::Unreachable(msg)
}
