//! In-process appliance used by unit tests: records every request and serves
//! the API from memory.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Value, json};

use crate::api::{ApiRequest, Method, RawResponse, Transport, TransportError};

pub(crate) const ADMIN_TOKEN: &str = "tok-admin";
pub(crate) const BASE_URL: &str = "http://appliance.test";

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) body: Option<Value>,
    pub(crate) bearer: Option<String>,
    pub(crate) timeout: Option<std::time::Duration>,
}

struct User {
    id: i64,
    username: String,
    password: String,
    role: String,
    must_change_password: bool,
}

struct State {
    log: Vec<RecordedRequest>,
    tokens_valid: bool,
    unreachable: bool,
    hang_peer_test: bool,
    garbage_paths: Vec<String>,
    processed_24h: u64,
    rejected: Vec<Value>,
    domains: Vec<String>,
    routes: Vec<Value>,
    version: u64,
    cluster: Value,
    has_tls: bool,
    has_ssh_key: bool,
    users: Vec<User>,
    mail: Vec<Value>,
}

#[derive(Clone)]
pub(crate) struct FakeAppliance {
    state: Rc<RefCell<State>>,
}

impl FakeAppliance {
    pub(crate) fn new() -> Self {
        let state = State {
            log: Vec::new(),
            tokens_valid: true,
            unreachable: false,
            hang_peer_test: false,
            garbage_paths: Vec::new(),
            processed_24h: 42,
            rejected: Vec::new(),
            domains: Vec::new(),
            routes: Vec::new(),
            version: 0,
            cluster: json!({
                "node_id": "node-a",
                "node_ip": "10.0.0.11",
                "peer_node_ip": "10.0.0.12",
                "vip_address": "10.0.0.50",
                "vrrp_priority": 100,
                "cluster_mode": "standalone",
                "master_api_url": "",
                "master_api_token": "",
                "peer_ssh_user": "root",
            }),
            has_tls: false,
            has_ssh_key: false,
            users: vec![User {
                id: 1,
                username: "admin".to_string(),
                password: "Admin123".to_string(),
                role: "Admin".to_string(),
                must_change_password: false,
            }],
            mail: vec![json!({
                "timestamp": "2026-10-19T08:00:00Z",
                "sender": "alice@example.com",
                "recipient": "bob@example.org",
                "ip": "192.0.2.10",
                "status": "sent",
                "target": "smtp.upstream:25",
                "tls": true,
            })],
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().log.clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.state
            .borrow()
            .log
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub(crate) fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    pub(crate) fn last_request(&self, path: &str) -> Option<RecordedRequest> {
        self.state
            .borrow()
            .log
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }

    pub(crate) fn last_body(&self, path: &str) -> Option<Value> {
        self.last_request(path).and_then(|r| r.body)
    }

    pub(crate) fn expire_tokens(&self) {
        self.state.borrow_mut().tokens_valid = false;
    }

    pub(crate) fn set_unreachable(&self, on: bool) {
        self.state.borrow_mut().unreachable = on;
    }

    pub(crate) fn hang_peer_test(&self, on: bool) {
        self.state.borrow_mut().hang_peer_test = on;
    }

    pub(crate) fn serve_garbage(&self, path: &str) {
        self.state.borrow_mut().garbage_paths.push(path.to_string());
    }

    pub(crate) fn set_processed_24h(&self, n: u64) {
        self.state.borrow_mut().processed_24h = n;
    }

    pub(crate) fn push_rejected(&self, row: Value) {
        self.state.borrow_mut().rejected.push(row);
    }

    /// Overwrites one key of the stored cluster settings with a raw value.
    pub(crate) fn set_cluster_field(&self, key: &str, value: Value) {
        self.state.borrow_mut().cluster[key] = value;
    }
}

fn reply(status: u16, body: Value) -> Result<RawResponse, TransportError> {
    Ok(RawResponse {
        status,
        body: serde_json::to_vec(&body).unwrap_or_default(),
    })
}

fn detail(status: u16, msg: &str) -> Result<RawResponse, TransportError> {
    reply(status, json!({ "detail": msg }))
}

fn user_json(u: &User) -> Value {
    json!({
        "id": u.id,
        "username": u.username,
        "role": u.role,
        "must_change_password": u.must_change_password,
    })
}

impl Transport for FakeAppliance {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    fn send(&self, req: &ApiRequest) -> Result<RawResponse, TransportError> {
        let mut st = self.state.borrow_mut();
        st.log.push(RecordedRequest {
            method: req.method,
            path: req.path.clone(),
            query: req.query.clone(),
            body: req.body.clone(),
            bearer: req.bearer.clone(),
            timeout: req.timeout,
        });

        if st.unreachable {
            return Err(TransportError::Unreachable("connection refused".to_string()));
        }
        if st.garbage_paths.iter().any(|p| p == &req.path) {
            return Ok(RawResponse {
                status: 200,
                body: b"<html>not json</html>".to_vec(),
            });
        }

        let body = req.body.clone().unwrap_or(Value::Null);
        let text = |key: &str| body.get(key).and_then(Value::as_str).unwrap_or("").to_string();

        if req.method == Method::Post && req.path == "/api/login" {
            let found = st
                .users
                .iter()
                .any(|u| u.username == text("username") && u.password == text("password"));
            if !found {
                return detail(401, "invalid credentials");
            }
            return reply(
                200,
                json!({"token": ADMIN_TOKEN, "role": "Admin", "must_change_password": false}),
            );
        }

        if !st.tokens_valid || req.bearer.as_deref() != Some(ADMIN_TOKEN) {
            return detail(401, "invalid token");
        }

        match (req.method, req.path.as_str()) {
            (Method::Get, "/api/dashboard") => reply(
                200,
                json!({
                    "processed_24h": st.processed_24h,
                    "processed_1h": 3,
                    "rejected_16h": 1,
                    "active_node": "node-a",
                    "rejected_last_100": st.rejected,
                }),
            ),
            (Method::Get, "/api/config") => {
                let domains: Vec<Value> = st.domains.iter().map(|d| json!({"domain": d})).collect();
                reply(
                    200,
                    json!({
                        "mode": "standalone",
                        "domains": domains,
                        "routes": st.routes,
                        "latest_version": st.version,
                    }),
                )
            }
            (Method::Post, "/api/domains") => {
                let domain = text("domain");
                if st.domains.contains(&domain) {
                    return detail(400, "domain already exists");
                }
                st.domains.push(domain);
                st.version += 1;
                reply(200, json!({"status": "saved", "version": st.version}))
            }
            (Method::Post, "/api/routes") => {
                st.routes.push(body.clone());
                st.version += 1;
                reply(200, json!({"status": "saved", "version": st.version}))
            }
            (Method::Post, "/api/config/test") => reply(200, json!({"ok": true})),
            (Method::Post, "/api/config/apply") => reply(200, json!({"status": "applied"})),
            (Method::Get, "/api/cluster/settings") => {
                let mut v = st.cluster.clone();
                v["has_tls"] = json!(st.has_tls);
                v["has_ssh_key"] = json!(st.has_ssh_key);
                reply(200, v)
            }
            (Method::Post, "/api/cluster/settings") => {
                for key in [
                    "node_id",
                    "node_ip",
                    "peer_node_ip",
                    "vip_address",
                    "vrrp_priority",
                    "cluster_mode",
                    "master_api_url",
                    "master_api_token",
                    "peer_ssh_user",
                ] {
                    if let Some(v) = body.get(key) {
                        st.cluster[key] = v.clone();
                    }
                }
                match body.get("tls_crt") {
                    Some(Value::String(_)) => st.has_tls = true,
                    Some(Value::Null) => st.has_tls = false,
                    _ => {}
                }
                match body.get("ssh_private_key") {
                    Some(Value::String(_)) => st.has_ssh_key = true,
                    Some(Value::Null) => st.has_ssh_key = false,
                    _ => {}
                }
                reply(200, json!({"status": "saved"}))
            }
            (Method::Post, "/api/cluster/test-peer") => {
                if st.hang_peer_test {
                    return Err(TransportError::TimedOut(req.timeout));
                }
                reply(200, json!({"ok": true, "peer": "10.0.0.12"}))
            }
            (Method::Get, "/api/mail/search") => reply(200, Value::Array(st.mail.clone())),
            (Method::Get, "/api/users") => {
                let users: Vec<Value> = st.users.iter().map(user_json).collect();
                reply(200, Value::Array(users))
            }
            (Method::Post, "/api/users") => {
                let username = text("username");
                if st.users.iter().any(|u| u.username == username) {
                    return detail(400, "username already exists");
                }
                let id = st.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
                let user = User {
                    id,
                    username,
                    password: text("password"),
                    role: text("role"),
                    must_change_password: true,
                };
                let out = user_json(&user);
                st.users.push(user);
                reply(200, out)
            }
            (Method::Patch, path) if path.starts_with("/api/users/") => {
                let id: i64 = path.trim_start_matches("/api/users/").parse().unwrap_or(-1);
                let role = text("role");
                let must_change = body.get("must_change_password").and_then(Value::as_bool);
                let password = body.get("password").and_then(Value::as_str).map(str::to_string);
                let Some(user) = st.users.iter_mut().find(|u| u.id == id) else {
                    return detail(404, "user not found");
                };
                user.role = role;
                if let Some(flag) = must_change {
                    user.must_change_password = flag;
                }
                if let Some(p) = password {
                    user.password = p;
                }
                let out = user_json(user);
                reply(200, out)
            }
            (Method::Post, "/api/change-password") => {
                if text("old_password") != "Admin123" {
                    return detail(400, "invalid old password");
                }
                reply(200, json!({"status": "ok"}))
            }
            _ => detail(404, "Not Found"),
        }
    }
}
