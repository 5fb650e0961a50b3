//! In-memory mail relay appliance for local development and integration
//! tests. Speaks the same JSON API as the real appliance.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Extension, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use clap::Parser;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use relay_admin::model::Role;

#[path = "relay_admin_stub/types.rs"]
mod types;
use self::types::*;
#[path = "relay_admin_stub/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "relay_admin_stub/identity.rs"]
mod identity;
use self::identity::*;
#[path = "relay_admin_stub/seed.rs"]
mod seed;
#[path = "relay_admin_stub/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "relay_admin_stub/handlers_relay.rs"]
mod handlers_relay;
use self::handlers_relay::*;
#[path = "relay_admin_stub/handlers_cluster.rs"]
mod handlers_cluster;
use self::handlers_cluster::*;
#[path = "relay_admin_stub/handlers_mail.rs"]
mod handlers_mail;
use self::handlers_mail::*;
#[path = "relay_admin_stub/handlers_users.rs"]
mod handlers_users;
use self::handlers_users::*;
#[path = "relay_admin_stub/routes.rs"]
mod routes;
#[path = "relay_admin_stub/runtime.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
