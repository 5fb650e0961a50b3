//! Client configuration: optional JSON file, environment overrides, defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, HttpTransport};
use crate::app::DEFAULT_PEER_TEST_TIMEOUT;
use crate::session::SessionStore;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const ENV_URL: &str = "RELAY_ADMIN_URL";
pub const ENV_SESSION_FILE: &str = "RELAY_ADMIN_SESSION_FILE";
pub const ENV_LOG: &str = "RELAY_ADMIN_LOG";

const APP_DIR: &str = "relay-admin";

/// On-disk shape; every field optional so a partial file is fine.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub persist_session: Option<bool>,
    pub request_timeout_secs: Option<u64>,
    pub peer_test_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub log_filter: Option<String>,
}

/// Resolved settings for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub session_file: PathBuf,
    /// False keeps the token in memory only.
    pub persist_session: bool,
    pub request_timeout: Option<Duration>,
    pub peer_test_timeout: Duration,
    pub log_file: PathBuf,
    pub log_filter: String,
}

/// Values given on the command line; they win over everything else.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub ephemeral_session: bool,
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl ConfigFile {
    /// Reads `path`. A missing file is an empty config; a malformed one is an
    /// error.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }
}

impl ClientConfig {
    /// Loads `.env`, the config file and the environment, then applies
    /// command-line overrides.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);
        let file = ConfigFile::read(&path)?;
        Ok(Self::resolve(file, |k| std::env::var(k).ok(), overrides))
    }

    /// Precedence: overrides, then `env`, then `file`, then defaults.
    pub fn resolve(
        file: ConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Self {
        let dir = config_dir();
        let env = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env(ENV_URL))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let session_file = overrides
            .session_file
            .clone()
            .or_else(|| env(ENV_SESSION_FILE).map(PathBuf::from))
            .or(file.session_file)
            .unwrap_or_else(|| dir.join("session.json"));

        let persist_session =
            !overrides.ephemeral_session && file.persist_session.unwrap_or(true);

        let log_filter = env(ENV_LOG)
            .or(file.log_filter)
            .unwrap_or_else(|| "info".to_string());

        Self {
            base_url,
            session_file,
            persist_session,
            request_timeout: file.request_timeout_secs.map(Duration::from_secs),
            peer_test_timeout: file
                .peer_test_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_PEER_TEST_TIMEOUT),
            log_file: file
                .log_file
                .unwrap_or_else(|| dir.join("relay-admin.log")),
            log_filter,
        }
    }

    pub fn session_store(&self) -> SessionStore {
        if self.persist_session {
            SessionStore::open(&self.session_file)
        } else {
            SessionStore::ephemeral()
        }
    }

    /// HTTP client for the configured appliance, carrying the stored session.
    pub fn api_client(&self) -> Result<ApiClient> {
        let transport = HttpTransport::new(&self.base_url, self.request_timeout)?;
        Ok(ApiClient::new(Box::new(transport), self.session_store()))
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
