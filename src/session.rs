//! Durable storage for the single operator session: the token plus the role
//! and password-change flag the login reported.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Role;

const SESSION_VERSION: u32 = 1;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    version: u32,

    #[serde(default)]
    token: Option<String>,

    #[serde(default)]
    role: Option<Role>,

    #[serde(default)]
    must_change_password: bool,
}

/// Holds the bearer token. One per process; file-backed unless ephemeral.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    token: Option<String>,
    role: Option<Role>,
    must_change_password: bool,
}

impl SessionStore {
    /// Opens the session file. A missing or unreadable file means "logged out".
    pub fn open(path: &Path) -> Self {
        let file = match read_session_file(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring session file: {:#}", err);
                SessionFile::default()
            }
        };
        let token = file.token.filter(|t| !t.is_empty());
        // Identity without a token belongs to nobody.
        let (role, must_change_password) = match token {
            Some(_) => (file.role, file.must_change_password),
            None => (None, false),
        };
        Self {
            path: Some(path.to_path_buf()),
            token,
            role,
            must_change_password,
        }
    }

    /// In-memory store; nothing survives the process.
    pub fn ephemeral() -> Self {
        Self {
            path: None,
            token: None,
            role: None,
            must_change_password: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn must_change_password(&self) -> bool {
        self.must_change_password
    }

    /// Stores a fresh token. Any identity of the previous token is dropped.
    pub fn set(&mut self, token: &str) -> Result<()> {
        self.token = Some(token.to_string());
        self.role = None;
        self.must_change_password = false;
        self.persist()
    }

    /// Stores a token together with what the login said about its owner.
    pub fn set_login(
        &mut self,
        token: &str,
        role: Option<Role>,
        must_change_password: bool,
    ) -> Result<()> {
        self.token = Some(token.to_string());
        self.role = role;
        self.must_change_password = must_change_password;
        self.persist()
    }

    pub fn mark_password_changed(&mut self) -> Result<()> {
        if !self.must_change_password {
            return Ok(());
        }
        self.must_change_password = false;
        self.persist()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.token = None;
        self.role = None;
        self.must_change_password = false;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file = SessionFile {
            version: SESSION_VERSION,
            token: self.token.clone(),
            role: self.role,
            must_change_password: self.must_change_password,
        };
        let bytes = serde_json::to_vec_pretty(&file).context("serialize session")?;
        write_atomic(path, &bytes).with_context(|| format!("write {}", path.display()))
    }
}

fn read_session_file(path: &Path) -> Result<SessionFile> {
    if !path.exists() {
        return Ok(SessionFile::default());
    }
    let bytes = fs::read(path).context("read session file")?;
    let file: SessionFile = serde_json::from_slice(&bytes).context("parse session file")?;
    if file.version != SESSION_VERSION {
        anyhow::bail!("unsupported session file version {}", file.version);
    }
    Ok(file)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
