use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use relay_admin::api::{ApiClient, HttpTransport};
use relay_admin::session::SessionStore;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Admin123";

pub struct StubGuard {
    pub base_url: String,
    pub dir: tempfile::TempDir,
    child: Child,
}

impl Drop for StubGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_stub() -> Result<StubGuard> {
    spawn_stub_with(&[])
}

pub fn spawn_stub_with(extra: &[&str]) -> Result<StubGuard> {
    let dir = tempfile::tempdir().context("create stub tempdir")?;
    let addr_file = dir.path().join("addr.txt");
    let addr_file_arg = addr_file.to_str().context("addr file path")?.to_string();

    let mut args = vec!["--addr", "127.0.0.1:0", "--addr-file", &addr_file_arg];
    args.extend_from_slice(extra);

    let child = Command::new(env!("CARGO_BIN_EXE_relay-admin-stub"))
        .args(&args)
        .env("RELAY_ADMIN_LOG", "warn")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn relay-admin-stub")?;

    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(StubGuard {
        base_url,
        dir,
        child,
    })
}

fn read_addr_file(addr_file: &Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("stub did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

/// Client with an in-memory session.
pub fn api_client(base_url: &str) -> Result<ApiClient> {
    let transport = HttpTransport::new(base_url, Some(Duration::from_secs(10)))?;
    Ok(ApiClient::new(Box::new(transport), SessionStore::ephemeral()))
}

#[allow(dead_code)]
pub fn admin_client(stub: &StubGuard) -> Result<ApiClient> {
    let mut api = api_client(&stub.base_url)?;
    let resp = api
        .login(ADMIN_USER, ADMIN_PASSWORD)
        .map_err(|err| anyhow::anyhow!("admin login: {}", err))?;
    api.session_mut().set(&resp.token)?;
    Ok(api)
}

#[allow(dead_code)]
pub fn session_file(stub: &StubGuard) -> PathBuf {
    stub.dir.path().join("session.json")
}

/// Runs the `relay-admin` CLI against the stub with an isolated config and
/// session file.
#[allow(dead_code)]
pub fn run_cli(stub: &StubGuard, args: &[&str]) -> Result<Output> {
    let config = stub.dir.path().join("config.json");
    Command::new(env!("CARGO_BIN_EXE_relay-admin"))
        .arg("--config")
        .arg(&config)
        .arg("--url")
        .arg(&stub.base_url)
        .arg("--session-file")
        .arg(session_file(stub))
        .args(args)
        .env("RELAY_ADMIN_LOG", "warn")
        .env_remove("RELAY_ADMIN_PASSWORD")
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("run relay-admin {:?}", args))
}

/// Like [`run_cli`], failing unless the command exits successfully.
#[allow(dead_code)]
pub fn run_cli_ok(stub: &StubGuard, args: &[&str]) -> Result<String> {
    let out = run_cli(stub, args)?;
    if !out.status.success() {
        anyhow::bail!(
            "relay-admin {:?} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            args,
            out.status,
            String::from_utf8_lossy(&out.stdout),
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}
