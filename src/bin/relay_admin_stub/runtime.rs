use super::*;

#[derive(Parser)]
#[command(name = "relay-admin-stub")]
#[command(about = "In-memory mail relay appliance (development)", long_about = None)]
pub(super) struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub(super) addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    pub(super) addr_file: Option<PathBuf>,

    /// Seeded admin account
    #[arg(long, default_value = "admin")]
    pub(super) admin_user: String,

    /// Password of the seeded admin account (must be changed at first login)
    #[arg(long, default_value = "Admin123")]
    pub(super) admin_password: String,

    /// Delay before the peer connectivity check answers
    #[arg(long, default_value_t = 0)]
    pub(super) peer_delay_ms: u64,

    /// Start without sample cluster settings and mail log entries
    #[arg(long)]
    pub(super) no_seed: bool,
}

pub(super) async fn run() -> Result<()> {
    let args = Args::parse();
    let filter = std::env::var("RELAY_ADMIN_LOG").unwrap_or_else(|_| "info".to_string());
    relay_admin::logging::init_stderr(&filter);

    let state = Arc::new(seed::initial_state(
        &args.admin_user,
        &args.admin_password,
        Duration::from_millis(args.peer_delay_ms),
        !args.no_seed,
    ));

    let app = routes::build_app_router(state);
    let listener = bind_listener(args.addr).await?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("relay-admin-stub listening on {}", local_addr);
    maybe_write_addr_file(args.addr_file.as_ref(), local_addr)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn bind_listener(addr: SocketAddr) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))
}

fn maybe_write_addr_file(addr_file: Option<&PathBuf>, local_addr: SocketAddr) -> Result<()> {
    if let Some(addr_file) = addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
