use clap::Args;

#[derive(Args)]
pub(crate) struct LoginArgs {
    pub(crate) username: String,
    /// Password (prompted when omitted)
    #[arg(long, env = "RELAY_ADMIN_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Args)]
pub(crate) struct PasswdArgs {
    /// Current password (prompted when omitted)
    #[arg(long)]
    pub(crate) old_password: Option<String>,
    /// New password (prompted when omitted)
    #[arg(long)]
    pub(crate) new_password: Option<String>,
}
