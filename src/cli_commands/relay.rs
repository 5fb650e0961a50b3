use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum DomainCommands {
    /// List relay domains
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a relay domain
    Add { domain: String },
}

#[derive(Subcommand)]
pub(crate) enum RouteCommands {
    /// List sender routes
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a sender route (TLS opportunistic, certificate not verified)
    Add(RouteAddArgs),
}

#[derive(Args)]
pub(crate) struct RouteAddArgs {
    pub(crate) sender_domain: String,
    pub(crate) target_host: String,
    #[arg(long, default_value_t = 25)]
    pub(crate) port: u16,
    /// SMTP AUTH user for the upstream
    #[arg(long)]
    pub(crate) auth_user: Option<String>,
    /// SMTP AUTH password for the upstream
    #[arg(long)]
    pub(crate) auth_password: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Ask the appliance to validate the relay configuration
    Test,
    /// Apply the relay configuration
    Apply,
}
