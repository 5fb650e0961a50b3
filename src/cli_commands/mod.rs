use clap::Subcommand;

pub(crate) mod cluster;
pub(crate) mod mail;
pub(crate) mod relay;
pub(crate) mod session;
pub(crate) mod users;

pub(crate) use self::cluster::ClusterCommands;
pub(crate) use self::mail::MailCommands;
pub(crate) use self::relay::{ConfigCommands, DomainCommands, RouteCommands};
pub(crate) use self::users::UserCommands;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in and store the session token
    Login(session::LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Change your own password
    Passwd(session::PasswdArgs),

    /// Show traffic counters and recent rejections
    Dashboard(JsonArgs),

    /// Relay domains
    Domains {
        #[command(subcommand)]
        command: DomainCommands,
    },

    /// Sender-domain routes
    Routes {
        #[command(subcommand)]
        command: RouteCommands,
    },

    /// Test or apply the relay configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Cluster and node settings
    Cluster {
        #[command(subcommand)]
        command: ClusterCommands,
    },

    /// Mail log search and CSV export
    Mail {
        #[command(subcommand)]
        command: MailCommands,
    },

    /// Operator accounts (admin)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(clap::Args)]
pub(crate) struct JsonArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
