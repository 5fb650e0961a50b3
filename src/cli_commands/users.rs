use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// List accounts
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Add {
        username: String,
        /// Admin | Operator | ReadOnly
        #[arg(long)]
        role: String,
        /// Initial password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Change an account's role, password or must-change flag
    Update {
        id: i64,
        /// Admin | Operator | ReadOnly
        #[arg(long)]
        role: String,
        /// Require a password change at next login
        #[arg(long)]
        must_change_password: bool,
        /// New password; the current one is kept when omitted
        #[arg(long)]
        password: Option<String>,
        /// Prompt for a new password
        #[arg(long, conflicts_with = "password")]
        prompt_password: bool,
    },
}
