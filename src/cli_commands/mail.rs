use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum MailCommands {
    /// Search the mail log
    Search(MailSearchArgs),

    /// Print (or open) the CSV export link
    ExportUrl {
        /// Look-back window in hours (defaults to 24)
        #[arg(long)]
        hours: Option<String>,
        /// Open the link in a browser
        #[arg(long)]
        open: bool,
    },
}

#[derive(Args)]
pub(crate) struct MailSearchArgs {
    #[arg(long)]
    pub(crate) sender: Option<String>,
    #[arg(long)]
    pub(crate) recipient: Option<String>,
    #[arg(long)]
    pub(crate) ip: Option<String>,
    #[arg(long)]
    pub(crate) target: Option<String>,
    #[arg(long)]
    pub(crate) status: Option<String>,
    /// Look-back window in hours (defaults to 24)
    #[arg(long)]
    pub(crate) hours: Option<String>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
