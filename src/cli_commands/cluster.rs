use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub(crate) enum ClusterCommands {
    /// Show cluster and node settings
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Change settings and save them
    Set(ClusterSetArgs),

    /// Print the VIP suggested for a node IP
    SuggestVip {
        /// Node IP (defaults to the one stored on the appliance)
        node_ip: Option<String>,
    },

    /// Test connectivity to the peer node
    TestPeer,
}

#[derive(Args)]
pub(crate) struct ClusterSetArgs {
    /// field=value pairs; secret values accept @path to read a file
    #[arg(value_name = "FIELD=VALUE")]
    pub(crate) assignments: Vec<String>,

    /// Remove a stored secret (tls_crt, tls_key, ssh_private_key, ssh_known_hosts)
    #[arg(long = "clear", value_name = "FIELD")]
    pub(crate) clear: Vec<String>,

    /// Fill vip_address from the node IP after applying assignments
    #[arg(long)]
    pub(crate) suggest_vip: bool,
}
