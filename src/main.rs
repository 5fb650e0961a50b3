mod cli_commands;
mod cli_exec;
mod cli_runtime;

pub(crate) use cli_commands::{
    ClusterCommands, Commands, ConfigCommands, DomainCommands, MailCommands, RouteCommands,
    UserCommands,
};

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
