use super::cluster::handle_cluster_command;
use super::mail::handle_mail_command;
use super::relay::{
    handle_config_command, handle_dashboard_command, handle_domain_command, handle_route_command,
};
use super::session::{handle_login_command, handle_logout_command, handle_passwd_command};
use super::users::handle_user_command;
use super::*;

pub(super) fn handle_command(
    api: &mut ApiClient,
    config: &ClientConfig,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::Login(args) => handle_login_command(api, &args.username, args.password)?,
        Commands::Logout => handle_logout_command(api)?,
        command => {
            require_session(api)?;
            match command {
                Commands::Passwd(args) => {
                    handle_passwd_command(api, args.old_password, args.new_password)?
                }
                Commands::Dashboard(args) => handle_dashboard_command(api, args.json)?,
                Commands::Domains { command } => handle_domain_command(api, command)?,
                Commands::Routes { command } => handle_route_command(api, command)?,
                Commands::Config { command } => handle_config_command(api, command)?,
                Commands::Cluster { command } => handle_cluster_command(api, config, command)?,
                Commands::Mail { command } => handle_mail_command(api, command)?,
                Commands::Users { command } => handle_user_command(api, command)?,
                Commands::Login(_) | Commands::Logout => {}
            }
        }
    }
    Ok(())
}
