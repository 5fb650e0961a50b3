use relay_admin::model::NewRoute;
use relay_admin::views::{build_dashboard, build_routing};

use crate::cli_commands::relay::RouteAddArgs;

use super::*;

pub(super) fn handle_dashboard_command(api: &mut ApiClient, json: bool) -> Result<()> {
    let snap = api.dashboard().context("fetch dashboard")?;
    if json {
        return print_json(&snap);
    }

    let model = build_dashboard(&snap);
    for stat in &model.stats {
        println!("{:<14} {}", stat.label, stat.value);
    }
    println!();
    println!("Rejected (last {})", model.rejected.rows.len());
    print_table(&model.rejected, "none");
    Ok(())
}

pub(super) fn handle_domain_command(api: &mut ApiClient, command: DomainCommands) -> Result<()> {
    match command {
        DomainCommands::List { json } => {
            let config = api.relay_config().context("fetch relay config")?;
            if json {
                return print_json(&config.domains);
            }
            if config.domains.is_empty() {
                println!("No relay domains");
            }
            for d in &config.domains {
                println!("{}", d.domain);
            }
        }
        DomainCommands::Add { domain } => {
            let domain = domain.trim();
            if domain.is_empty() {
                anyhow::bail!("domain is required");
            }
            let resp = api.add_domain(domain).context("add domain")?;
            print_response(&resp)?;
        }
    }
    Ok(())
}

pub(super) fn handle_route_command(api: &mut ApiClient, command: RouteCommands) -> Result<()> {
    match command {
        RouteCommands::List { json } => {
            let config = api.relay_config().context("fetch relay config")?;
            if json {
                return print_json(&config.routes);
            }
            let model = build_routing(&config);
            println!("Config {}  mode {}", model.version, model.mode);
            print_table(&model.routes, "No sender routes");
        }
        RouteCommands::Add(RouteAddArgs {
            sender_domain,
            target_host,
            port,
            auth_user,
            auth_password,
        }) => {
            if port == 0 {
                anyhow::bail!("port must be between 1 and 65535");
            }
            let route = NewRoute::new(sender_domain.trim(), target_host.trim(), port)
                .with_auth(auth_user, auth_password);
            let resp = api.add_route(&route).context("add route")?;
            print_response(&resp)?;
        }
    }
    Ok(())
}

pub(super) fn handle_config_command(api: &mut ApiClient, command: ConfigCommands) -> Result<()> {
    let resp = match command {
        ConfigCommands::Test => api.test_config().context("test config")?,
        ConfigCommands::Apply => api.apply_config().context("apply config")?,
    };
    print_response(&resp)
}
