use relay_admin::cluster_form::{ClusterSettingsForm, FormField, suggest_vip};
use relay_admin::model::ClusterSettings;

use crate::cli_commands::cluster::ClusterSetArgs;

use super::*;

pub(super) fn handle_cluster_command(
    api: &mut ApiClient,
    config: &ClientConfig,
    command: ClusterCommands,
) -> Result<()> {
    match command {
        ClusterCommands::Show { json } => {
            let settings = api.cluster_settings().context("fetch cluster settings")?;
            if json {
                return print_json(&settings);
            }
            print_settings(&settings);
        }
        ClusterCommands::Set(args) => handle_cluster_set(api, args)?,
        ClusterCommands::SuggestVip { node_ip } => {
            let node_ip = match node_ip {
                Some(ip) => ip,
                None => {
                    api.cluster_settings()
                        .context("fetch cluster settings")?
                        .node_ip
                }
            };
            println!("{}", suggest_vip(&node_ip));
        }
        ClusterCommands::TestPeer => match api.test_peer(config.peer_test_timeout) {
            Ok(resp) => print_response(&resp)?,
            Err(ApiError::TimedOut(_)) => anyhow::bail!(
                "peer test timed out after {}s",
                config.peer_test_timeout.as_secs()
            ),
            Err(err) => return Err(anyhow::anyhow!(err).context("test peer")),
        },
    }
    Ok(())
}

fn handle_cluster_set(api: &mut ApiClient, args: ClusterSetArgs) -> Result<()> {
    if args.assignments.is_empty() && args.clear.is_empty() && !args.suggest_vip {
        anyhow::bail!("nothing to change (give FIELD=VALUE, --clear FIELD or --suggest-vip)");
    }

    let settings = api.cluster_settings().context("fetch cluster settings")?;
    let mut form = ClusterSettingsForm::from_settings(&settings);

    for assignment in &args.assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            anyhow::bail!("expected FIELD=VALUE, got '{}'", assignment);
        };
        let field = key.trim().parse::<FormField>()?;
        form.set(field, value)?;
    }
    for key in &args.clear {
        let field = key.trim().parse::<FormField>()?;
        form.clear_secret(field)?;
    }
    if args.suggest_vip {
        let vip = form.apply_suggested_vip();
        println!("vip_address = {}", vip);
    }

    let update = form.to_update()?;
    let resp = api
        .save_cluster_settings(&update)
        .context("save cluster settings")?;
    print_response(&resp)?;
    println!("Settings saved");
    Ok(())
}

fn print_settings(s: &ClusterSettings) {
    let present = |b: bool| if b { "stored" } else { "none" };
    let opt = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let rows = [
        ("node_id", s.node_id.clone()),
        ("node_ip", s.node_ip.clone()),
        ("peer_node_ip", s.peer_node_ip.clone()),
        ("vip_address", s.vip_address.clone()),
        ("vrrp_priority", s.vrrp_priority.to_string()),
        ("cluster_mode", s.cluster_mode.as_str().to_string()),
        ("master_api_url", opt(&s.master_api_url)),
        (
            "master_api_token",
            if s.master_api_token.is_some() { "set" } else { "-" }.to_string(),
        ),
        ("peer_ssh_user", s.peer_ssh_user.clone()),
        ("reject_response_message", opt(&s.reject_response_message)),
        ("tls", present(s.has_tls).to_string()),
        ("ssh_key", present(s.has_ssh_key).to_string()),
    ];
    for (k, v) in rows {
        println!("{:<24} {}", k, v);
    }
}
