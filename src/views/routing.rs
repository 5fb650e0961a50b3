use crate::model::RelayConfig;

use super::{Table, or_dash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutingModel {
    pub version: String,
    pub mode: String,
    pub domains: Vec<String>,
    pub routes: Table,
}

pub fn build_routing(config: &RelayConfig) -> RoutingModel {
    let mut routes = Table::new(&["Sender domain", "Target", "TLS", "Auth"]);
    for r in &config.routes {
        routes.rows.push(vec![
            r.sender_domain.clone(),
            format!("{}:{}", r.target_host, r.target_port),
            format!(
                "{}{}",
                r.tls_mode.as_str(),
                if r.tls_verify { " (verify)" } else { "" }
            ),
            or_dash(r.auth_username.as_deref()),
        ]);
    }

    RoutingModel {
        version: format!("v{}", config.latest_version),
        mode: or_dash(config.mode.as_deref()),
        domains: config.domains.iter().map(|d| d.domain.clone()).collect(),
        routes,
    }
}
