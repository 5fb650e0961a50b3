use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use relay_admin::model::MailEvent;

use super::*;

/// Initial appliance state: one admin account, plus sample cluster and
/// traffic data unless `with_samples` is false.
pub(super) fn initial_state(
    admin_user: &str,
    admin_password: &str,
    peer_delay: Duration,
    with_samples: bool,
) -> AppState {
    let admin = Account {
        id: 1,
        username: admin_user.to_string(),
        password_hash: hash_secret(admin_password),
        role: Role::Admin,
        must_change_password: true,
    };

    let (cluster, mail) = if with_samples {
        (sample_cluster(), sample_mail(OffsetDateTime::now_utc()))
    } else {
        (ClusterStore::default(), MailStore::default())
    };

    AppState {
        accounts: RwLock::new(vec![admin]),
        tokens: RwLock::new(Default::default()),
        relay: RwLock::new(RelayStore::default()),
        cluster: RwLock::new(cluster),
        mail: RwLock::new(mail),
        peer_delay,
    }
}

fn sample_cluster() -> ClusterStore {
    ClusterStore {
        node_id: "node-a".to_string(),
        node_ip: "10.0.0.11".to_string(),
        peer_node_ip: "10.0.0.12".to_string(),
        vip_address: "10.0.0.50".to_string(),
        ..ClusterStore::default()
    }
}

fn sample_mail(now: OffsetDateTime) -> MailStore {
    let at = |minutes_ago: i64| {
        (now - time::Duration::minutes(minutes_ago))
            .format(&Rfc3339)
            .unwrap_or_default()
    };
    let event = |minutes_ago: i64, sender: &str, recipient: &str, status: &str, tls: bool| {
        MailEvent {
            timestamp: at(minutes_ago),
            sender: Some(sender.to_string()),
            recipient: Some(recipient.to_string()),
            ip: Some("192.0.2.10".to_string()),
            status: Some(status.to_string()),
            target: Some("smtp.upstream.example:25".to_string()),
            tls,
            reason: None,
        }
    };

    let delivered = vec![
        event(10, "alice@example.com", "bob@example.org", "sent", true),
        event(95, "billing@example.com", "carol@example.net", "sent", true),
        event(30 * 60, "alice@example.com", "dave@example.org", "deferred", false),
    ];
    let rejected = vec![MailEvent {
        timestamp: at(45),
        sender: Some("spam@bad.example".to_string()),
        recipient: Some("bob@example.org".to_string()),
        ip: Some("198.51.100.7".to_string()),
        status: Some("rejected".to_string()),
        target: None,
        tls: false,
        reason: Some("sender domain not allowed".to_string()),
    }];

    MailStore {
        delivered,
        rejected,
    }
}
