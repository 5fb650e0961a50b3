use crate::model::DashboardSnapshot;

use super::{Stat, Table, fmt_timestamp, or_dash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardModel {
    pub stats: Vec<Stat>,
    pub rejected: Table,
}

pub fn build_dashboard(snap: &DashboardSnapshot) -> DashboardModel {
    let stats = vec![
        Stat {
            label: "Processed 24h",
            value: snap.processed_24h.to_string(),
        },
        Stat {
            label: "Processed 1h",
            value: snap.processed_1h.to_string(),
        },
        Stat {
            label: "Rejected 16h",
            value: snap.rejected_16h.to_string(),
        },
        Stat {
            label: "Queue",
            value: snap.queue_size.to_string(),
        },
        Stat {
            label: "Active node",
            value: or_dash(snap.active_node.as_deref()),
        },
    ];

    let mut rejected = Table::new(&["Time", "Sender", "Recipient", "Reason"]);
    for ev in &snap.rejected_last_100 {
        rejected.rows.push(vec![
            fmt_timestamp(&ev.timestamp),
            or_dash(ev.sender.as_deref()),
            or_dash(ev.recipient.as_deref()),
            or_dash(ev.reason.as_deref().or(ev.status.as_deref())),
        ]);
    }

    DashboardModel { stats, rejected }
}
