use crate::state::ViewState;

use super::{Table, fmt_timestamp, or_dash};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailModel {
    /// Filters of the last search, blanks included.
    pub filters: Vec<(&'static str, String)>,
    pub rows: Table,
    pub empty_note: &'static str,
}

pub fn build_mail(state: &ViewState) -> MailModel {
    let mut rows = Table::new(&[
        "Time",
        "Sender",
        "Recipient",
        "IP",
        "Status",
        "Target",
        "TLS",
    ]);
    for ev in &state.mail_rows {
        rows.rows.push(vec![
            fmt_timestamp(&ev.timestamp),
            or_dash(ev.sender.as_deref()),
            or_dash(ev.recipient.as_deref()),
            or_dash(ev.ip.as_deref()),
            or_dash(ev.status.as_deref()),
            or_dash(ev.target.as_deref()),
            if ev.tls { "yes" } else { "no" }.to_string(),
        ]);
    }

    MailModel {
        filters: state.last_search.query_pairs(),
        rows,
        empty_note: "no results; run 'search' with filters (hours defaults to 24)",
    }
}
