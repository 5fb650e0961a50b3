use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use relay_admin::model::{DEFAULT_SEARCH_HOURS, DashboardSnapshot, MailEvent};

use super::*;

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(super) struct SearchQuery {
    sender: String,
    recipient: String,
    ip: String,
    target: String,
    status: String,
    hours: String,
}

pub(super) async fn dashboard(State(state): State<Arc<AppState>>) -> Json<Value> {
    let now = OffsetDateTime::now_utc();
    let mail = state.mail.read().await;
    let node_id = state.cluster.read().await.node_id.clone();

    let within = |ev: &MailEvent, hours: i64| is_within(ev, now, hours);
    let snap = DashboardSnapshot {
        processed_24h: mail.delivered.iter().filter(|e| within(e, 24)).count() as u64,
        processed_1h: mail.delivered.iter().filter(|e| within(e, 1)).count() as u64,
        rejected_16h: mail.rejected.iter().filter(|e| within(e, 16)).count() as u64,
        queue_size: 0,
        active_node: Some(node_id).filter(|n| !n.is_empty()),
        rejected_last_100: Vec::new(),
    };

    let mut rejected: Vec<&MailEvent> = mail.rejected.iter().collect();
    rejected.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    let rejected: Vec<Value> = rejected
        .into_iter()
        .take(100)
        .map(|e| {
            json!({
                "sender": e.sender,
                "recipient": e.recipient,
                "reason": e.reason,
                "created_at": e.timestamp,
            })
        })
        .collect();

    let mut body = serde_json::to_value(&snap).unwrap_or_else(|_| json!({}));
    body["rejected_last_100"] = Value::Array(rejected);
    Json(body)
}

pub(super) async fn search_mail(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<MailEvent>>, Response> {
    let hours = parse_hours(&q.hours)?;
    let now = OffsetDateTime::now_utc();
    let mail = state.mail.read().await;

    let mut rows: Vec<MailEvent> = mail
        .delivered
        .iter()
        .filter(|e| is_within(e, now, hours))
        .filter(|e| matches(e.sender.as_deref(), &q.sender))
        .filter(|e| matches(e.recipient.as_deref(), &q.recipient))
        .filter(|e| matches(e.ip.as_deref(), &q.ip))
        .filter(|e| matches(e.target.as_deref(), &q.target))
        .filter(|e| matches(e.status.as_deref(), &q.status))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(Json(rows))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub(super) struct ExportQuery {
    hours: String,
}

pub(super) async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ExportQuery>,
) -> Result<Response, Response> {
    let hours = parse_hours(&q.hours)?;
    let now = OffsetDateTime::now_utc();
    let mail = state.mail.read().await;

    let mut out = String::from("timestamp,sender,recipient,ip,status,target,tls\n");
    for e in mail.delivered.iter().filter(|e| is_within(e, now, hours)) {
        let cells = [
            e.timestamp.as_str(),
            e.sender.as_deref().unwrap_or(""),
            e.recipient.as_deref().unwrap_or(""),
            e.ip.as_deref().unwrap_or(""),
            e.status.as_deref().unwrap_or(""),
            e.target.as_deref().unwrap_or(""),
            if e.tls { "true" } else { "false" },
        ];
        let line: Vec<String> = cells.iter().map(|c| csv_cell(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"mail-log.csv\""),
        ],
        out,
    )
        .into_response())
}

fn parse_hours(raw: &str) -> Result<i64, Response> {
    let raw = match raw.trim() {
        "" => DEFAULT_SEARCH_HOURS,
        h => h,
    };
    match raw.parse::<i64>() {
        Ok(h) if h > 0 => Ok(h),
        _ => Err(bad_request("hours must be a positive integer")),
    }
}

fn is_within(ev: &MailEvent, now: OffsetDateTime, hours: i64) -> bool {
    match OffsetDateTime::parse(&ev.timestamp, &Rfc3339) {
        Ok(ts) => now - ts <= time::Duration::hours(hours),
        Err(_) => false,
    }
}

/// Case-insensitive substring match; a blank filter matches everything.
fn matches(value: Option<&str>, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() {
        return true;
    }
    value.is_some_and(|v| v.to_lowercase().contains(&filter.to_lowercase()))
}

fn csv_cell(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/bin/relay_admin_stub/handlers_mail_tests.rs"]
mod tests;
