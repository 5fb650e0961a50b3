use std::sync::OnceLock;

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

fn ts_ui_format() -> Option<&'static [FormatItem<'static>]> {
    static FMT: OnceLock<Option<Vec<FormatItem<'static>>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month repr:numerical padding:zero]-[day padding:zero] [hour padding:zero]:[minute padding:zero]:[second padding:zero]Z",
        )
        .ok()
    })
    .as_deref()
}

pub(in crate::tui_shell) fn fmt_ts_ui(ts: &str) -> String {
    let parsed = OffsetDateTime::parse(ts, &Rfc3339).ok();
    match (parsed, ts_ui_format()) {
        (Some(dt), Some(fmt)) => dt.format(fmt).unwrap_or_else(|_| ts.to_string()),
        _ => ts.to_string(),
    }
}

pub(in crate::tui_shell) fn now_ts() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}
