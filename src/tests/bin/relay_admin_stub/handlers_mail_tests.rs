use super::*;

fn event_at(ts: OffsetDateTime) -> MailEvent {
    MailEvent {
        timestamp: ts.format(&Rfc3339).expect("format ts"),
        ..MailEvent::default()
    }
}

#[test]
fn blank_filter_matches_and_text_filter_is_case_insensitive() {
    assert!(matches(None, ""));
    assert!(matches(None, "   "));
    assert!(matches(Some("Alice@Example.com"), "alice"));
    assert!(!matches(Some("bob@example.org"), "alice"));
    assert!(!matches(None, "alice"));
}

#[test]
fn hours_default_to_24_and_reject_garbage() {
    assert_eq!(parse_hours("").expect("default"), 24);
    assert_eq!(parse_hours(" 6 ").expect("six"), 6);
    assert!(parse_hours("0").is_err());
    assert!(parse_hours("abc").is_err());
}

#[test]
fn window_is_measured_from_now() {
    let now = OffsetDateTime::now_utc();
    assert!(is_within(&event_at(now - time::Duration::minutes(30)), now, 1));
    assert!(!is_within(&event_at(now - time::Duration::hours(2)), now, 1));
    assert!(!is_within(&MailEvent::default(), now, 24));
}

#[test]
fn csv_cells_with_separators_are_quoted() {
    assert_eq!(csv_cell("plain"), "plain");
    assert_eq!(csv_cell("a,b"), "\"a,b\"");
    assert_eq!(csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
}
