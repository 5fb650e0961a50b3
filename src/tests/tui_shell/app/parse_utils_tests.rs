use super::*;

#[test]
fn tokenize_handles_quotes_and_escapes() -> anyhow::Result<()> {
    assert_eq!(
        tokenize(r#"set reject_response_message "550 not \"here\"""#)?,
        vec!["set", "reject_response_message", r#"550 not "here""#]
    );
    assert_eq!(tokenize(r#"set node_id """#)?, vec!["set", "node_id", ""]);
    assert!(tokenize("search sender=\"x").is_err());
    assert!(tokenize("route add a\\").is_err());
    Ok(())
}

#[test]
fn search_args_fill_named_filters() -> anyhow::Result<()> {
    let args: Vec<String> = ["sender=a@b.example", "Hours=6", "to=c@d.example"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let search = parse_search_args(&args)?;
    assert_eq!(search.sender, "a@b.example");
    assert_eq!(search.recipient, "c@d.example");
    assert_eq!(search.effective_hours(), "6");
    assert!(search.ip.is_empty());

    assert!(parse_search_args(&["bogus=1".to_string()]).is_err());
    assert!(parse_search_args(&["sender".to_string()]).is_err());
    Ok(())
}

#[test]
fn yes_no_and_server_label() {
    assert!(parse_yes_no("Yes").is_ok_and(|v| v));
    assert!(parse_yes_no("off").is_ok_and(|v| !v));
    assert!(parse_yes_no("maybe").is_err());
    assert_eq!(server_label("https://relay.example:8443/"), "relay.example:8443");
    assert_eq!(server_label("relay.local"), "relay.local");
}
