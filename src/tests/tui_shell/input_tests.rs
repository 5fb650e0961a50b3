use super::*;

#[test]
fn editing_is_char_aware() {
    let mut input = Input::default();
    for c in "héllo".chars() {
        input.insert_char(c);
    }
    input.move_left();
    input.move_left();
    input.move_left();
    input.backspace();
    assert_eq!(input.buf, "hllo");
    input.insert_char('ë');
    assert_eq!(input.buf, "hëllo");
    assert_eq!(input.cursor, 2);
    input.delete();
    assert_eq!(input.buf, "hëlo");
}

#[test]
fn masked_display_hides_content() {
    let mut input = Input::default();
    input.set("s3cret".to_string());
    assert_eq!(input.display(true), "******");
    assert_eq!(input.display(false), "s3cret");
    assert_eq!(input.take(), "s3cret");
    assert!(input.buf.is_empty());
    assert_eq!(input.cursor, 0);
}

#[test]
fn history_walks_back_and_forth() {
    let mut input = Input::default();
    input.push_history("tab users");
    input.push_history("tab users");
    input.push_history("refresh");
    assert_eq!(input.history.len(), 2);

    input.history_up();
    assert_eq!(input.buf, "refresh");
    input.history_up();
    assert_eq!(input.buf, "tab users");
    input.history_down();
    assert_eq!(input.buf, "refresh");
    input.history_down();
    assert!(input.buf.is_empty());
}
