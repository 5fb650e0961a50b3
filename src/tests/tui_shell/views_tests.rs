use crate::views::Table;

use super::*;

#[test]
fn column_widths_fit_content_and_cap() {
    let mut table = Table::new(&["ID", "Username"]);
    table.rows.push(vec!["12345".to_string(), "x".repeat(80)]);
    assert_eq!(column_widths(&table), vec![5, MAX_COLUMN_WIDTH]);
}

#[test]
fn box_height_saturates_on_huge_lists() {
    assert_eq!(boxed_height(0, 3, 12), 3);
    assert_eq!(boxed_height(5, 3, 12), 7);
    assert_eq!(boxed_height(70_000, 3, 10), 10);
    assert_eq!(boxed_height(usize::MAX, 3, 12), 12);
}
