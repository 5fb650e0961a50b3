use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

/// Bordered frame titled with the view name and when its data was fetched.
/// Returns the inner area.
pub(super) fn render_view_chrome(
    frame: &mut ratatui::Frame,
    title: &str,
    updated_at: &str,
    area: Rect,
) -> Rect {
    let header = Line::from(vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            super::fmt_ts_ui(updated_at),
            Style::default().fg(Color::Gray),
        ),
    ]);
    let outer = Block::default().borders(Borders::ALL).title(header);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);
    inner
}
