use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use crate::views::{SettingsModel, SettingsRow};

const LABEL_WIDTH: usize = 26;

/// Overlay drawn on top of the tab body.
pub(super) fn draw_settings(
    frame: &mut ratatui::Frame,
    area: Rect,
    model: &SettingsModel,
    selected: usize,
) {
    let w = area.width.saturating_sub(4).clamp(30, 100);
    let h = area.height.saturating_sub(2).clamp(8, 26);
    let box_area = Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    };
    frame.render_widget(Clear, box_area);

    let title = if model.dirty {
        "Cluster settings (unsaved changes)"
    } else {
        "Cluster settings"
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(Color::Yellow)));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let mut state = ListState::default();
    if !model.rows.is_empty() {
        state.select(Some(selected.min(model.rows.len() - 1)));
    }
    let items: Vec<ListItem> = model.rows.iter().map(row_item).collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::BOTTOM))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, parts[0], &mut state);

    let footer = vec![
        Line::from(vec![
            Span::styled("TLS ", Style::default().fg(Color::Gray)),
            Span::raw(model.tls_status),
            Span::styled("   SSH key ", Style::default().fg(Color::Gray)),
            Span::raw(model.ssh_status),
            Span::styled("   suggested VIP ", Style::default().fg(Color::Gray)),
            Span::raw(model.suggested_vip.as_str()),
        ]),
        Line::from(Span::styled(
            "set <field> <value>   unset <secret>   mode   vip   save   peer   close",
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: false }), parts[1]);
}

fn row_item(row: &SettingsRow) -> ListItem<'static> {
    let label_style = if row.inert {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value_style = match (row.inert, row.secret) {
        (true, _) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        (false, true) => Style::default().fg(Color::Magenta),
        (false, false) => Style::default().fg(Color::White),
    };
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<width$}", row.label, width = LABEL_WIDTH),
            label_style,
        ),
        Span::styled(row.value.clone(), value_style),
    ]))
}
