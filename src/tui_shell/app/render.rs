use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::views::ScreenModel;

use super::super::{modal, views};
use super::*;

pub(super) fn draw(frame: &mut ratatui::Frame, app: &App, model: &ScreenModel) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(if app.suggestions.is_empty() { 0 } else { 9 }),
            Constraint::Length(3),
        ])
        .split(area);

    // Header
    let mut spans = vec![
        Span::styled(
            " Relay Admin ",
            Style::default().fg(Color::Black).bg(Color::White),
        ),
        Span::raw("  "),
    ];
    match model {
        ScreenModel::Login(login) => {
            spans.push(Span::raw(parse_utils::server_label(&login.server)));
            spans.push(Span::raw("  "));
            spans.push(Span::styled("not logged in", Style::default().fg(Color::Gray)));
        }
        ScreenModel::Main(main) => {
            spans.push(Span::raw(parse_utils::server_label(&main.server)));
            if let Some(role) = app.core.state().role {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(role.to_string(), Style::default().fg(Color::Green)));
            }
            if let Some(banner) = &main.banner {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    format!("offline: {}", banner),
                    Style::default().fg(Color::White).bg(Color::Red),
                ));
            }
        }
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    views::draw_screen(frame, chunks[1], model, &app.updated_at, app.settings_selected);

    // Last command and local feedback
    {
        let mut lines = Vec::new();
        if let Some(cmd) = &app.last_command {
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::raw(cmd.as_str()),
            ]));
        }
        if let Some(r) = &app.last_result {
            let style = match r.kind {
                EntryKind::Output => Style::default().fg(Color::White),
                EntryKind::Error => Style::default().fg(Color::Red),
            };
            for (i, l) in r.lines.iter().enumerate() {
                if i == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", fmt_ts_ui(&r.ts)),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(l.as_str(), style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(l.as_str(), style)));
                }
            }
        }
        if lines.is_empty() {
            lines.push(Line::from(""));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::TOP).title("Last")),
            chunks[2],
        );
    }

    // Suggestions
    if !app.suggestions.is_empty() {
        let mut s_lines = Vec::new();
        let total = app.suggestions.len();
        let sel_idx = app.suggestion_selected.min(total.saturating_sub(1));
        s_lines.push(Line::from(Span::styled(
            format!("Suggestions {}/{}", sel_idx + 1, total),
            Style::default().fg(Color::Gray),
        )));

        // Keep the selection inside the visible window.
        let inner_h = chunks[3].height.saturating_sub(2) as usize;
        let max_items = inner_h.saturating_sub(1).max(1);
        let mut start = 0usize;
        if total > max_items && sel_idx >= max_items {
            start = (sel_idx + 1 - max_items).min(total - max_items);
        }
        let end = (start + max_items).min(total);

        for (i, s) in app.suggestions.iter().enumerate().take(end).skip(start) {
            let style = if i == sel_idx {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            s_lines.push(Line::from(vec![
                Span::styled(format!("{: <10}", s.name), style.fg(Color::Yellow)),
                Span::styled(s.usage, style.fg(Color::White)),
                Span::styled(format!("  {}", s.help), style.fg(Color::Gray)),
            ]));
        }
        let sugg =
            Paragraph::new(s_lines).block(Block::default().borders(Borders::TOP | Borders::BOTTOM));
        frame.render_widget(sugg, chunks[3]);
    }

    // Input
    let prompt = app.prompt();
    let mut input_spans = vec![
        Span::styled(prompt, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(app.input.buf.as_str()),
    ];
    if app.input.buf.is_empty() {
        input_spans.push(Span::styled(
            input_hint(app),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        ));
    }
    let input = Paragraph::new(Line::from(input_spans)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(input, chunks[4]);

    if let Some(m) = &app.modal {
        dim_frame(frame);
        modal::draw_modal(frame, m);
        return;
    }

    let x = u16::try_from(prompt.len() + 1 + app.input.cursor).unwrap_or(u16::MAX);
    let y = chunks[4].y + 1;
    frame.set_cursor_position((chunks[4].x.saturating_add(x), y));
}

fn input_hint(app: &App) -> &'static str {
    if app.core.state().screen == Screen::Login {
        "Enter: log in   q: quit"
    } else if app.settings_open() {
        "Up/Down: field   Enter: edit   save   peer   Esc: close"
    } else {
        "Tab: next tab   Enter: refresh   help   q: quit"
    }
}

fn dim_frame(frame: &mut ratatui::Frame) {
    let area = frame.area();
    let buf = frame.buffer_mut();
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.modifier |= Modifier::DIM;
            }
        }
    }
}
