use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn draw_modal(frame: &mut ratatui::Frame, modal: &super::Modal) {
    let area = frame.area();
    let w = area.width.saturating_sub(6).clamp(20, 90);
    let h = area.height.saturating_sub(6).clamp(8, 22);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    let box_area = ratatui::layout::Rect {
        x,
        y,
        width: w,
        height: h,
    };

    frame.render_widget(ratatui::widgets::Clear, box_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(modal_title(modal));
    frame.render_widget(block.clone(), box_area);
    let inner = block.inner(box_area);

    let lines: Vec<Line> = modal.lines.iter().map(|s| Line::from(s.as_str())).collect();
    let scroll = modal.scroll.min(modal.lines.len().saturating_sub(1));
    let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);

    match &modal.kind {
        super::ModalKind::Viewer => {
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                inner,
            );
        }

        super::ModalKind::TextInput { prompt, masked, .. } => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(inner);

            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                parts[0],
            );

            let input_line = Line::from(vec![
                Span::styled(prompt.as_str(), Style::default().fg(Color::Yellow)),
                Span::raw(modal.input.display(*masked)),
            ]);
            frame.render_widget(
                Paragraph::new(input_line)
                    .block(Block::default().borders(Borders::ALL).title("Edit")),
                parts[1],
            );

            let x = u16::try_from(prompt.chars().count() + modal.input.cursor).unwrap_or(u16::MAX);
            let y = parts[1].y + 1;
            let x = parts[1].x.saturating_add(1).saturating_add(x);
            frame.set_cursor_position((x, y));
        }
    }
}

pub(super) fn handle_modal_key(app: &mut super::App, key: KeyEvent) {
    enum ModalAction {
        None,
        Close,
        SubmitTextInput {
            action: super::TextInputAction,
            value: String,
        },
    }

    let action = {
        let Some(m) = app.modal_mut() else {
            return;
        };

        match &mut m.kind {
            super::ModalKind::Viewer => match key.code {
                KeyCode::Esc | KeyCode::Enter => ModalAction::Close,
                KeyCode::Up => {
                    m.scroll = m.scroll.saturating_sub(1);
                    ModalAction::None
                }
                KeyCode::Down => {
                    if m.scroll < m.lines.len().saturating_sub(1) {
                        m.scroll += 1;
                    }
                    ModalAction::None
                }
                KeyCode::PageUp => {
                    m.scroll = m.scroll.saturating_sub(10);
                    ModalAction::None
                }
                KeyCode::PageDown => {
                    m.scroll = (m.scroll + 10).min(m.lines.len().saturating_sub(1));
                    ModalAction::None
                }
                _ => ModalAction::None,
            },

            super::ModalKind::TextInput { action, masked, .. } => match key.code {
                KeyCode::Esc => ModalAction::Close,
                KeyCode::Enter => {
                    // Passwords are taken as typed.
                    let raw = if *masked {
                        m.input.buf.clone()
                    } else {
                        m.input.buf.trim().to_string()
                    };
                    if raw.is_empty() && !action.allows_empty() {
                        m.lines.retain(|l| !l.starts_with("error:"));
                        m.lines.push("error: value required".to_string());
                        ModalAction::None
                    } else {
                        ModalAction::SubmitTextInput {
                            action: action.clone(),
                            value: raw,
                        }
                    }
                }
                KeyCode::Backspace => {
                    m.input.backspace();
                    ModalAction::None
                }
                KeyCode::Delete => {
                    m.input.delete();
                    ModalAction::None
                }
                KeyCode::Left => {
                    m.input.move_left();
                    ModalAction::None
                }
                KeyCode::Right => {
                    m.input.move_right();
                    ModalAction::None
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    m.input.clear();
                    ModalAction::None
                }
                KeyCode::Char(c) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT)
                    {
                        m.input.insert_char(c);
                    }
                    ModalAction::None
                }
                _ => ModalAction::None,
            },
        }
    };

    match action {
        ModalAction::None => {}
        ModalAction::Close => {
            app.close_modal();
            app.cancel_wizards();
        }
        ModalAction::SubmitTextInput { action, value } => {
            app.close_modal();
            app.submit_text_input(action, value);
        }
    }
}

fn modal_title(modal: &super::Modal) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            modal.title.as_str().to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  ".to_string()),
        Span::styled("Esc".to_string(), Style::default().fg(Color::Gray)),
    ];
    if matches!(&modal.kind, super::ModalKind::TextInput { .. }) {
        spans.push(Span::raw("  ".to_string()));
        spans.push(Span::styled(
            "Enter".to_string(),
            Style::default().fg(Color::Gray),
        ));
    }
    Line::from(spans)
}
