use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::state::Screen;

use super::super::modal;
use super::*;

pub(super) fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        let model = app.core.screen_model();
        terminal
            .draw(|f| super::render::draw(f, app, &model))
            .context("draw")?;
        if app.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(50)).context("poll")? {
            match event::read().context("read event")? {
                Event::Key(k) if k.kind == KeyEventKind::Press => {
                    handle_key(app, k);
                    app.sync_core();
                }
                _ => {}
            }
        }
    }
}

pub(super) fn handle_key(app: &mut App, key: KeyEvent) {
    if app.modal.is_some() {
        modal::handle_modal_key(app, key);
        return;
    }

    let logged_in = app.core.state().screen == Screen::Main;
    let settings_open = app.settings_open();
    let empty = app.input.buf.is_empty();

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit = true;
        }

        KeyCode::Esc => {
            if !empty {
                app.input.clear();
                app.recompute_suggestions();
            } else if settings_open {
                app.core.close_settings();
            } else {
                app.quit = true;
            }
        }

        KeyCode::Tab => {
            if !empty {
                app.apply_selected_suggestion();
            } else if logged_in && !settings_open {
                let next = app.core.state().tab.next();
                app.core.select_tab(next);
            }
        }
        KeyCode::BackTab => {
            if empty && logged_in && !settings_open {
                let prev = app.core.state().tab.prev();
                app.core.select_tab(prev);
            }
        }

        KeyCode::Enter => {
            if empty {
                if !logged_in {
                    app.start_login(None);
                } else if settings_open {
                    app.edit_selected_field();
                } else {
                    app.core.refresh();
                }
                return;
            }

            if !app.suggestions.is_empty() {
                let sel = app
                    .suggestion_selected
                    .min(app.suggestions.len().saturating_sub(1));
                let cmd = app.suggestions[sel];
                let first = app
                    .input
                    .buf
                    .trim_start_matches('/')
                    .split_whitespace()
                    .next()
                    .unwrap_or("")
                    .to_lowercase();
                let exact = first == cmd.name || cmd.aliases.iter().any(|&a| a == first);
                if !exact {
                    app.apply_selected_suggestion();
                }
            }
            app.run_current_input();
        }

        KeyCode::Up => {
            if empty && settings_open {
                app.move_selection(-1);
                return;
            }
            if !app.suggestions.is_empty() {
                let n = app.suggestions.len();
                app.suggestion_selected = (app.suggestion_selected + n - 1) % n;
                return;
            }
            app.input.history_up();
            app.recompute_suggestions();
        }
        KeyCode::Down => {
            if empty && settings_open {
                app.move_selection(1);
                return;
            }
            if !app.suggestions.is_empty() {
                let n = app.suggestions.len();
                app.suggestion_selected = (app.suggestion_selected + 1) % n;
                return;
            }
            app.input.history_down();
            app.recompute_suggestions();
        }

        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Backspace => {
            app.input.backspace();
            app.recompute_suggestions();
        }
        KeyCode::Delete => {
            app.input.delete();
            app.recompute_suggestions();
        }

        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.clear();
            app.recompute_suggestions();
        }
        KeyCode::Char('p') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.history_up();
            app.recompute_suggestions();
        }
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.history_down();
            app.recompute_suggestions();
        }

        KeyCode::Char('q') if empty => {
            app.quit = true;
        }

        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.insert_char(c);
            app.recompute_suggestions();
        }

        _ => {}
    }
}
