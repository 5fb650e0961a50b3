use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Tabs, Wrap};

use crate::views::{
    DashboardModel, LoginModel, MailModel, MainModel, OutputModel, RoutingModel, ScreenModel,
    TabBody, UsersModel,
};

use super::render_view_chrome;

mod settings;

const MAX_COLUMN_WIDTH: usize = 40;

/// Height of a bordered box holding `lines` rows, kept within `min..=max`.
fn boxed_height(lines: usize, min: u16, max: u16) -> u16 {
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .clamp(min, max)
}

pub(super) fn draw_screen(
    frame: &mut ratatui::Frame,
    area: Rect,
    model: &ScreenModel,
    updated_at: &str,
    settings_selected: usize,
) {
    match model {
        ScreenModel::Login(login) => draw_login(frame, area, login),
        ScreenModel::Main(main) => draw_main(frame, area, main, updated_at, settings_selected),
    }
}

fn draw_login(frame: &mut ratatui::Frame, area: Rect, login: &LoginModel) {
    let w = area.width.saturating_sub(4).clamp(20, 60);
    let h = 7.min(area.height);
    let box_area = Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w,
        height: h,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Appliance ", Style::default().fg(Color::Gray)),
            Span::raw(login.server.as_str()),
        ]),
        Line::from(""),
    ];
    match &login.error {
        Some(err) => lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        login.hint,
        Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Log in")),
        box_area,
    );
}

fn draw_main(
    frame: &mut ratatui::Frame,
    area: Rect,
    main: &MainModel,
    updated_at: &str,
    settings_selected: usize,
) {
    let notice_h = if main.notice.is_some() { 1 } else { 0 };
    let output_h = main
        .output
        .as_ref()
        .map(|o| boxed_height(o.lines.len(), 3, 12))
        .unwrap_or(0);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(notice_h),
            Constraint::Min(0),
            Constraint::Length(output_h),
        ])
        .split(area);

    let titles: Vec<Line> = main.tabs.iter().map(|t| Line::from(t.title)).collect();
    let selected = main.tabs.iter().position(|t| t.active).unwrap_or(0);
    frame.render_widget(
        Tabs::new(titles)
            .select(selected)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        parts[0],
    );

    if let Some(notice) = &main.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                notice.as_str(),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )),
            parts[1],
        );
    }

    let body = parts[2];
    match &main.body {
        TabBody::Dashboard(m) => draw_dashboard(frame, body, m, updated_at),
        TabBody::Mail(m) => draw_mail(frame, body, m, updated_at),
        TabBody::Routing(m) => draw_routing(frame, body, m, updated_at),
        TabBody::Users(m) => draw_users(frame, body, m, updated_at),
    }

    if let Some(out) = &main.output {
        draw_output(frame, parts[3], out);
    }

    if let Some(s) = &main.settings {
        settings::draw_settings(frame, body, s, settings_selected);
    }
}

fn draw_dashboard(frame: &mut ratatui::Frame, area: Rect, m: &DashboardModel, updated_at: &str) {
    let inner = render_view_chrome(frame, "Dashboard", updated_at, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut spans = Vec::new();
    for s in &m.stats {
        spans.push(Span::styled(
            format!("{} ", s.label),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::styled(
            s.value.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        parts[0],
    );

    draw_table(
        frame,
        parts[1],
        &m.rejected,
        "Last rejected",
        "no rejected mail",
    );
}

fn draw_mail(frame: &mut ratatui::Frame, area: Rect, m: &MailModel, updated_at: &str) {
    let inner = render_view_chrome(frame, "Mail log", updated_at, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let mut spans = vec![Span::styled("filters ", Style::default().fg(Color::Gray))];
    for (k, v) in &m.filters {
        if v.is_empty() {
            continue;
        }
        spans.push(Span::styled(format!("{}=", k), Style::default().fg(Color::Gray)));
        spans.push(Span::raw(format!("{}  ", v)));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM)),
        parts[0],
    );

    draw_table(frame, parts[1], &m.rows, "Results", m.empty_note);
}

fn draw_routing(frame: &mut ratatui::Frame, area: Rect, m: &RoutingModel, updated_at: &str) {
    let inner = render_view_chrome(frame, "Routing", updated_at, area);
    let domains_h = boxed_height(m.domains.len(), 3, 10);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(domains_h),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("config ", Style::default().fg(Color::Gray)),
            Span::raw(m.version.as_str()),
            Span::styled("   mode ", Style::default().fg(Color::Gray)),
            Span::raw(m.mode.as_str()),
        ])),
        parts[0],
    );

    let domain_lines: Vec<Line> = if m.domains.is_empty() {
        vec![Line::from(Span::styled(
            "no relay domains",
            Style::default().fg(Color::Gray),
        ))]
    } else {
        m.domains.iter().map(|d| Line::from(d.as_str())).collect()
    };
    frame.render_widget(
        Paragraph::new(domain_lines).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .title("Domains"),
        ),
        parts[1],
    );

    draw_table(frame, parts[2], &m.routes, "Sender routes", "no sender routes");
}

fn draw_users(frame: &mut ratatui::Frame, area: Rect, m: &UsersModel, updated_at: &str) {
    let inner = render_view_chrome(frame, "Users", updated_at, area);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    draw_table(frame, parts[0], &m.users, "Accounts", "no accounts");

    let hint = if m.can_manage {
        "user add <username> <role>   user update <id> <role> [must-change yes|no]"
    } else {
        "account management requires the Admin role"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(Color::Gray))),
        parts[1],
    );
}

fn draw_output(frame: &mut ratatui::Frame, area: Rect, out: &OutputModel) {
    let style = if out.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    let lines: Vec<Line> = out
        .lines
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), style)))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(out.title.as_str(), style)),
        ),
        area,
    );
}

fn draw_table(
    frame: &mut ratatui::Frame,
    area: Rect,
    table: &crate::views::Table,
    title: &str,
    empty_note: &str,
) {
    let block = Block::default().borders(Borders::TOP).title(title.to_string());
    if table.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(empty_note, Style::default().fg(Color::Gray)))
                .block(block),
            area,
        );
        return;
    }

    let widths: Vec<Constraint> = column_widths(table)
        .into_iter()
        .map(|w| Constraint::Length(w as u16))
        .collect();
    let header = Row::new(table.headers.iter().copied())
        .style(Style::default().fg(Color::Yellow));
    let rows = table.rows.iter().map(|r| Row::new(r.iter().map(String::as_str)));
    frame.render_widget(
        Table::new(rows, widths).header(header).block(block),
        area,
    );
}

fn column_widths(table: &crate::views::Table) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }
    widths.into_iter().map(|w| w.min(MAX_COLUMN_WIDTH)).collect()
}

#[cfg(test)]
#[path = "../tests/tui_shell/views_tests.rs"]
mod tests;
