use crate::model::{NewRoute, Role};
use crate::state::{Screen, Tab};

use super::parse_utils::{parse_search_args, parse_yes_no, tokenize};
use super::*;

const DEFAULT_SMTP_PORT: u16 = 25;

impl App {
    pub(super) fn run_current_input(&mut self) {
        let line = self.input.buf.trim().to_string();
        if line.is_empty() {
            return;
        }

        self.input.push_history(&line);
        self.last_command = Some(format!("{} {}", self.prompt(), line));
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_selected = 0;

        let line = line.strip_prefix('/').unwrap_or(&line).trim();
        let tokens = match tokenize(line) {
            Ok(t) => t,
            Err(err) => {
                self.push_error(format!("parse error: {}", err));
                return;
            }
        };
        if tokens.is_empty() {
            return;
        }

        let Some(cmd) = self.resolve_command(&tokens[0]) else {
            self.push_error(format!("unknown command: {} (try 'help')", tokens[0]));
            return;
        };
        let args = &tokens[1..];

        match cmd {
            "help" => self.show_help(),
            "quit" => self.quit = true,
            "login" => self.start_login(args.first().cloned()),
            _ if self.core.state().screen == Screen::Login => {
                self.push_error("log in first".to_string());
            }
            "refresh" => self.core.refresh(),
            "passwd" => self.start_passwd(),
            "clear" => {
                self.core.clear_output();
                self.last_result = None;
            }
            "logout" => {
                self.core.logout();
                self.push_output(vec!["logged out".to_string()]);
            }
            _ if self.settings_open() => self.run_settings_command(cmd, args),
            "tab" => self.cmd_tab(args),
            "settings" => {
                self.settings_selected = 0;
                self.core.open_settings();
            }
            "domain" => self.cmd_domain(args),
            "route" => self.cmd_route(args),
            "test" => self.core.test_config(),
            "apply" => self.core.apply_config(),
            "search" => match parse_search_args(args) {
                Ok(filters) => {
                    if self.core.state().tab != Tab::Mail {
                        self.core.select_tab(Tab::Mail);
                    }
                    self.core.search(filters);
                }
                Err(err) => self.push_error(format!("search: {:#}", err)),
            },
            "export" => self.cmd_export(args),
            "user" => self.cmd_user(args),
            other => self.push_error(format!("unhandled command: {}", other)),
        }
    }

    /// Exact name, then alias, then an unambiguous prefix.
    fn resolve_command(&self, token: &str) -> Option<&'static str> {
        let token = token.to_lowercase();
        let defs = self.available_command_defs();
        if let Some(d) = defs.iter().find(|d| d.name == token) {
            return Some(d.name);
        }
        if let Some(d) = defs.iter().find(|d| d.aliases.iter().any(|&a| a == token)) {
            return Some(d.name);
        }
        let mut matches = defs.iter().filter(|d| d.name.starts_with(&token));
        match (matches.next(), matches.next()) {
            (Some(d), None) => Some(d.name),
            _ => None,
        }
    }

    fn show_help(&mut self) {
        let defs = self.available_command_defs();
        let width = defs.iter().map(|d| d.usage.len()).max().unwrap_or(0);
        let mut lines: Vec<String> = defs
            .iter()
            .map(|d| format!("{:<width$}  {}", d.usage, d.help, width = width))
            .collect();
        lines.push(String::new());
        match self.core.state().screen {
            Screen::Login => lines.push("Enter on an empty line starts the login prompt.".into()),
            Screen::Main if self.settings_open() => lines.push(
                "Up/Down select a field, Enter edits it, Esc closes settings.".into(),
            ),
            Screen::Main => {
                lines.push("Tab / Shift-Tab switch tabs; Esc on an empty line quits.".into())
            }
        }
        self.open_modal(Modal::viewer("Help", lines));
    }

    fn cmd_tab(&mut self, args: &[String]) {
        let tab = match args.first() {
            None => self.core.state().tab.next(),
            Some(name) => match name.parse::<Tab>() {
                Ok(t) => t,
                Err(err) => {
                    self.push_error(err);
                    return;
                }
            },
        };
        self.core.select_tab(tab);
    }

    fn cmd_domain(&mut self, args: &[String]) {
        match args {
            [sub, domain] if sub == "add" && !domain.trim().is_empty() => {
                self.core.add_domain(domain.trim());
            }
            _ => self.push_error("usage: domain add <domain>".to_string()),
        }
    }

    fn cmd_route(&mut self, args: &[String]) {
        let usage = "usage: route add <sender_domain> <host> [port] [auth_user] [auth_password]";
        let [sub, sender, host, rest @ ..] = args else {
            self.push_error(usage.to_string());
            return;
        };
        if sub != "add" || rest.len() > 3 {
            self.push_error(usage.to_string());
            return;
        }
        let port = match rest.first() {
            None => DEFAULT_SMTP_PORT,
            Some(p) => match p.parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => {
                    self.push_error(format!("route: invalid port '{}'", p));
                    return;
                }
            },
        };
        let route = NewRoute::new(sender, host, port)
            .with_auth(rest.get(1).cloned(), rest.get(2).cloned());
        self.core.add_route(&route);
    }

    fn cmd_export(&mut self, args: &[String]) {
        let hours = args.first().map(String::as_str).unwrap_or("");
        let url = self.core.export_csv_url(hours);
        match open::that(&url) {
            Ok(()) => self.push_output(vec![format!("opened {}", url)]),
            Err(err) => {
                tracing::warn!("open browser: {}", err);
                self.push_error(format!("could not open a browser ({}); export URL: {}", err, url));
            }
        }
    }

    fn cmd_user(&mut self, args: &[String]) {
        let usage =
            "usage: user add <username> <role> | user update <id> <role> [must-change yes|no]";
        let wizard = match args {
            [sub, username, role] if sub == "add" => match role.parse::<Role>() {
                Ok(role) => UserWizard::Create {
                    username: username.trim().to_string(),
                    role,
                },
                Err(err) => {
                    self.push_error(err);
                    return;
                }
            },
            [sub, id, role, rest @ ..] if sub == "update" && rest.len() <= 1 => {
                let Ok(id) = id.parse::<i64>() else {
                    self.push_error(format!("user: invalid id '{}'", id));
                    return;
                };
                let role = match role.parse::<Role>() {
                    Ok(r) => r,
                    Err(err) => {
                        self.push_error(err);
                        return;
                    }
                };
                let must_change_password = match rest.first().map(|s| parse_yes_no(s)) {
                    None => false,
                    Some(Ok(v)) => v,
                    Some(Err(err)) => {
                        self.push_error(format!("user: {:#}", err));
                        return;
                    }
                };
                UserWizard::Update {
                    id,
                    role,
                    must_change_password,
                }
            }
            _ => {
                self.push_error(usage.to_string());
                return;
            }
        };

        if self.core.state().tab != Tab::Users {
            self.core.select_tab(Tab::Users);
        }
        self.start_user_password(wizard);
    }
}
