use anyhow::Result;

use crate::model::MailSearch;

pub(super) fn tokenize(input: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut escape = false;

    for ch in input.chars() {
        if escape {
            cur.push(ch);
            escape = false;
            continue;
        }

        match ch {
            '\\' => {
                escape = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !cur.is_empty() || quoted {
                    out.push(std::mem::take(&mut cur));
                }
                quoted = false;
            }
            c => {
                cur.push(c);
            }
        }
    }

    if escape {
        anyhow::bail!("dangling escape");
    }
    if in_quotes {
        anyhow::bail!("unterminated quote");
    }
    if !cur.is_empty() || quoted {
        out.push(cur);
    }
    Ok(out)
}

/// `key=value` filters for a mail search. Unlisted filters stay blank.
pub(super) fn parse_search_args(args: &[String]) -> Result<MailSearch> {
    let mut search = MailSearch::default();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            anyhow::bail!("expected key=value, got '{}'", arg);
        };
        if !search.set(&key.trim().to_lowercase(), value) {
            anyhow::bail!(
                "unknown filter '{}' (sender, recipient, ip, target, status, hours)",
                key
            );
        }
    }
    Ok(search)
}

pub(super) fn parse_yes_no(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "0" | "off" => Ok(false),
        other => anyhow::bail!("expected yes or no, got '{}'", other),
    }
}

pub(super) fn server_label(base_url: &str) -> String {
    let s = base_url.trim_end_matches('/');
    s.strip_prefix("https://")
        .or_else(|| s.strip_prefix("http://"))
        .unwrap_or(s)
        .to_string()
}

#[cfg(test)]
#[path = "../../tests/tui_shell/app/parse_utils_tests.rs"]
mod tests;
