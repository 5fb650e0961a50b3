use relay_admin::model::MailSearch;
use relay_admin::views::{Table, fmt_timestamp};

use crate::cli_commands::mail::MailSearchArgs;

use super::*;

pub(super) fn handle_mail_command(api: &mut ApiClient, command: MailCommands) -> Result<()> {
    match command {
        MailCommands::Search(args) => {
            let json = args.json;
            let filters = search_from_args(args);
            let rows = api.search_mail(&filters).context("search mail")?;
            if json {
                return print_json(&rows);
            }

            let mut table = Table::new(&["Time", "Sender", "Recipient", "IP", "Status", "Target", "TLS"]);
            let dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
            for ev in &rows {
                table.rows.push(vec![
                    fmt_timestamp(&ev.timestamp),
                    dash(&ev.sender),
                    dash(&ev.recipient),
                    dash(&ev.ip),
                    dash(&ev.status),
                    dash(&ev.target),
                    if ev.tls { "yes" } else { "no" }.to_string(),
                ]);
            }
            print_table(
                &table,
                &format!("No results in the last {}h", filters.effective_hours()),
            );
        }
        MailCommands::ExportUrl { hours, open } => {
            let url = api.export_csv_url(hours.as_deref().unwrap_or(""));
            println!("{}", url);
            if open {
                open::that(&url).with_context(|| format!("open {}", url))?;
            }
        }
    }
    Ok(())
}

fn search_from_args(args: MailSearchArgs) -> MailSearch {
    MailSearch {
        sender: args.sender.unwrap_or_default(),
        recipient: args.recipient.unwrap_or_default(),
        ip: args.ip.unwrap_or_default(),
        target: args.target.unwrap_or_default(),
        status: args.status.unwrap_or_default(),
        hours: args.hours.unwrap_or_default(),
    }
}
