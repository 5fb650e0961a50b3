use super::CommandDef;

pub(super) fn global_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help",
            help: "Show commands",
        },
        CommandDef {
            name: "refresh",
            aliases: &["r"],
            usage: "refresh",
            help: "Re-fetch everything from the appliance",
        },
        CommandDef {
            name: "passwd",
            aliases: &[],
            usage: "passwd",
            help: "Change your password (guided prompt)",
        },
        CommandDef {
            name: "clear",
            aliases: &[],
            usage: "clear",
            help: "Clear the output panel",
        },
        CommandDef {
            name: "logout",
            aliases: &[],
            usage: "logout",
            help: "Forget the stored session token",
        },
        CommandDef {
            name: "quit",
            aliases: &["q", "exit"],
            usage: "quit",
            help: "Exit",
        },
    ]
}

pub(super) fn main_command_defs() -> Vec<CommandDef> {
    let mut out = global_command_defs();
    out.extend(vec![
        CommandDef {
            name: "tab",
            aliases: &["go"],
            usage: "tab <dashboard|mail|config|users>",
            help: "Switch tab",
        },
        CommandDef {
            name: "settings",
            aliases: &["cluster"],
            usage: "settings",
            help: "Open cluster/node settings",
        },
        CommandDef {
            name: "domain",
            aliases: &[],
            usage: "domain add <domain>",
            help: "Add a relay domain",
        },
        CommandDef {
            name: "route",
            aliases: &[],
            usage: "route add <sender_domain> <host> [port] [auth_user] [auth_password]",
            help: "Add a sender route (TLS opportunistic, no verify)",
        },
        CommandDef {
            name: "test",
            aliases: &[],
            usage: "test",
            help: "Check the relay configuration",
        },
        CommandDef {
            name: "apply",
            aliases: &[],
            usage: "apply",
            help: "Apply the relay configuration",
        },
        CommandDef {
            name: "search",
            aliases: &["find"],
            usage: "search [sender=..] [recipient=..] [ip=..] [target=..] [status=..] [hours=24]",
            help: "Search the mail log",
        },
        CommandDef {
            name: "export",
            aliases: &["csv"],
            usage: "export [hours]",
            help: "Open the CSV export in a browser",
        },
        CommandDef {
            name: "user",
            aliases: &["users"],
            usage: "user add <username> <role> | user update <id> <role> [must-change yes|no]",
            help: "Create or update an account (password prompted)",
        },
    ]);
    out
}

pub(super) fn settings_command_defs() -> Vec<CommandDef> {
    let mut out = global_command_defs();
    out.extend(vec![
        CommandDef {
            name: "set",
            aliases: &[],
            usage: "set <field> <value...>",
            help: "Edit a field; secrets accept @path to read a file",
        },
        CommandDef {
            name: "unset",
            aliases: &["clear-secret"],
            usage: "unset <tls_crt|tls_key|ssh_private_key|ssh_known_hosts>",
            help: "Remove a stored secret on save",
        },
        CommandDef {
            name: "mode",
            aliases: &[],
            usage: "mode [standalone|master|slave]",
            help: "Set or cycle the cluster mode",
        },
        CommandDef {
            name: "vip",
            aliases: &["suggest"],
            usage: "vip",
            help: "Fill the VIP from the node IP",
        },
        CommandDef {
            name: "save",
            aliases: &[],
            usage: "save",
            help: "Save cluster settings",
        },
        CommandDef {
            name: "peer",
            aliases: &["test-peer"],
            usage: "peer",
            help: "Test connectivity to the peer node",
        },
        CommandDef {
            name: "close",
            aliases: &["back"],
            usage: "close",
            help: "Close settings",
        },
    ]);
    out
}

pub(super) fn login_command_defs() -> Vec<CommandDef> {
    vec![
        CommandDef {
            name: "login",
            aliases: &["signin"],
            usage: "login [username]",
            help: "Log in (password prompted)",
        },
        CommandDef {
            name: "help",
            aliases: &["h", "?"],
            usage: "help",
            help: "Show commands",
        },
        CommandDef {
            name: "quit",
            aliases: &["q", "exit"],
            usage: "quit",
            help: "Exit",
        },
    ]
}
