#[derive(Clone, Copy, Debug)]
pub(in crate::tui_shell) struct CommandDef {
    pub(in crate::tui_shell) name: &'static str,
    pub(in crate::tui_shell) aliases: &'static [&'static str],
    pub(in crate::tui_shell) usage: &'static str,
    pub(in crate::tui_shell) help: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum EntryKind {
    Output,
    Error,
}

/// Local feedback that never touches the appliance: parse errors, hints,
/// the CSV link.
#[derive(Clone, Debug)]
pub(super) struct LastResult {
    pub(super) ts: String,
    pub(super) kind: EntryKind,
    pub(super) lines: Vec<String>,
}
