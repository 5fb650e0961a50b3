use crate::cluster_form::FormField;

use super::super::input::Input;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(in crate::tui_shell) enum TextInputAction {
    LoginUsername,
    LoginPassword,
    PasswdOld,
    PasswdNew,
    /// Required password for a new account.
    UserPassword,
    /// Optional replacement password; blank keeps the current one.
    UserNewPassword,
    EditField(FormField),
}

impl TextInputAction {
    pub(in crate::tui_shell) fn allows_empty(&self) -> bool {
        matches!(
            self,
            TextInputAction::UserNewPassword | TextInputAction::EditField(_)
        )
    }
}

#[derive(Clone, Debug)]
pub(in crate::tui_shell) enum ModalKind {
    Viewer,
    TextInput {
        prompt: String,
        action: TextInputAction,
        masked: bool,
    },
}

#[derive(Debug)]
pub(in crate::tui_shell) struct Modal {
    pub(in crate::tui_shell) title: String,
    pub(in crate::tui_shell) kind: ModalKind,
    pub(in crate::tui_shell) lines: Vec<String>,
    pub(in crate::tui_shell) scroll: usize,
    pub(in crate::tui_shell) input: Input,
}

impl Modal {
    pub(in crate::tui_shell) fn viewer(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            kind: ModalKind::Viewer,
            lines,
            scroll: 0,
            input: Input::default(),
        }
    }

    pub(in crate::tui_shell) fn text_input(
        title: &str,
        prompt: &str,
        action: TextInputAction,
        masked: bool,
        lines: Vec<String>,
    ) -> Self {
        Self {
            title: title.to_string(),
            kind: ModalKind::TextInput {
                prompt: prompt.to_string(),
                action,
                masked,
            },
            lines,
            scroll: 0,
            input: Input::default(),
        }
    }
}
