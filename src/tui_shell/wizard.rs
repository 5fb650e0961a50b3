use crate::model::Role;

/// Username captured while the password prompt is open.
#[derive(Clone, Debug, Default)]
pub(super) struct LoginWizard {
    pub(super) username: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub(super) struct PasswdWizard {
    pub(super) old_password: Option<String>,
}

/// Account details typed on the command line; the password arrives through a
/// masked prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum UserWizard {
    Create {
        username: String,
        role: Role,
    },
    Update {
        id: i64,
        role: Role,
        must_change_password: bool,
    },
}
