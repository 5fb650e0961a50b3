use crate::model::{NewUser, UserUpdate};

use super::*;

impl App {
    pub(super) fn start_login(&mut self, username: Option<String>) {
        self.cancel_wizards();
        let server = parse_utils::server_label(self.core.api().base_url());
        match username.filter(|u| !u.trim().is_empty()) {
            Some(user) => {
                self.login_wizard.username = Some(user.trim().to_string());
                self.open_login_password(&server);
            }
            None => self.open_modal(Modal::text_input(
                "Log in",
                "username: ",
                TextInputAction::LoginUsername,
                false,
                vec![format!("Appliance: {}", server)],
            )),
        }
    }

    fn open_login_password(&mut self, server: &str) {
        let user = self.login_wizard.username.clone().unwrap_or_default();
        self.open_modal(Modal::text_input(
            "Log in",
            "password: ",
            TextInputAction::LoginPassword,
            true,
            vec![format!("Appliance: {}", server), format!("User: {}", user)],
        ));
    }

    pub(super) fn start_passwd(&mut self) {
        self.cancel_wizards();
        let mut lines = Vec::new();
        if self.core.state().password_change_required {
            lines.push("Your password must be changed before continuing.".to_string());
        }
        self.open_modal(Modal::text_input(
            "Change password",
            "current: ",
            TextInputAction::PasswdOld,
            true,
            lines,
        ));
    }

    pub(super) fn start_user_password(&mut self, wizard: UserWizard) {
        self.cancel_wizards();
        let (action, lines) = match &wizard {
            UserWizard::Create { username, role } => (
                TextInputAction::UserPassword,
                vec![format!("New account {} ({})", username, role)],
            ),
            UserWizard::Update {
                id,
                role,
                must_change_password,
            } => (
                TextInputAction::UserNewPassword,
                vec![
                    format!(
                        "Account #{}: role {}, must change password: {}",
                        id,
                        role,
                        if *must_change_password { "yes" } else { "no" }
                    ),
                    "Leave empty to keep the current password.".to_string(),
                ],
            ),
        };
        self.user_wizard = Some(wizard);
        self.open_modal(Modal::text_input(
            "User password",
            "password: ",
            action,
            true,
            lines,
        ));
    }

    pub(in crate::tui_shell) fn submit_text_input(
        &mut self,
        action: TextInputAction,
        value: String,
    ) {
        match action {
            TextInputAction::LoginUsername => {
                self.login_wizard.username = Some(value);
                let server = parse_utils::server_label(self.core.api().base_url());
                self.open_login_password(&server);
            }
            TextInputAction::LoginPassword => {
                let username = self.login_wizard.username.take().unwrap_or_default();
                self.core.login(&username, &value);
                if let Some(err) = self.core.state().login_error.clone() {
                    self.push_error(format!("login: {}", err));
                } else {
                    self.push_output(vec![format!("logged in as {}", username)]);
                }
            }
            TextInputAction::PasswdOld => {
                self.passwd_wizard.old_password = Some(value);
                self.open_modal(Modal::text_input(
                    "Change password",
                    "new: ",
                    TextInputAction::PasswdNew,
                    true,
                    Vec::new(),
                ));
            }
            TextInputAction::PasswdNew => {
                let old = self.passwd_wizard.old_password.take().unwrap_or_default();
                self.core.change_password(&old, &value);
            }
            TextInputAction::UserPassword | TextInputAction::UserNewPassword => {
                match self.user_wizard.take() {
                    Some(UserWizard::Create { username, role }) => {
                        self.core.create_user(&NewUser {
                            username,
                            password: value,
                            role,
                        });
                    }
                    Some(UserWizard::Update {
                        id,
                        role,
                        must_change_password,
                    }) => {
                        self.core.update_user(
                            id,
                            &UserUpdate::new(role, must_change_password, Some(value)),
                        );
                    }
                    None => {}
                }
            }
            TextInputAction::EditField(field) => {
                let res = self.core.set_form_field(field, &value);
                match res {
                    Ok(()) => self.push_output(vec![format!(
                        "{} updated (not saved yet)",
                        field.key()
                    )]),
                    Err(err) => self.push_error(err.to_string()),
                }
            }
        }
    }
}
