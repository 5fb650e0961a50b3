use crate::api::ApiError;
use crate::cluster_form::{FormError, FormField};
use crate::model::{MailSearch, NewRoute, NewUser, PasswordChange, UserUpdate};
use crate::state::{Tab, Transition};

use super::AdminApp;

impl AdminApp {
    pub fn login(&mut self, username: &str, password: &str) {
        match self.api.login(username.trim(), password) {
            Ok(resp) => {
                if let Err(err) = self.api.session_mut().set_login(
                    &resp.token,
                    resp.role,
                    resp.must_change_password,
                ) {
                    tracing::warn!("persist session: {:#}", err);
                }
                tracing::info!(user = username.trim(), "logged in");
                self.drop_session_data();
                self.transition(Transition::LoggedIn {
                    role: resp.role,
                    must_change_password: resp.must_change_password,
                });
                self.render_and_flush();
            }
            Err(err) => {
                tracing::info!(user = username.trim(), "login failed: {}", err);
                if err.is_unreachable() {
                    self.transition(Transition::NetworkUnavailable(err.to_string()));
                }
                self.transition(Transition::LoginFailed(err.detail_or("login failed")));
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.api.session_mut().clear() {
            tracing::warn!("clear session: {:#}", err);
        }
        tracing::info!("logged out");
        self.drop_session_data();
        self.transition(Transition::LoggedOut);
    }

    pub fn refresh(&mut self) {
        self.render_and_flush();
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.transition(Transition::SelectTab(tab));
        self.render_and_flush();
    }

    /// Opens the overlay on a fresh copy of the server's settings.
    pub fn open_settings(&mut self) {
        self.form = None;
        self.transition(Transition::OpenSettings);
        self.render_and_flush();
    }

    pub fn close_settings(&mut self) {
        self.transition(Transition::CloseSettings);
        self.render_and_flush();
    }

    pub fn clear_output(&mut self) {
        self.transition(Transition::ClearOutput);
    }

    pub fn add_domain(&mut self, domain: &str) {
        let res = self.api.add_domain(domain);
        self.finish_mutation("Add domain", res, false);
    }

    pub fn add_route(&mut self, route: &NewRoute) {
        let res = self.api.add_route(route);
        self.finish_mutation("Add route", res, false);
    }

    /// Shows the appliance's verdict; nothing on screen depends on it.
    pub fn test_config(&mut self) {
        match self.api.test_config() {
            Ok(v) => self.show_result("Test config", &v),
            Err(err) => self.report("Test config", err, false),
        }
    }

    pub fn apply_config(&mut self) {
        match self.api.apply_config() {
            Ok(v) => {
                tracing::info!("relay configuration applied");
                self.show_result("Apply config", &v);
            }
            Err(err) => self.report("Apply config", err, false),
        }
    }

    pub fn set_form_field(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        match self.form.as_mut() {
            Some(form) => form.set(field, raw),
            None => Ok(()),
        }
    }

    pub fn clear_form_secret(&mut self, field: FormField) -> Result<(), FormError> {
        match self.form.as_mut() {
            Some(form) => form.clear_secret(field),
            None => Ok(()),
        }
    }

    pub fn cycle_cluster_mode(&mut self) {
        if let Some(form) = self.form.as_mut() {
            form.cycle_mode();
        }
    }

    /// Writes the VIP derived from the node IP into the form.
    pub fn suggest_vip(&mut self) -> Option<String> {
        self.form.as_mut().map(|f| f.apply_suggested_vip())
    }

    /// Submits the form. A form that does not convert sends nothing; after a
    /// successful save the form is rebuilt from the server's state.
    pub fn save_cluster(&mut self) {
        let Some(form) = self.form.as_ref() else {
            self.show_error(
                "Save cluster settings",
                "cluster settings are not loaded; nothing was sent".to_string(),
            );
            return;
        };
        let update = match form.to_update() {
            Ok(u) => u,
            Err(err) => {
                self.show_error("Save cluster settings", err.to_string());
                return;
            }
        };
        match self.api.save_cluster_settings(&update) {
            Ok(v) => {
                tracing::info!(mode = %update.cluster_mode, "cluster settings saved");
                self.form = None;
                self.show_result("Save cluster settings", &v);
                self.render_and_flush();
            }
            Err(err) => self.report("Save cluster settings", err, false),
        }
    }

    /// Single bounded attempt; no retry.
    pub fn test_peer(&mut self) {
        match self.api.test_peer(self.peer_test_timeout) {
            Ok(v) => self.show_result("Peer test", &v),
            Err(ApiError::TimedOut(_)) => {
                let secs = self.peer_test_timeout.as_secs();
                tracing::warn!("peer test timed out after {}s", secs);
                self.show_error("Peer test", format!("peer test timed out after {}s", secs));
            }
            Err(err) => self.report("Peer test", err, false),
        }
    }

    pub fn search(&mut self, filters: MailSearch) {
        match self.api.search_mail(&filters) {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), hours = filters.effective_hours(), "mail search");
                self.transition(Transition::SearchCompleted { filters, rows });
                self.render_and_flush();
            }
            Err(err) => self.report("Mail search", err, false),
        }
    }

    pub fn export_csv_url(&self, hours: &str) -> String {
        self.api.export_csv_url(hours)
    }

    pub fn create_user(&mut self, user: &NewUser) {
        let res = self.api.create_user(user);
        self.finish_mutation("Create user", res, true);
    }

    pub fn update_user(&mut self, id: i64, update: &UserUpdate) {
        let res = self.api.update_user(id, update);
        self.finish_mutation("Update user", res, true);
    }

    pub fn change_password(&mut self, old_password: &str, new_password: &str) {
        let change = PasswordChange {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        match self.api.change_password(&change) {
            Ok(v) => {
                tracing::info!("password changed");
                if let Err(err) = self.api.session_mut().mark_password_changed() {
                    tracing::warn!("persist session: {:#}", err);
                }
                self.transition(Transition::PasswordChanged);
                self.show_result("Change password", &v);
            }
            Err(err) => self.report("Change password", err, false),
        }
    }

    fn finish_mutation(
        &mut self,
        title: &str,
        res: Result<serde_json::Value, ApiError>,
        verbatim: bool,
    ) {
        match res {
            Ok(v) => {
                tracing::info!("{}: ok", title);
                self.show_result(title, &v);
                self.render_and_flush();
            }
            Err(err) => self.report(title, err, verbatim),
        }
    }
}
