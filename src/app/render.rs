use crate::api::ApiError;
use crate::cluster_form::ClusterSettingsForm;
use crate::state::{Tab, Transition};

use super::{AdminApp, Snapshot};

impl AdminApp {
    /// Marks the screen stale. Requests made while a render is running are
    /// folded into a single follow-up pass.
    pub fn request_render(&mut self) {
        self.render_pending = true;
    }

    /// Runs render passes until no request is pending. Never re-entered.
    pub fn flush_renders(&mut self) {
        if self.rendering {
            return;
        }
        self.rendering = true;
        while self.render_pending {
            self.render_pending = false;
            self.render_once();
        }
        self.rendering = false;
    }

    pub(super) fn render_and_flush(&mut self) {
        self.request_render();
        self.flush_renders();
    }

    /// One pass: dashboard, config, cluster settings, then users on the users
    /// tab. Any 401 stops the pass and returns to login.
    fn render_once(&mut self) {
        if !self.state.is_logged_in() {
            return;
        }
        self.renders += 1;

        let res = self.api.dashboard();
        let Some(dashboard) = self.settle("dashboard", res) else {
            return;
        };
        let res = self.api.relay_config();
        let Some(config) = self.settle("config", res) else {
            return;
        };
        let res = self.api.cluster_settings();
        let cluster_loaded = res.is_ok();
        let Some(cluster) = self.settle("cluster settings", res) else {
            return;
        };

        if self.state.tab == Tab::Users {
            let res = self.api.list_users();
            let Some(users) = self.settle("users", res) else {
                return;
            };
            self.transition(Transition::UsersLoaded(users));
        }

        if self.state.banner.is_some() {
            self.transition(Transition::Reachable);
        }

        // The form is only ever seeded from settings the server actually sent.
        if !self.state.settings_open {
            self.form = None;
        } else if cluster_loaded {
            match self.form.as_mut() {
                Some(form) => form.refresh_flags(&cluster),
                None => self.form = Some(ClusterSettingsForm::from_settings(&cluster)),
            }
        }

        self.snapshot = Snapshot {
            dashboard,
            config,
            cluster,
        };
        tracing::debug!(tab = %self.state.tab, render = self.renders, "render complete");
    }

    /// Result of one read within a render. `None` aborts the pass; a plain
    /// rejection falls back to the resource's default and keeps going.
    fn settle<T: Default>(&mut self, what: &str, res: Result<T, ApiError>) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(ApiError::AuthExpired) => {
                self.report(what, ApiError::AuthExpired, false);
                None
            }
            Err(err) if err.is_unreachable() => {
                self.report(&format!("Load {}", what), err, false);
                None
            }
            Err(err) => {
                self.report(&format!("Load {}", what), err, false);
                Some(T::default())
            }
        }
    }
}
