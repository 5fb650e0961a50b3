//! The controller: owns the API client, the view state and the settings form,
//! and runs the fetch-everything render cycle after each action.

use std::time::Duration;

use serde_json::Value;

use crate::api::{ApiClient, ApiError};
use crate::cluster_form::ClusterSettingsForm;
use crate::model::{ClusterSettings, DashboardSnapshot, RelayConfig};
use crate::state::{Transition, ViewState};
use crate::views::{ScreenModel, compose};

mod actions;
mod render;

/// Server data fetched by the most recent complete render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub dashboard: DashboardSnapshot,
    pub config: RelayConfig,
    pub cluster: ClusterSettings,
}

pub const DEFAULT_PEER_TEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AdminApp {
    api: ApiClient,
    state: ViewState,
    snapshot: Snapshot,
    form: Option<ClusterSettingsForm>,
    peer_test_timeout: Duration,

    render_pending: bool,
    rendering: bool,
    renders: u64,
}

impl AdminApp {
    pub fn new(api: ApiClient, peer_test_timeout: Duration) -> Self {
        let session = api.session();
        let state = if session.is_logged_in() {
            ViewState::resumed(session.role(), session.must_change_password())
        } else {
            ViewState::initial(false)
        };
        Self {
            api,
            state,
            snapshot: Snapshot::default(),
            form: None,
            peer_test_timeout,
            render_pending: false,
            rendering: false,
            renders: 0,
        }
    }

    /// First render; a stored token that no longer works lands on login.
    pub fn start(&mut self) {
        self.request_render();
        self.flush_renders();
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn form(&self) -> Option<&ClusterSettingsForm> {
        self.form.as_ref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn peer_test_timeout(&self) -> Duration {
        self.peer_test_timeout
    }

    /// Number of completed render passes.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn screen_model(&self) -> ScreenModel {
        compose(
            &self.state,
            &self.snapshot,
            self.form.as_ref(),
            self.api.base_url(),
        )
    }

    fn transition(&mut self, t: Transition) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(t);
    }

    fn drop_session_data(&mut self) {
        self.snapshot = Snapshot::default();
        self.form = None;
    }

    fn show_result(&mut self, title: &str, value: &Value) {
        self.transition(Transition::ShowResult {
            title: title.to_string(),
            text: pretty(value),
        });
    }

    fn show_error(&mut self, title: &str, text: String) {
        self.transition(Transition::ShowError {
            title: title.to_string(),
            text,
        });
    }

    /// Routes a failed call to the right state: login for 401, the banner for
    /// network trouble, the output area for everything else.
    fn report(&mut self, title: &str, err: ApiError, verbatim: bool) {
        match err {
            ApiError::AuthExpired => {
                tracing::info!("{}: session expired", title);
                self.drop_session_data();
                self.transition(Transition::SessionExpired);
            }
            err if err.is_unreachable() => {
                tracing::warn!("{}: {}", title, err);
                self.transition(Transition::NetworkUnavailable(err.to_string()));
                self.show_error(title, err.to_string());
            }
            err => {
                tracing::warn!("{}: {}", title, err);
                let text = if verbatim {
                    err.verbatim()
                } else {
                    err.to_string()
                };
                self.show_error(title, text);
            }
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
