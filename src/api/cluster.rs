use std::time::Duration;

use crate::model::{ClusterSettings, ClusterSettingsUpdate};

use super::*;

impl ApiClient {
    /// Settings seed the edit form, so a payload of the wrong shape is an
    /// error rather than a set of defaults.
    pub fn cluster_settings(&mut self) -> Result<ClusterSettings, ApiError> {
        self.get_exact("/api/cluster/settings")
    }

    pub fn save_cluster_settings(
        &mut self,
        update: &ClusterSettingsUpdate,
    ) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/cluster/settings", update)
    }

    /// Body-less connectivity check, bounded by `timeout`. Never retried.
    pub fn test_peer(&mut self, timeout: Duration) -> Result<Value, ApiError> {
        let mut req = ApiRequest::new(Method::Post, "/api/cluster/test-peer");
        req.timeout = Some(timeout);
        match self.send_authed(req) {
            Err(ApiError::TimedOut(_)) => Err(ApiError::TimedOut(Some(timeout))),
            other => other?.into_result(),
        }
    }
}
