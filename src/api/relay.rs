use crate::model::{DashboardSnapshot, NewRoute, RelayConfig};

use super::*;

impl ApiClient {
    pub fn dashboard(&mut self) -> Result<DashboardSnapshot, ApiError> {
        self.get_decoded("/api/dashboard")
    }

    pub fn relay_config(&mut self) -> Result<RelayConfig, ApiError> {
        self.get_decoded("/api/config")
    }

    pub fn add_domain(&mut self, domain: &str) -> Result<Value, ApiError> {
        self.write_json(
            Method::Post,
            "/api/domains",
            &serde_json::json!({ "domain": domain.trim() }),
        )
    }

    pub fn add_route(&mut self, route: &NewRoute) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/routes", route)
    }

    /// Asks the appliance to render and check the relay configuration.
    pub fn test_config(&mut self) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/config/test", &serde_json::json!({}))
    }

    /// Asks the appliance to reload the relay with the current configuration.
    pub fn apply_config(&mut self) -> Result<Value, ApiError> {
        self.write_json(Method::Post, "/api/config/apply", &serde_json::json!({}))
    }
}
