//! HTTP route registration for the stub appliance.

use super::*;

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/login", post(login))
        // Opened in a browser, which carries no bearer token.
        .route("/api/mail/export.csv", get(export_csv))
        .merge(authed_router(state.clone()))
        .with_state(state)
}

fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/change-password", post(change_password))
        .route("/api/dashboard", get(dashboard))
        .route("/api/config", get(get_config))
        .route("/api/domains", post(add_domain))
        .route("/api/routes", post(add_route))
        .route("/api/config/test", post(test_config))
        .route("/api/config/apply", post(apply_config))
        .route(
            "/api/cluster/settings",
            get(get_cluster_settings).post(save_cluster_settings),
        )
        .route("/api/cluster/test-peer", post(test_peer))
        .route("/api/mail/search", get(search_mail))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/:id", patch(update_user))
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}
