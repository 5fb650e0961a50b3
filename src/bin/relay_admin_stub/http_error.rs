use super::*;

/// Error body in the appliance's `{"detail": ...}` shape.
pub(super) fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "detail": msg }))).into_response()
}

pub(super) fn unauthorized() -> Response {
    detail(StatusCode::UNAUTHORIZED, "not authenticated")
}

pub(super) fn forbidden() -> Response {
    detail(StatusCode::FORBIDDEN, "insufficient role")
}

pub(super) fn bad_request(msg: &str) -> Response {
    detail(StatusCode::BAD_REQUEST, msg)
}

pub(super) fn not_found(msg: &str) -> Response {
    detail(StatusCode::NOT_FOUND, msg)
}

pub(super) fn require_role(subject: &Subject, allowed: &[Role]) -> Result<(), Response> {
    if allowed.contains(&subject.role) {
        Ok(())
    } else {
        tracing::info!(user = %subject.username, role = %subject.role, "insufficient role");
        Err(forbidden())
    }
}
