// Shared bearer-token gate

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::AppState;

/// Passes the request through when no token is configured or the
/// `Authorization: Bearer <token>` header matches exactly; otherwise 401 with no body.
pub(super) async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.auth_token.as_deref() else {
        return next.run(req).await;
    };
    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));
    if provided == Some(expected) {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "rejected request without valid bearer token");
        StatusCode::UNAUTHORIZED.into_response()
    }
}
