// JSON and plain-text handlers: stats, logs, version, healthz

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::AppState;
use crate::log_tail::tail_first_existing;
use crate::version::{NAME, VERSION};

/// GET /api/stats — a freshly sampled snapshot. Blocks for the CPU sample window.
pub(super) async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.collector.snapshot().await)
}

/// GET /api/logs — last lines of the first existing system log, or `[]`.
pub(super) async fn logs_handler(State(state): State<AppState>) -> impl IntoResponse {
    let paths = state.log_paths.clone();
    let n = state.log_lines;
    let lines = tokio::task::spawn_blocking(move || tail_first_existing(&paths, n))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "tail_log", "log task join failed");
            Vec::new()
        });
    Json(lines)
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /healthz
pub(super) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
