// HTTP routes

mod auth;
mod http;
mod page;

pub use page::{render_index, templates};

use axum::{Router, middleware, routing::get};
use std::path::PathBuf;
use std::sync::Arc;
use tera::Tera;
use tower_http::cors::{Any, CorsLayer};

use crate::collector::SnapshotCollector;
use crate::config::AppConfig;
use crate::weather::WeatherLocation;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) collector: Arc<SnapshotCollector>,
    pub(crate) templates: Arc<Tera>,
    pub(crate) weather: Arc<WeatherLocation>,
    pub(crate) log_paths: Arc<[PathBuf]>,
    pub(crate) log_lines: usize,
    pub(crate) auth_token: Option<Arc<str>>,
}

pub fn app(
    collector: Arc<SnapshotCollector>,
    weather: WeatherLocation,
    config: &AppConfig,
) -> anyhow::Result<Router> {
    let state = AppState {
        collector,
        templates: Arc::new(page::templates()?),
        weather: Arc::new(weather),
        log_paths: config.logs.paths.clone().into(),
        log_lines: config.logs.lines,
        auth_token: config.auth.token.as_deref().map(Arc::from),
    };

    let protected = Router::new()
        .route("/", get(page::index_handler)) // GET /
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route("/api/logs", get(http::logs_handler)) // GET /api/logs
        .route("/version", get(http::version_handler)) // GET /version
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ));

    Ok(Router::new()
        .merge(protected)
        .route("/healthz", get(http::healthz_handler)) // GET /healthz, never gated
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state))
}
