// Rendered dashboard page

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::collections::HashMap;
use tera::{Context, Tera, Value};

use super::AppState;
use crate::models::Snapshot;
use crate::units::format_bytes;
use crate::weather::WeatherLocation;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// The dashboard template set with the `bytes` filter registered.
pub fn templates() -> anyhow::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", INDEX_TEMPLATE)?;
    tera.register_filter("bytes", bytes_filter);
    Ok(tera)
}

/// `{{ n | bytes }}` renders a byte count the same way the JSON API formats throughput.
fn bytes_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let n = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("bytes filter expects a number"))?;
    Ok(Value::String(format_bytes(n)))
}

pub fn render_index(
    tera: &Tera,
    snapshot: &Snapshot,
    weather: &WeatherLocation,
) -> tera::Result<String> {
    let mut ctx = Context::new();
    ctx.insert("snapshot", snapshot);
    ctx.insert("weather", weather);
    tera.render("index.html", &ctx)
}

/// GET / — the dashboard with the current snapshot and weather location embedded.
pub(super) async fn index_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.collector.snapshot().await;
    match render_index(&state.templates, &snapshot, &state.weather) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, operation = "render_index", "template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
