//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining)
//! - `/metrics` : snapshot, `?format=json` (default) or `?format=prometheus`

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use arena_metrics_core::exposition::{render_json, render_text};
use arena_metrics_core::Format;

use crate::app_state::AppState;
use crate::error::ApiResult;

#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    #[serde(default)]
    pub format: Option<String>,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(
    State(state): State<AppState>,
    Query(q): Query<MetricsQuery>,
) -> ApiResult<Response> {
    let format = match q.format.as_deref() {
        Some(f) => f.parse::<Format>()?,
        None => state.cfg().metrics.default_format,
    };

    let collector = state.collector();
    if state.cfg().metrics.process_metrics {
        state.sampler().refresh(&collector);
    }

    let snapshot = collector.get_metrics();
    let count = snapshot.len();
    let body = match format {
        Format::Json => render_json(snapshot)?,
        Format::Prometheus => render_text(&snapshot),
    };
    tracing::debug!(?format, metrics = count, bytes = body.len(), "metrics scraped");

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, format.content_type())],
        body,
    )
        .into_response())
}
