//! Axum router wiring.
//!
//! Ops routes (`/healthz`, `/readyz`, scrape path) are merged with any
//! application routes, and the whole tree is wrapped in the HTTP metrics
//! middleware.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops};

pub fn build_router(state: AppState) -> Router {
    build_router_with(state, Router::new())
}

/// Merge `app` with the ops routes and instrument every request.
pub fn build_router_with(state: AppState, app: Router) -> Router {
    let ops = Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route(&state.cfg().metrics.path, get(ops::metrics))
        .with_state(state.clone());

    app.merge(ops).layer(middleware::from_fn_with_state(
        state.http_metrics(),
        obs::track_http,
    ))
}
