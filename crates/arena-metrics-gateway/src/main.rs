//! arena-metrics service
//!
//! - Scrape endpoint: /metrics?format=json|prometheus
//! - Health probes: /healthz, /readyz (503 while draining)
//! - Config: first CLI argument, default `arena-metrics.yaml`

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use arena_metrics_core::{global, Collector};
use arena_metrics_gateway::{app_state::AppState, config, router};

const DEFAULT_CONFIG_PATH: &str = "arena-metrics.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Tracing is not up yet; the filter lives in the config.
            fmt().with_env_filter(EnvFilter::new("info")).init();
            tracing::error!(error = %e, %path, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log.filter.as_str()));
    fmt().with_env_filter(filter).init();

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "arena-metrics stopped with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: config::ArenaMetricsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let listen = cfg.server.listen_addr()?;

    let collector = global::init(Arc::new(Collector::with_defaults()))?;
    let state = AppState::new(cfg, collector)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "arena-metrics starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("arena-metrics stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl_c handler failed; shutting down");
    }
    state.set_draining();
    tracing::info!("draining");
}
