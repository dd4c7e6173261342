//! Process-wide collector facade.
//!
//! Optional: components that can hold an `Arc<Collector>` should take one
//! explicitly. The facade exists for call sites that cannot, and has an
//! explicit lifecycle: nothing is recorded until [`init`] (or
//! [`init_default`]) has run, and the free functions are no-ops before that.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use crate::collector::Collector;
use crate::error::{MetricsError, Result};
use crate::instrument::ConnectionEvent;

static GLOBAL: OnceLock<Arc<Collector>> = OnceLock::new();

/// Install `collector` as the process-wide instance. Fails if one is already
/// installed; the existing instance stays in place.
pub fn init(collector: Arc<Collector>) -> Result<Arc<Collector>> {
    match GLOBAL.set(Arc::clone(&collector)) {
        Ok(()) => {
            tracing::info!(metrics = collector.len(), "global collector installed");
            Ok(collector)
        }
        Err(_) => {
            tracing::warn!("global collector already initialized");
            Err(MetricsError::AlreadyInitialized)
        }
    }
}

/// Install a [`Collector::with_defaults`] instance.
pub fn init_default() -> Result<Arc<Collector>> {
    init(Arc::new(Collector::with_defaults()))
}

/// The installed collector, if any.
pub fn get() -> Option<Arc<Collector>> {
    GLOBAL.get().cloned()
}

fn with(f: impl FnOnce(&Collector)) {
    match GLOBAL.get() {
        Some(c) => f(c),
        None => tracing::trace!("global collector not initialized; event dropped"),
    }
}

pub fn record_http_request(
    method: &str,
    path: &str,
    status: u16,
    duration: Duration,
    request_size: u64,
    response_size: u64,
) {
    with(|c| c.record_http_request(method, path, status, duration, request_size, response_size));
}

pub fn record_db_query(operation: &str, duration: Duration, success: bool) {
    with(|c| c.record_db_query(operation, duration, success));
}

pub fn record_websocket_connection(event: ConnectionEvent) {
    with(|c| c.record_websocket_connection(event));
}

pub fn set_active_users(n: u64) {
    with(|c| c.set_active_users(n));
}

pub fn set_tournament_count(n: u64) {
    with(|c| c.set_tournament_count(n));
}

pub fn set_match_count(n: u64) {
    with(|c| c.set_match_count(n));
}
