//! Instrumentation wrappers for database calls and connection lifecycles.
//!
//! These only time the wrapped work and forward the outcome to a
//! [`Collector`]; they never inspect what the work does. Cancellation of an
//! async call is the caller's concern: a dropped future records nothing.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use crate::collector::Collector;
use crate::error::{MetricsError, Result};

/// Connection lifecycle tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionEvent {
    Connect,
    Disconnect,
}

impl ConnectionEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionEvent::Connect => "connect",
            ConnectionEvent::Disconnect => "disconnect",
        }
    }
}

impl FromStr for ConnectionEvent {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connect" => Ok(ConnectionEvent::Connect),
            "disconnect" => Ok(ConnectionEvent::Disconnect),
            other => Err(MetricsError::BadRequest(format!(
                "unknown connection event: {other}"
            ))),
        }
    }
}

/// Run a synchronous database call and record its duration and outcome.
pub fn time_db_query<T, E, F>(collector: &Collector, operation: &str, call: F) -> std::result::Result<T, E>
where
    F: FnOnce() -> std::result::Result<T, E>,
{
    let start = Instant::now();
    let out = call();
    collector.record_db_query(operation, start.elapsed(), out.is_ok());
    out
}

/// Await a database future and record its duration and outcome.
pub async fn time_db_query_async<T, E, Fut>(
    collector: &Collector,
    operation: &str,
    call: Fut,
) -> std::result::Result<T, E>
where
    Fut: Future<Output = std::result::Result<T, E>>,
{
    let start = Instant::now();
    let out = call.await;
    collector.record_db_query(operation, start.elapsed(), out.is_ok());
    out
}

/// Forward a connection event tag to the collector.
pub fn track_connection(collector: &Collector, event: ConnectionEvent) {
    collector.record_websocket_connection(event);
}

/// Records `connect` on creation and `disconnect` on drop.
#[derive(Debug)]
pub struct ConnectionGuard {
    collector: Arc<Collector>,
}

impl ConnectionGuard {
    pub fn open(collector: Arc<Collector>) -> Self {
        collector.record_websocket_connection(ConnectionEvent::Connect);
        Self { collector }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.collector
            .record_websocket_connection(ConnectionEvent::Disconnect);
    }
}
