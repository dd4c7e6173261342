//! Well-known platform metrics and the `record_*` convenience methods.
//!
//! `Collector::with_defaults()` registers one unlabeled instance of each
//! well-known metric so a scrape shows the full catalog from process start.
//! The `record_*` methods register labeled instances on demand.

use std::sync::Arc;
use std::time::Duration;

use super::Collector;
use crate::instrument::ConnectionEvent;
use crate::model::Labels;
use crate::primitives::{Gauge, Histogram};

/// Metric names shared with dashboards and alert rules.
pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";
    pub const HTTP_REQUEST_SIZE_BYTES: &str = "http_request_size_bytes";
    pub const HTTP_RESPONSE_SIZE_BYTES: &str = "http_response_size_bytes";
    pub const HTTP_ERRORS_TOTAL: &str = "http_errors_total";

    pub const DB_QUERIES_TOTAL: &str = "db_queries_total";
    pub const DB_QUERY_DURATION_SECONDS: &str = "db_query_duration_seconds";
    pub const DB_ERRORS_TOTAL: &str = "db_errors_total";

    pub const ACTIVE_USERS: &str = "active_users";
    pub const ACTIVE_TOURNAMENTS: &str = "active_tournaments";
    pub const ACTIVE_MATCHES: &str = "active_matches";

    pub const WEBSOCKET_CONNECTIONS: &str = "websocket_connections";
    pub const WEBSOCKET_EVENTS_TOTAL: &str = "websocket_events_total";

    pub const PROCESS_MEMORY_BYTES: &str = "process_memory_bytes";
    pub const RUNTIME_TASKS: &str = "runtime_tasks";
}

/// Latency buckets in seconds (5ms .. 10s).
pub const DURATION_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Payload size buckets in bytes (100B .. 10MB).
pub const SIZE_BUCKETS: [f64; 6] = [100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0, 10_000_000.0];

const HELP_HTTP_REQUESTS: &str = "Total number of HTTP requests";
const HELP_HTTP_DURATION: &str = "HTTP request duration in seconds";
const HELP_HTTP_REQ_SIZE: &str = "HTTP request size in bytes";
const HELP_HTTP_RESP_SIZE: &str = "HTTP response size in bytes";
const HELP_HTTP_ERRORS: &str = "Total number of HTTP requests answered with status >= 400";
const HELP_DB_QUERIES: &str = "Total number of database queries";
const HELP_DB_DURATION: &str = "Database query duration in seconds";
const HELP_DB_ERRORS: &str = "Total number of failed database queries";
const HELP_ACTIVE_USERS: &str = "Number of active users";
const HELP_ACTIVE_TOURNAMENTS: &str = "Number of active tournaments";
const HELP_ACTIVE_MATCHES: &str = "Number of active matches";
const HELP_WS_CONNECTIONS: &str = "Number of open WebSocket connections";
const HELP_WS_EVENTS: &str = "Total number of WebSocket connection events";
const HELP_PROCESS_MEMORY: &str = "Resident memory of the process in bytes";
const HELP_RUNTIME_TASKS: &str = "Number of live async runtime tasks";

impl Collector {
    /// Registry pre-populated with the platform's well-known metrics.
    pub fn with_defaults() -> Self {
        let c = Collector::new();
        let none = Labels::new;

        c.register_counter(names::HTTP_REQUESTS_TOTAL, HELP_HTTP_REQUESTS, none());
        c.histogram(names::HTTP_REQUEST_DURATION_SECONDS, HELP_HTTP_DURATION, none(), &DURATION_BUCKETS);
        c.histogram(names::HTTP_REQUEST_SIZE_BYTES, HELP_HTTP_REQ_SIZE, none(), &SIZE_BUCKETS);
        c.histogram(names::HTTP_RESPONSE_SIZE_BYTES, HELP_HTTP_RESP_SIZE, none(), &SIZE_BUCKETS);
        c.register_counter(names::HTTP_ERRORS_TOTAL, HELP_HTTP_ERRORS, none());

        c.register_counter(names::DB_QUERIES_TOTAL, HELP_DB_QUERIES, none());
        c.histogram(names::DB_QUERY_DURATION_SECONDS, HELP_DB_DURATION, none(), &DURATION_BUCKETS);
        c.register_counter(names::DB_ERRORS_TOTAL, HELP_DB_ERRORS, none());

        c.register_gauge(names::ACTIVE_USERS, HELP_ACTIVE_USERS, none());
        c.register_gauge(names::ACTIVE_TOURNAMENTS, HELP_ACTIVE_TOURNAMENTS, none());
        c.register_gauge(names::ACTIVE_MATCHES, HELP_ACTIVE_MATCHES, none());
        c.register_gauge(names::WEBSOCKET_CONNECTIONS, HELP_WS_CONNECTIONS, none());

        c.register_gauge(names::PROCESS_MEMORY_BYTES, HELP_PROCESS_MEMORY, none());
        c.register_gauge(names::RUNTIME_TASKS, HELP_RUNTIME_TASKS, none());

        tracing::debug!(metrics = c.len(), "default collector initialized");
        c
    }

    /// Count, time and size one HTTP request under `{method, path, status}`.
    /// Status >= 400 also counts as an error.
    pub fn record_http_request(
        &self,
        method: &str,
        path: &str,
        status: u16,
        duration: Duration,
        request_size: u64,
        response_size: u64,
    ) {
        let labels = Labels::from([
            ("method", method.to_string()),
            ("path", path.to_string()),
            ("status", status.to_string()),
        ]);

        self.register_counter(names::HTTP_REQUESTS_TOTAL, HELP_HTTP_REQUESTS, labels.clone())
            .inc();
        if let Some(h) = self.histogram(
            names::HTTP_REQUEST_DURATION_SECONDS,
            HELP_HTTP_DURATION,
            labels.clone(),
            &DURATION_BUCKETS,
        ) {
            h.observe_duration(duration);
        }
        if let Some(h) =
            self.histogram(names::HTTP_REQUEST_SIZE_BYTES, HELP_HTTP_REQ_SIZE, labels.clone(), &SIZE_BUCKETS)
        {
            h.observe(request_size as f64);
        }
        if let Some(h) = self.histogram(
            names::HTTP_RESPONSE_SIZE_BYTES,
            HELP_HTTP_RESP_SIZE,
            labels.clone(),
            &SIZE_BUCKETS,
        ) {
            h.observe(response_size as f64);
        }
        if status >= 400 {
            self.register_counter(names::HTTP_ERRORS_TOTAL, HELP_HTTP_ERRORS, labels)
                .inc();
        }
    }

    /// Count and time one database call under `{operation}`.
    pub fn record_db_query(&self, operation: &str, duration: Duration, success: bool) {
        let status = if success { "success" } else { "error" };
        let op = Labels::from([("operation", operation)]);

        self.register_counter(
            names::DB_QUERIES_TOTAL,
            HELP_DB_QUERIES,
            op.clone().with("status", status),
        )
        .inc();
        if let Some(h) = self.histogram(
            names::DB_QUERY_DURATION_SECONDS,
            HELP_DB_DURATION,
            op.clone(),
            &DURATION_BUCKETS,
        ) {
            h.observe_duration(duration);
        }
        if !success {
            self.register_counter(names::DB_ERRORS_TOTAL, HELP_DB_ERRORS, op).inc();
        }
    }

    /// Track one connection lifecycle event.
    pub fn record_websocket_connection(&self, event: ConnectionEvent) {
        let open = self.register_gauge(names::WEBSOCKET_CONNECTIONS, HELP_WS_CONNECTIONS, Labels::new());
        match event {
            ConnectionEvent::Connect => open.inc(),
            ConnectionEvent::Disconnect => open.dec(),
        }
        self.register_counter(
            names::WEBSOCKET_EVENTS_TOTAL,
            HELP_WS_EVENTS,
            Labels::from([("event", event.as_str())]),
        )
        .inc();
    }

    pub fn set_active_users(&self, n: u64) {
        self.unlabeled_gauge(names::ACTIVE_USERS, HELP_ACTIVE_USERS).set(n as f64);
    }

    pub fn set_tournament_count(&self, n: u64) {
        self.unlabeled_gauge(names::ACTIVE_TOURNAMENTS, HELP_ACTIVE_TOURNAMENTS)
            .set(n as f64);
    }

    pub fn set_match_count(&self, n: u64) {
        self.unlabeled_gauge(names::ACTIVE_MATCHES, HELP_ACTIVE_MATCHES).set(n as f64);
    }

    pub fn set_process_memory(&self, bytes: u64) {
        self.unlabeled_gauge(names::PROCESS_MEMORY_BYTES, HELP_PROCESS_MEMORY)
            .set(bytes as f64);
    }

    pub fn set_runtime_tasks(&self, n: usize) {
        self.unlabeled_gauge(names::RUNTIME_TASKS, HELP_RUNTIME_TASKS).set(n as f64);
    }

    fn unlabeled_gauge(&self, name: &str, help: &str) -> Arc<Gauge> {
        self.register_gauge(name, help, Labels::new())
    }

    /// Histogram over a built-in bucket layout. Those layouts always validate,
    /// so a failure here is logged rather than surfaced.
    fn histogram(
        &self,
        name: &str,
        help: &str,
        labels: Labels,
        buckets: &[f64],
    ) -> Option<Arc<Histogram>> {
        match self.register_histogram(name, help, labels, buckets) {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::error!(metric = name, error = %e, "built-in histogram rejected");
                None
            }
        }
    }
}
