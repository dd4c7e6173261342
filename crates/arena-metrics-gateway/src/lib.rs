//! arena-metrics service library entry.
//!
//! Wires the collector from `arena-metrics-core` into an axum stack: the
//! HTTP instrumentation middleware, the scrape endpoint, health probes and
//! the YAML config loader. Consumed by the binary (`main.rs`) and by
//! integration tests; embedders can use [`router::build_router_with`] to
//! instrument their own routes.

pub mod app_state;
pub mod config;
pub mod error;
pub mod obs;
pub mod ops;
pub mod router;
