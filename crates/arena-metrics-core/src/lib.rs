//! arena-metrics core: in-process metric primitives, registry, exposition
//! formatters, and instrumentation wrappers.
//!
//! This crate carries no HTTP or async-runtime dependencies so it can be
//! linked into any component of the platform (request handlers, query
//! executors, connection handlers) and recorded into inline.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Invalid metric
//! definitions surface as `MetricsError`; recording never panics.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collector;
pub mod error;
pub mod exposition;
pub mod global;
pub mod instrument;
pub mod model;
pub mod primitives;

pub use collector::{names, Collector};
pub use error::{ClientCode, MetricsError, Result};
pub use exposition::Format;
pub use instrument::{ConnectionEvent, ConnectionGuard};
pub use model::{Labels, Metric, MetricKind};
pub use primitives::{Counter, Gauge, Histogram, Objective, Summary};
