//! Top-level facade crate for arena-metrics.
//!
//! Re-exports the collector core and the HTTP service library so users can
//! depend on a single crate.

pub mod core {
    pub use arena_metrics_core::*;
}

pub mod gateway {
    pub use arena_metrics_gateway::*;
}

pub use arena_metrics_core::{global, Collector, Labels, Metric, MetricKind};
