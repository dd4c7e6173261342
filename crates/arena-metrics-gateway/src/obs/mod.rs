//! Observability glue between axum and the metrics collector.
//!
//! - `http`: request instrumentation middleware
//! - `normalize`: path normalization for label values
//! - `process`: process memory / runtime task sampling

pub mod http;
pub mod normalize;
pub mod process;

pub use http::{track_http, HttpMetrics, PathNormalizer, UNMATCHED_PATH};
pub use process::ProcessSampler;
