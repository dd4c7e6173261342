//! Metric identity and snapshot model.
//!
//! Labels form part of a metric's identity. A [`Metric`] is the immutable value
//! object produced by every primitive's `to_metric()`, consumed by the
//! exposition formatters.

pub mod labels;
pub mod snapshot;

pub use labels::{identity_key, Labels};
pub use snapshot::{BucketCount, Metric, MetricKind, MetricTags, QuantileValue};
