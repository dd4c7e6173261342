//! Metric primitives.
//!
//! Each primitive owns its synchronization: counters and gauges are lock-free
//! (`f64` bit-cast into `AtomicU64`), histograms and summaries guard their
//! multi-field state with a single `parking_lot::Mutex` so `to_metric()` never
//! mixes state from before and after a concurrent `observe`.

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod summary;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::Labels;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{exponential_buckets, Histogram, HistogramSnapshot};
pub use summary::{Objective, Summary, DEFAULT_WINDOW};

/// Identity and description shared by every primitive.
#[derive(Debug, Clone)]
pub(crate) struct Desc {
    pub name: String,
    pub help: String,
    pub labels: Labels,
}

impl Desc {
    pub fn new(name: impl Into<String>, help: impl Into<String>, labels: Labels) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            labels,
        }
    }
}

/// Add `delta` to an `f64` stored as raw bits.
pub(crate) fn atomic_add_f64(cell: &AtomicU64, delta: f64) {
    let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
        Some((f64::from_bits(bits) + delta).to_bits())
    });
}

pub(crate) fn load_f64(cell: &AtomicU64) -> f64 {
    f64::from_bits(cell.load(Ordering::Acquire))
}
