use std::sync::atomic::AtomicU64;

use chrono::Utc;

use super::{atomic_add_f64, load_f64, Desc};
use crate::error::{MetricsError, Result};
use crate::model::{Labels, Metric, MetricKind};

/// Monotonically non-decreasing accumulator.
#[derive(Debug)]
pub struct Counter {
    desc: Desc,
    value: AtomicU64,
}

impl Counter {
    pub fn new(name: impl Into<String>, help: impl Into<String>, labels: Labels) -> Self {
        Self {
            desc: Desc::new(name, help, labels),
            value: AtomicU64::new(0.0_f64.to_bits()),
        }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        atomic_add_f64(&self.value, 1.0);
    }

    /// Increment by `delta`. Negative or NaN deltas are rejected and leave the
    /// value untouched.
    pub fn add(&self, delta: f64) -> Result<()> {
        if delta.is_nan() || delta < 0.0 {
            tracing::warn!(metric = %self.desc.name, delta, "rejected negative counter delta");
            return Err(MetricsError::NegativeDelta {
                name: self.desc.name.clone(),
                delta,
            });
        }
        atomic_add_f64(&self.value, delta);
        Ok(())
    }

    pub fn get(&self) -> f64 {
        load_f64(&self.value)
    }

    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn help(&self) -> &str {
        &self.desc.help
    }

    pub fn labels(&self) -> &Labels {
        &self.desc.labels
    }

    pub fn to_metric(&self) -> Metric {
        Metric {
            name: self.desc.name.clone(),
            value: self.get(),
            labels: self.desc.labels.clone(),
            timestamp: Utc::now(),
            unit: MetricKind::Count,
            help: self.desc.help.clone(),
            tags: None,
        }
    }
}
