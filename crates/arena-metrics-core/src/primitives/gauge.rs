use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use super::{atomic_add_f64, load_f64, Desc};
use crate::model::{Labels, Metric, MetricKind};

/// Arbitrary up/down value.
#[derive(Debug)]
pub struct Gauge {
    desc: Desc,
    value: AtomicU64,
}

impl Gauge {
    pub fn new(name: impl Into<String>, help: impl Into<String>, labels: Labels) -> Self {
        Self {
            desc: Desc::new(name, help, labels),
            value: AtomicU64::new(0.0_f64.to_bits()),
        }
    }

    pub fn set(&self, v: f64) {
        self.value.store(v.to_bits(), Ordering::Release);
    }

    pub fn inc(&self) {
        self.add(1.0);
    }

    pub fn dec(&self) {
        self.add(-1.0);
    }

    pub fn add(&self, delta: f64) {
        atomic_add_f64(&self.value, delta);
    }

    pub fn sub(&self, delta: f64) {
        self.add(-delta);
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
            unit: MetricKind::Gauge,
            help: self.desc.help.clone(),
            tags: None,
        }
    }
}
