//! Metric registry.
//!
//! One `DashMap` per primitive kind, keyed by [`identity_key`]. Map shards are
//! locked only for lookup/insert; snapshots clone the `Arc`s out first and call
//! `to_metric()` afterwards, so a primitive's own lock is never taken while a
//! shard lock is held.
//!
//! `get_metrics` walks the four maps one after another. Under concurrent
//! mutation, different metrics in one snapshot may be captured at slightly
//! different instants; each individual metric is internally consistent.

pub mod defaults;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::Result;
use crate::model::{identity_key, Labels, Metric, MetricKind};
use crate::primitives::histogram::validate_buckets;
use crate::primitives::summary::validate_objectives;
use crate::primitives::{Counter, Gauge, Histogram, Objective, Summary};

pub use defaults::names;

#[derive(Debug, Default)]
pub struct Collector {
    counters: DashMap<String, Arc<Counter>>,
    gauges: DashMap<String, Arc<Gauge>>,
    histograms: DashMap<String, Arc<Histogram>>,
    summaries: DashMap<String, Arc<Summary>>,
}

impl Collector {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a counter. An existing instance is returned unchanged,
    /// whatever `help` is passed.
    pub fn register_counter(&self, name: &str, help: &str, labels: Labels) -> Arc<Counter> {
        let key = identity_key(name, &labels);
        if let Some(existing) = self.counters.get(&key) {
            return Arc::clone(existing.value());
        }
        self.counters
            .entry(key)
            .or_insert_with(|| {
                tracing::debug!(metric = name, labels = %labels.canonical(), "registered counter");
                Arc::new(Counter::new(name, help, labels))
            })
            .value()
            .clone()
    }

    /// Get or create a gauge.
    pub fn register_gauge(&self, name: &str, help: &str, labels: Labels) -> Arc<Gauge> {
        let key = identity_key(name, &labels);
        if let Some(existing) = self.gauges.get(&key) {
            return Arc::clone(existing.value());
        }
        self.gauges
            .entry(key)
            .or_insert_with(|| {
                tracing::debug!(metric = name, labels = %labels.canonical(), "registered gauge");
                Arc::new(Gauge::new(name, help, labels))
            })
            .value()
            .clone()
    }

    /// Get or create a histogram. `buckets` are validated on every call; for an
    /// already registered identity they are otherwise ignored.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        labels: Labels,
        buckets: &[f64],
    ) -> Result<Arc<Histogram>> {
        if let Err(e) = validate_buckets(name, buckets) {
            tracing::warn!(metric = name, error = %e, "histogram registration rejected");
            return Err(e);
        }
        let key = identity_key(name, &labels);
        if let Some(existing) = self.histograms.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }
        match self.histograms.entry(key) {
            Entry::Occupied(e) => Ok(Arc::clone(e.get())),
            Entry::Vacant(v) => {
                tracing::debug!(metric = name, labels = %labels.canonical(), "registered histogram");
                let h = Arc::new(Histogram::new(name, help, labels, buckets)?);
                Ok(Arc::clone(v.insert(h).value()))
            }
        }
    }

    /// Get or create a summary. Objectives are validated on every call.
    pub fn register_summary(
        &self,
        name: &str,
        help: &str,
        labels: Labels,
        objectives: &[Objective],
    ) -> Result<Arc<Summary>> {
        if let Err(e) = validate_objectives(name, objectives) {
            tracing::warn!(metric = name, error = %e, "summary registration rejected");
            return Err(e);
        }
        let key = identity_key(name, &labels);
        if let Some(existing) = self.summaries.get(&key) {
            return Ok(Arc::clone(existing.value()));
        }
        match self.summaries.entry(key) {
            Entry::Occupied(e) => Ok(Arc::clone(e.get())),
            Entry::Vacant(v) => {
                tracing::debug!(metric = name, labels = %labels.canonical(), "registered summary");
                let s = Arc::new(Summary::new(name, help, labels, objectives)?);
                Ok(Arc::clone(v.insert(s).value()))
            }
        }
    }

    /// Snapshot every registered metric, sorted by name then labels.
    pub fn get_metrics(&self) -> Vec<Metric> {
        let counters: Vec<Arc<Counter>> = self.counters.iter().map(|e| e.value().clone()).collect();
        let gauges: Vec<Arc<Gauge>> = self.gauges.iter().map(|e| e.value().clone()).collect();
        let histograms: Vec<Arc<Histogram>> =
            self.histograms.iter().map(|e| e.value().clone()).collect();
        let summaries: Vec<Arc<Summary>> =
            self.summaries.iter().map(|e| e.value().clone()).collect();

        let mut out = Vec::with_capacity(
            counters.len() + gauges.len() + histograms.len() + summaries.len(),
        );
        out.extend(counters.iter().map(|c| c.to_metric()));
        out.extend(gauges.iter().map(|g| g.to_metric()));
        out.extend(histograms.iter().map(|h| h.to_metric()));
        out.extend(summaries.iter().map(|s| s.to_metric()));

        out.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then(a.unit.cmp(&b.unit))
                .then_with(|| a.labels.cmp(&b.labels))
        });
        out
    }

    pub fn get_metrics_by_name(&self, name: &str) -> Vec<Metric> {
        self.get_metrics()
            .into_iter()
            .filter(|m| m.name == name)
            .collect()
    }

    pub fn get_metrics_by_type(&self, kind: MetricKind) -> Vec<Metric> {
        self.get_metrics()
            .into_iter()
            .filter(|m| m.unit == kind)
            .collect()
    }

    /// Sum of `value` across every instance of `name` whose labels contain
    /// `subset`.
    pub fn sum_by_labels(&self, name: &str, subset: &Labels) -> f64 {
        self.get_metrics_by_name(name)
            .iter()
            .filter(|m| m.labels.matches(subset))
            .map(|m| m.value)
            .sum()
    }

    /// Number of registered instances across all kinds.
    pub fn len(&self) -> usize {
        self.counters.len() + self.gauges.len() + self.histograms.len() + self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
