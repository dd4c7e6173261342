//! Shared application state for the metrics service.
//!
//! The collector is injected, never looked up: whoever builds `AppState`
//! decides whether it is also installed as the process-wide facade.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arena_metrics_core::error::Result;
use arena_metrics_core::Collector;

use crate::config::ArenaMetricsConfig;
use crate::obs::{HttpMetrics, ProcessSampler};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ArenaMetricsConfig,
    collector: Arc<Collector>,
    http: HttpMetrics,
    sampler: ProcessSampler,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state.
    ///
    /// Validates `cfg` again: configs from [`crate::config::load_from_str`]
    /// are already checked, but embedders and tests build them in code.
    pub fn new(cfg: ArenaMetricsConfig, collector: Arc<Collector>) -> Result<Self> {
        cfg.validate()?;

        let mut http = HttpMetrics::new(Arc::clone(&collector))
            .with_skip_paths(cfg.metrics.skip_paths.iter().cloned());
        if cfg.metrics.normalize_paths {
            http = http.with_default_normalizer();
        }

        tracing::debug!(
            skip_paths = ?cfg.metrics.skip_paths,
            normalize = cfg.metrics.normalize_paths,
            "http instrumentation configured"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                collector,
                http,
                sampler: ProcessSampler::new(),
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &ArenaMetricsConfig {
        &self.inner.cfg
    }

    pub fn collector(&self) -> Arc<Collector> {
        Arc::clone(&self.inner.collector)
    }

    pub fn http_metrics(&self) -> HttpMetrics {
        self.inner.http.clone()
    }

    pub fn sampler(&self) -> &ProcessSampler {
        &self.inner.sampler
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
