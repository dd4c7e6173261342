//! Service config loader (strict parsing).

pub mod schema;

use std::fs;

use arena_metrics_core::error::{MetricsError, Result};

pub use schema::{ArenaMetricsConfig, LogSection, MetricsSection, ServerSection};

pub fn load_from_file(path: &str) -> Result<ArenaMetricsConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| MetricsError::InvalidConfig(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ArenaMetricsConfig> {
    let cfg: ArenaMetricsConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
