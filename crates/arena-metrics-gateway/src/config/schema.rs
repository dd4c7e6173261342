use std::net::SocketAddr;

use serde::Deserialize;

use arena_metrics_core::error::{MetricsError, Result};
use arena_metrics_core::Format;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArenaMetricsConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,

    #[serde(default)]
    pub log: LogSection,
}

impl ArenaMetricsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion(self.version));
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

impl Default for ArenaMetricsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            metrics: MetricsSection::default(),
            log: LogSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            MetricsError::InvalidConfig(format!("server.listen must be a socket address: {e}"))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Scrape endpoint path.
    #[serde(default = "default_metrics_path")]
    pub path: String,

    /// Format served when the scrape has no `format` query parameter.
    #[serde(default)]
    pub default_format: Format,

    /// Literal paths the HTTP middleware never records.
    #[serde(default = "default_skip_paths")]
    pub skip_paths: Vec<String>,

    /// Collapse id-like segments of the matched route template (literal ids
    /// baked into routes) before they become label values.
    #[serde(default = "default_true")]
    pub normalize_paths: bool,

    /// Refresh process memory / runtime task gauges on each scrape.
    #[serde(default = "default_true")]
    pub process_metrics: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            default_format: Format::default(),
            skip_paths: default_skip_paths(),
            normalize_paths: true,
            process_metrics: true,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !self.path.starts_with('/') {
            return Err(MetricsError::InvalidConfig(
                "metrics.path must start with '/'".into(),
            ));
        }
        if let Some(bad) = self.skip_paths.iter().find(|p| !p.starts_with('/')) {
            return Err(MetricsError::InvalidConfig(format!(
                "metrics.skip_paths entry must start with '/': {bad}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:9090".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}
fn default_skip_paths() -> Vec<String> {
    vec!["/healthz".into(), "/readyz".into(), "/metrics".into()]
}
fn default_true() -> bool {
    true
}
fn default_log_filter() -> String {
    "info".into()
}
