//! Snapshot formatters (JSON + text exposition).
//!
//! Pure functions over `&[Metric]`: no registry access, no I/O.

pub mod json;
pub mod text;

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{MetricsError, Result};

pub use json::{render_json, Snapshot, JSON_CONTENT_TYPE};
pub use text::{render_text, TEXT_CONTENT_TYPE};

/// Output format selected by a scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    #[serde(alias = "text")]
    Prometheus,
}

impl Format {
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => JSON_CONTENT_TYPE,
            Format::Prometheus => TEXT_CONTENT_TYPE,
        }
    }
}

impl FromStr for Format {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "prometheus" | "text" => Ok(Format::Prometheus),
            other => Err(MetricsError::BadRequest(format!("unknown format: {other}"))),
        }
    }
}
