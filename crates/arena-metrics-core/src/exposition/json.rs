use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::model::Metric;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON scrape body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub count: usize,
    pub metrics: Vec<Metric>,
}

impl Snapshot {
    pub fn capture(metrics: Vec<Metric>) -> Self {
        Self {
            timestamp: Utc::now(),
            count: metrics.len(),
            metrics,
        }
    }
}

pub fn render_json(metrics: Vec<Metric>) -> Result<String> {
    serde_json::to_string(&Snapshot::capture(metrics))
        .map_err(|e| MetricsError::Internal(format!("json encode failed: {e}")))
}
