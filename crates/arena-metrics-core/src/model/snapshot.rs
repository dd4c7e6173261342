//! Export snapshot (`Metric`) and its kind-specific tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::labels::Labels;

/// Metric kind. Serialized as the snapshot `unit` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Count,
    Gauge,
    Histogram,
    Summary,
}

impl MetricKind {
    /// Snapshot unit string.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Count => "count",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
        }
    }

    /// Type name used on `# TYPE` lines of the text exposition.
    pub fn exposition_type(self) -> &'static str {
        match self {
            MetricKind::Count => "counter",
            other => other.as_str(),
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = crate::MetricsError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "count" | "counter" => Ok(MetricKind::Count),
            "gauge" => Ok(MetricKind::Gauge),
            "histogram" => Ok(MetricKind::Histogram),
            "summary" => Ok(MetricKind::Summary),
            other => Err(crate::MetricsError::BadRequest(format!(
                "unknown metric type: {other}"
            ))),
        }
    }
}

/// One cumulative histogram bucket. The implicit +Inf bucket is not listed;
/// its count equals `MetricTags::count`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketCount {
    pub le: f64,
    pub count: u64,
}

/// One computed quantile of a summary window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileValue {
    pub quantile: f64,
    pub value: f64,
}

/// Kind-specific auxiliary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<Vec<BucketCount>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantiles: Option<Vec<QuantileValue>>,
}

/// Immutable point-in-time view of a single metric instance.
///
/// `value` is the counter/gauge value, or the running sum for histograms and
/// summaries (their observation count lives in `tags.count`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub labels: Labels,
    pub timestamp: DateTime<Utc>,
    pub unit: MetricKind,
    #[serde(default)]
    pub help: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<MetricTags>,
}

impl Metric {
    /// Observation count for histograms/summaries.
    pub fn count(&self) -> Option<u64> {
        self.tags.as_ref().and_then(|t| t.count)
    }
}
