//! Sliding-window summary.
//!
//! Keeps exact `sum`/`count` over every observation and the most recent
//! [`DEFAULT_WINDOW`] raw values for quantile estimation. Quantiles are
//! computed on read by sorting a copy of the window; a streaming sketch can
//! replace this behind `observe`/`quantiles` without touching callers.

use std::collections::VecDeque;

use chrono::Utc;
use parking_lot::Mutex;

use super::Desc;
use crate::error::{MetricsError, Result};
use crate::model::{Labels, Metric, MetricKind, MetricTags, QuantileValue};

/// Maximum number of raw observations retained.
pub const DEFAULT_WINDOW: usize = 1000;

/// Target quantile. `error` is documentation for consumers; the window
/// estimate does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective {
    pub quantile: f64,
    pub error: f64,
}

impl Objective {
    pub const fn new(quantile: f64, error: f64) -> Self {
        Self { quantile, error }
    }

    /// p50 / p90 / p99.
    pub fn defaults() -> Vec<Objective> {
        vec![
            Objective::new(0.5, 0.05),
            Objective::new(0.9, 0.01),
            Objective::new(0.99, 0.001),
        ]
    }
}

#[derive(Debug)]
struct SummaryState {
    window: VecDeque<f64>,
    sum: f64,
    count: u64,
}

#[derive(Debug)]
pub struct Summary {
    desc: Desc,
    objectives: Vec<Objective>,
    capacity: usize,
    state: Mutex<SummaryState>,
}

impl Summary {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        labels: Labels,
        objectives: &[Objective],
    ) -> Result<Self> {
        let desc = Desc::new(name, help, labels);
        validate_objectives(&desc.name, objectives)?;
        Ok(Self {
            desc,
            objectives: objectives.to_vec(),
            capacity: DEFAULT_WINDOW,
            state: Mutex::new(SummaryState {
                window: VecDeque::with_capacity(DEFAULT_WINDOW),
                sum: 0.0,
                count: 0,
            }),
        })
    }

    /// Record one observation. NaN is dropped.
    pub fn observe(&self, v: f64) {
        if v.is_nan() {
            tracing::debug!(metric = %self.desc.name, "dropped NaN observation");
            return;
        }
        let mut st = self.state.lock();
        st.window.push_back(v);
        st.sum += v;
        st.count += 1;
        while st.window.len() > self.capacity {
            st.window.pop_front();
        }
    }

    pub fn count(&self) -> u64 {
        self.state.lock().count
    }

    pub fn sum(&self) -> f64 {
        self.state.lock().sum
    }

    /// Number of observations currently retained.
    pub fn window_len(&self) -> usize {
        self.state.lock().window.len()
    }

    /// Retained observations, oldest first.
    pub fn window(&self) -> Vec<f64> {
        self.state.lock().window.iter().copied().collect()
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn labels(&self) -> &Labels {
        &self.desc.labels
    }

    /// Estimate every objective over the current window. Empty window yields
    /// an empty result.
    pub fn quantiles(&self) -> Vec<QuantileValue> {
        let values = self.window();
        estimate(values, &self.objectives)
    }

    pub fn to_metric(&self) -> Metric {
        let (sum, count, values) = {
            let st = self.state.lock();
            (st.sum, st.count, st.window.iter().copied().collect::<Vec<_>>())
        };
        Metric {
            name: self.desc.name.clone(),
            value: sum,
            labels: self.desc.labels.clone(),
            timestamp: Utc::now(),
            unit: MetricKind::Summary,
            help: self.desc.help.clone(),
            tags: Some(MetricTags {
                count: Some(count),
                buckets: None,
                quantiles: Some(estimate(values, &self.objectives)),
            }),
        }
    }
}

/// `sorted[round(q * (len - 1))]` for each objective.
fn estimate(mut values: Vec<f64>, objectives: &[Objective]) -> Vec<QuantileValue> {
    if values.is_empty() {
        return Vec::new();
    }
    values.sort_by(f64::total_cmp);
    let last = values.len() - 1;
    objectives
        .iter()
        .map(|o| {
            let idx = ((o.quantile * last as f64).round() as usize).min(last);
            QuantileValue {
                quantile: o.quantile,
                value: values[idx],
            }
        })
        .collect()
}

pub fn validate_objectives(name: &str, objectives: &[Objective]) -> Result<()> {
    match objectives
        .iter()
        .find(|o| !o.quantile.is_finite() || !(0.0..=1.0).contains(&o.quantile))
    {
        Some(bad) => Err(MetricsError::InvalidQuantile {
            name: name.to_string(),
            quantile: bad.quantile,
        }),
        None => Ok(()),
    }
}
