//! Cumulative bucketed histogram.
//!
//! Bucket `i` counts observations `<= bounds[i]`; the trailing slot is the
//! implicit +Inf bucket and always equals `count`.

use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;

use super::Desc;
use crate::error::{MetricsError, Result};
use crate::model::{BucketCount, Labels, Metric, MetricKind, MetricTags};

#[derive(Debug)]
struct HistogramState {
    sum: f64,
    count: u64,
    /// `bounds.len() + 1` slots, last is +Inf.
    counts: Vec<u64>,
}

/// Consistent copy of a histogram's state.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    pub sum: f64,
    pub count: u64,
    pub buckets: Vec<BucketCount>,
    pub inf: u64,
}

#[derive(Debug)]
pub struct Histogram {
    desc: Desc,
    bounds: Vec<f64>,
    state: Mutex<HistogramState>,
}

impl Histogram {
    /// Build a histogram over `bounds`, which must be non-empty, finite and
    /// strictly ascending.
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        labels: Labels,
        bounds: &[f64],
    ) -> Result<Self> {
        let desc = Desc::new(name, help, labels);
        validate_buckets(&desc.name, bounds)?;
        Ok(Self {
            state: Mutex::new(HistogramState {
                sum: 0.0,
                count: 0,
                counts: vec![0; bounds.len() + 1],
            }),
            bounds: bounds.to_vec(),
            desc,
        })
    }

    /// Record one observation. NaN is dropped.
    pub fn observe(&self, v: f64) {
        if v.is_nan() {
            tracing::debug!(metric = %self.desc.name, "dropped NaN observation");
            return;
        }
        // First bucket whose bound is >= v; every bucket from there on counts it.
        let first = self.bounds.partition_point(|b| *b < v);

        let mut st = self.state.lock();
        st.sum += v;
        st.count += 1;
        for c in &mut st.counts[first..] {
            *c += 1;
        }
    }

    /// Record a duration in seconds.
    pub fn observe_duration(&self, d: Duration) {
        self.observe(d.as_secs_f64());
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    pub fn name(&self) -> &str {
        &self.desc.name
    }

    pub fn labels(&self) -> &Labels {
        &self.desc.labels
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let (sum, count, counts) = {
            let st = self.state.lock();
            (st.sum, st.count, st.counts.clone())
        };
        let buckets = self
            .bounds
            .iter()
            .zip(&counts)
            .map(|(le, count)| BucketCount { le: *le, count: *count })
            .collect();
        HistogramSnapshot {
            sum,
            count,
            buckets,
            inf: counts.last().copied().unwrap_or(count),
        }
    }

    pub fn to_metric(&self) -> Metric {
        let snap = self.snapshot();
        Metric {
            name: self.desc.name.clone(),
            value: snap.sum,
            labels: self.desc.labels.clone(),
            timestamp: Utc::now(),
            unit: MetricKind::Histogram,
            help: self.desc.help.clone(),
            tags: Some(MetricTags {
                count: Some(snap.count),
                buckets: Some(snap.buckets),
                quantiles: None,
            }),
        }
    }
}

/// Reject empty, non-finite, or non-ascending bucket lists.
pub fn validate_buckets(name: &str, bounds: &[f64]) -> Result<()> {
    let invalid = |reason: String| MetricsError::InvalidBuckets {
        name: name.to_string(),
        reason,
    };

    if bounds.is_empty() {
        return Err(invalid("bucket list is empty".into()));
    }
    if let Some(b) = bounds.iter().find(|b| !b.is_finite()) {
        return Err(invalid(format!("bound {b} is not finite")));
    }
    if let Some(w) = bounds.windows(2).find(|w| w[0] >= w[1]) {
        return Err(invalid(format!(
            "bounds must be strictly ascending ({} then {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// `count` bounds starting at `start`, each `factor` times the previous.
pub fn exponential_buckets(start: f64, factor: f64, count: usize) -> Result<Vec<f64>> {
    if count == 0 || !start.is_finite() || start <= 0.0 || !factor.is_finite() || factor <= 1.0 {
        return Err(MetricsError::InvalidBuckets {
            name: "exponential_buckets".into(),
            reason: format!("start={start} factor={factor} count={count}"),
        });
    }
    let mut out = Vec::with_capacity(count);
    let mut b = start;
    for _ in 0..count {
        out.push(b);
        b *= factor;
    }
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn boundary_value_lands_in_its_bucket() {
        let h = Histogram::new("h", "", Labels::new(), &[1.0, 5.0]).unwrap();
        h.observe(1.0);
        h.observe(5.0);
        let s = h.snapshot();
        assert_eq!(s.buckets[0].count, 1);
        assert_eq!(s.buckets[1].count, 2);
        assert_eq!(s.inf, 2);
    }

    #[test]
    fn nan_is_dropped() {
        let h = Histogram::new("h", "", Labels::new(), &[1.0]).unwrap();
        h.observe(f64::NAN);
        assert_eq!(h.snapshot().count, 0);
    }

    #[test]
    fn rejects_bad_bounds() {
        assert!(validate_buckets("h", &[]).is_err());
        assert!(validate_buckets("h", &[1.0, f64::INFINITY]).is_err());
        assert!(validate_buckets("h", &[1.0, f64::NAN]).is_err());
        assert!(validate_buckets("h", &[5.0, 1.0]).is_err());
        assert!(validate_buckets("h", &[1.0, 1.0]).is_err());
        assert!(validate_buckets("h", &[0.1, 1.0, 10.0]).is_ok());
    }

    #[test]
    fn exponential() {
        assert_eq!(
            exponential_buckets(100.0, 10.0, 3).unwrap(),
            vec![100.0, 1000.0, 10000.0]
        );
        assert!(exponential_buckets(0.0, 2.0, 3).is_err());
        assert!(exponential_buckets(1.0, 1.0, 3).is_err());
    }
}
