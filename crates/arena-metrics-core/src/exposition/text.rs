//! Prometheus text exposition (format 0.0.4).
//!
//! One `# HELP` / `# TYPE` header per metric family, then one sample line per
//! instance: `name{k="v",...} value timestamp_ms`. Histograms expand into
//! `_bucket`/`_sum`/`_count` samples and summaries into `{quantile=..}`/
//! `_sum`/`_count` samples. Label values are escaped.

use std::collections::HashMap;
use std::fmt::Write;

use crate::model::labels::escape_label_value;
use crate::model::{Labels, Metric, MetricKind};

pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub fn render_text(metrics: &[Metric]) -> String {
    let mut out = String::with_capacity(metrics.len() * 128);
    for family in group_families(metrics) {
        let head = family[0];
        let _ = writeln!(out, "# HELP {} {}", head.name, escape_help(&head.help));
        let _ = writeln!(out, "# TYPE {} {}", head.name, head.unit.exposition_type());
        for m in family {
            write_samples(&mut out, m);
        }
    }
    out
}

/// Group by (name, kind), families in first-appearance order.
fn group_families(metrics: &[Metric]) -> Vec<Vec<&Metric>> {
    let mut index: HashMap<(&str, MetricKind), usize> = HashMap::new();
    let mut families: Vec<Vec<&Metric>> = Vec::new();
    for m in metrics {
        let slot = *index.entry((m.name.as_str(), m.unit)).or_insert_with(|| {
            families.push(Vec::new());
            families.len() - 1
        });
        families[slot].push(m);
    }
    families
}

fn write_samples(out: &mut String, m: &Metric) {
    let ts = m.timestamp.timestamp_millis();
    let tags = m.tags.as_ref();
    match m.unit {
        MetricKind::Histogram => {
            if let Some(buckets) = tags.and_then(|t| t.buckets.as_ref()) {
                for b in buckets {
                    let le = format_value(b.le);
                    write_sample(out, &m.name, "_bucket", &m.labels, Some(("le", le.as_str())), b.count as f64, ts);
                }
                let count = m.count().unwrap_or(0);
                write_sample(out, &m.name, "_bucket", &m.labels, Some(("le", "+Inf")), count as f64, ts);
                write_sample(out, &m.name, "_sum", &m.labels, None, m.value, ts);
                write_sample(out, &m.name, "_count", &m.labels, None, count as f64, ts);
                return;
            }
        }
        MetricKind::Summary => {
            if let Some(quantiles) = tags.and_then(|t| t.quantiles.as_ref()) {
                for q in quantiles {
                    let qs = format_value(q.quantile);
                    write_sample(out, &m.name, "", &m.labels, Some(("quantile", qs.as_str())), q.value, ts);
                }
                let count = m.count().unwrap_or(0);
                write_sample(out, &m.name, "_sum", &m.labels, None, m.value, ts);
                write_sample(out, &m.name, "_count", &m.labels, None, count as f64, ts);
                return;
            }
        }
        MetricKind::Count | MetricKind::Gauge => {}
    }
    write_sample(out, &m.name, "", &m.labels, None, m.value, ts);
}

fn write_sample(
    out: &mut String,
    name: &str,
    suffix: &str,
    labels: &Labels,
    extra: Option<(&str, &str)>,
    value: f64,
    ts_ms: i64,
) {
    out.push_str(name);
    out.push_str(suffix);
    if !labels.is_empty() || extra.is_some() {
        out.push('{');
        let mut pairs: Vec<(&str, &str)> = labels.iter().collect();
        pairs.extend(extra);
        for (i, (k, v)) in pairs.into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label_value(v));
        }
        out.push('}');
    }
    let _ = writeln!(out, " {} {}", format_value(value), ts_ms);
}

/// Integral values print without a fractional part; non-finite values use
/// the exposition spellings.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v.is_infinite() {
        if v > 0.0 { "+Inf".into() } else { "-Inf".into() }
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// HELP text escapes backslash and newline only.
fn escape_help(h: &str) -> String {
    h.replace('\\', "\\\\").replace('\n', "\\n")
}
