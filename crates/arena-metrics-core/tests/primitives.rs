//! Primitive invariants: counter monotonicity, gauge algebra, cumulative
//! histogram buckets, bounded summary window.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use arena_metrics_core::primitives::{Counter, Gauge, Histogram, Objective, Summary, DEFAULT_WINDOW};
use arena_metrics_core::{Labels, MetricKind};

#[test]
fn counter_sums_deltas_and_never_decreases() {
    let c = Counter::new("events_total", "events", Labels::new());
    let deltas = [1.0, 0.0, 2.5, 10.0, 0.5];
    let mut last = c.get();
    for d in deltas {
        c.add(d).unwrap();
        assert!(c.get() >= last);
        last = c.get();
    }
    c.inc();
    assert_eq!(c.get(), 15.0);
}

#[test]
fn counter_negative_delta_is_an_error() {
    let c = Counter::new("events_total", "events", Labels::new());
    c.add(3.0).unwrap();
    let err = c.add(-1.0).expect_err("must reject");
    assert_eq!(err.client_code().as_str(), "INVALID_METRIC");
    assert_eq!(c.get(), 3.0);
}

#[test]
fn counter_concurrent_increments() {
    let c = Arc::new(Counter::new("hits_total", "hits", Labels::new()));
    thread::scope(|s| {
        for _ in 0..8 {
            let c = Arc::clone(&c);
            s.spawn(move || {
                for _ in 0..1000 {
                    c.inc();
                }
            });
        }
    });
    assert_eq!(c.get(), 8000.0);
}

#[test]
fn gauge_algebra() {
    let g = Gauge::new("queue_depth", "depth", Labels::new());
    g.set(25.0);
    g.inc();
    g.dec();
    g.add(-10.0);
    assert_eq!(g.get(), 15.0);
    g.sub(20.0);
    assert_eq!(g.get(), -5.0);
}

#[test]
fn histogram_cumulative_buckets() {
    let h = Histogram::new("latency", "latency", Labels::new(), &[1.0, 5.0, 10.0]).unwrap();
    for v in [0.5, 3.0, 7.0, 100.0] {
        h.observe(v);
    }
    let s = h.snapshot();
    let counts: Vec<u64> = s.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(s.inf, 4);
    assert_eq!(s.count, 4);
    assert!((s.sum - 110.5).abs() < f64::EPSILON);

    let m = h.to_metric();
    assert_eq!(m.unit, MetricKind::Histogram);
    assert_eq!(m.value, 110.5);
    assert_eq!(m.count(), Some(4));
}

#[test]
fn histogram_inf_bucket_matches_count_under_contention() {
    let h = Arc::new(Histogram::new("h", "", Labels::new(), &[0.1, 1.0, 10.0]).unwrap());
    thread::scope(|s| {
        for t in 0..4 {
            let h = Arc::clone(&h);
            s.spawn(move || {
                for i in 0..500 {
                    h.observe((i % 20) as f64 * 0.75 + t as f64);
                }
            });
        }
        for _ in 0..50 {
            let snap = h.snapshot();
            assert_eq!(snap.inf, snap.count);
            let mut prev = 0;
            for b in &snap.buckets {
                assert!(b.count >= prev);
                prev = b.count;
            }
            assert!(snap.inf >= prev);
        }
    });
    assert_eq!(h.snapshot().count, 2000);
}

#[test]
fn histogram_rejects_malformed_buckets() {
    for bad in [vec![], vec![3.0, 2.0], vec![1.0, f64::NAN], vec![f64::NEG_INFINITY, 1.0]] {
        let err = Histogram::new("h", "", Labels::new(), &bad).expect_err("must reject");
        assert_eq!(err.client_code().as_str(), "INVALID_METRIC");
    }
}

#[test]
fn summary_window_is_bounded() {
    let s = Summary::new("sizes", "", Labels::new(), &Objective::defaults()).unwrap();
    for i in 1..=1500 {
        s.observe(i as f64);
    }
    assert_eq!(s.window_len(), DEFAULT_WINDOW);
    assert_eq!(s.count(), 1500);
    assert_eq!(s.sum(), (1500 * 1501 / 2) as f64);

    let window = s.window();
    assert_eq!(window.first().copied(), Some(501.0));
    assert_eq!(window.last().copied(), Some(1500.0));
}

#[test]
fn summary_quantiles_over_window() {
    let s = Summary::new(
        "latency",
        "",
        Labels::new(),
        &[Objective::new(0.5, 0.05), Objective::new(0.99, 0.001)],
    )
    .unwrap();
    for i in (1..=101).rev() {
        s.observe(i as f64);
    }
    let q = s.quantiles();
    assert_eq!(q.len(), 2);
    assert_eq!(q[0].value, 51.0);
    assert_eq!(q[1].value, 100.0);
}

#[test]
fn summary_empty_has_no_quantiles() {
    let s = Summary::new("empty", "", Labels::new(), &Objective::defaults()).unwrap();
    assert!(s.quantiles().is_empty());
    let m = s.to_metric();
    assert_eq!(m.unit, MetricKind::Summary);
    assert_eq!(m.count(), Some(0));
    assert_eq!(m.tags.unwrap().quantiles, Some(vec![]));
}
