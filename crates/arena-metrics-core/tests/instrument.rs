//! Database-call and connection wrappers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use arena_metrics_core::instrument::{time_db_query, time_db_query_async, track_connection};
use arena_metrics_core::{names, Collector, ConnectionEvent, ConnectionGuard, Labels};

#[test]
fn sync_wrapper_passes_result_through() {
    let c = Collector::new();
    let ok: Result<u32, String> = time_db_query(&c, "load_bracket", || Ok(7));
    assert_eq!(ok, Ok(7));
    let err: Result<u32, String> = time_db_query(&c, "load_bracket", || Err("timeout".into()));
    assert_eq!(err, Err("timeout".to_string()));

    let op = Labels::from([("operation", "load_bracket")]);
    assert_eq!(c.sum_by_labels(names::DB_QUERIES_TOTAL, &op), 2.0);
    assert_eq!(c.sum_by_labels(names::DB_ERRORS_TOTAL, &op), 1.0);

    let hist = c.get_metrics_by_name(names::DB_QUERY_DURATION_SECONDS);
    assert_eq!(hist.len(), 1);
    assert_eq!(hist[0].count(), Some(2));
}

#[tokio::test]
async fn async_wrapper_records_outcome() {
    let c = Collector::new();
    let out: Result<&str, std::io::Error> = time_db_query_async(&c, "insert_score", async {
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        Ok("done")
    })
    .await;
    assert_eq!(out.unwrap(), "done");

    let ok = Labels::from([("operation", "insert_score"), ("status", "success")]);
    assert_eq!(c.sum_by_labels(names::DB_QUERIES_TOTAL, &ok), 1.0);
    let sum = c.get_metrics_by_name(names::DB_QUERY_DURATION_SECONDS)[0].value;
    assert!(sum >= 0.005);
}

#[test]
fn connection_events_from_tags() {
    let c = Collector::new();
    for tag in ["connect", "connect", "disconnect"] {
        track_connection(&c, tag.parse::<ConnectionEvent>().unwrap());
    }
    assert!("reconnect".parse::<ConnectionEvent>().is_err());
    assert_eq!(c.sum_by_labels(names::WEBSOCKET_CONNECTIONS, &Labels::new()), 1.0);
}

#[test]
fn connection_guard_pairs_events() {
    let c = Arc::new(Collector::new());
    {
        let _a = ConnectionGuard::open(Arc::clone(&c));
        let _b = ConnectionGuard::open(Arc::clone(&c));
        assert_eq!(c.sum_by_labels(names::WEBSOCKET_CONNECTIONS, &Labels::new()), 2.0);
    }
    assert_eq!(c.sum_by_labels(names::WEBSOCKET_CONNECTIONS, &Labels::new()), 0.0);
    assert_eq!(
        c.sum_by_labels(names::WEBSOCKET_EVENTS_TOTAL, &Labels::from([("event", "disconnect")])),
        2.0
    );
}
