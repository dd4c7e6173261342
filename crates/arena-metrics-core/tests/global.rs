//! Process-wide facade lifecycle. Kept in its own test binary so the single
//! `init` is not shared with other tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use arena_metrics_core::{global, names, Collector, ConnectionEvent, Labels};

#[test]
fn explicit_init_then_record() {
    // Before init: convenience calls are dropped, nothing to read.
    assert!(global::get().is_none());
    global::set_active_users(99);

    let installed = global::init(Arc::new(Collector::with_defaults())).unwrap();
    let again = global::init_default().expect_err("second init must fail");
    assert_eq!(again.client_code().as_str(), "INTERNAL");

    let c = global::get().unwrap();
    assert!(Arc::ptr_eq(&installed, &c));
    assert_eq!(c.get_metrics_by_name(names::ACTIVE_USERS)[0].value, 0.0);

    global::record_http_request("GET", "/tournaments", 200, Duration::from_millis(8), 0, 512);
    global::record_db_query("list_tournaments", Duration::from_millis(2), true);
    global::record_websocket_connection(ConnectionEvent::Connect);
    global::set_active_users(12);
    global::set_tournament_count(4);
    global::set_match_count(9);

    assert_eq!(
        c.sum_by_labels(names::HTTP_REQUESTS_TOTAL, &Labels::from([("path", "/tournaments")])),
        1.0
    );
    assert_eq!(c.sum_by_labels(names::DB_QUERIES_TOTAL, &Labels::new()), 1.0);
    assert_eq!(c.sum_by_labels(names::WEBSOCKET_CONNECTIONS, &Labels::new()), 1.0);
    assert_eq!(c.get_metrics_by_name(names::ACTIVE_USERS)[0].value, 12.0);
    assert_eq!(c.get_metrics_by_name(names::ACTIVE_TOURNAMENTS)[0].value, 4.0);
    assert_eq!(c.get_metrics_by_name(names::ACTIVE_MATCHES)[0].value, 9.0);
}
