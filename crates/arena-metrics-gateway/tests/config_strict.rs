#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use arena_metrics_core::Format;
use arena_metrics_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
metrics:
  path: "/metrics"
  skip_pathz: ["/healthz"] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:9090");
    assert_eq!(cfg.metrics.path, "/metrics");
    assert_eq!(cfg.metrics.default_format, Format::Json);
    assert!(cfg.metrics.normalize_paths);
    assert!(cfg.metrics.skip_paths.iter().any(|p| p == "/healthz"));
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9100"
metrics:
  path: "/internal/metrics"
  default_format: prometheus
  skip_paths: ["/ping"]
  normalize_paths: false
  process_metrics: false
log:
  filter: "arena_metrics_gateway=debug"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9100);
    assert_eq!(cfg.metrics.path, "/internal/metrics");
    assert_eq!(cfg.metrics.default_format, Format::Prometheus);
    assert_eq!(cfg.metrics.skip_paths, vec!["/ping".to_string()]);
    assert!(!cfg.metrics.normalize_paths);
    assert!(!cfg.metrics.process_metrics);
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn bad_listen_address() {
    let bad = r#"
version: 1
server:
  listen: "not-an-address"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn relative_metrics_path_rejected() {
    let bad = r#"
version: 1
metrics:
  path: "metrics"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("/nonexistent/arena-metrics.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INVALID_CONFIG");
}
