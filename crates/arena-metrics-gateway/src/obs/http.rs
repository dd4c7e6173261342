//! HTTP request instrumentation.
//!
//! `track_http` is an axum `from_fn_with_state` middleware: it samples the
//! start instant and request size, runs the inner service, then records
//! method, label path, status, elapsed time and response size through
//! `Collector::record_http_request`. Skipped paths bypass recording entirely.
//!
//! The `path` label is the matched route template (`/users/:id`), never the
//! raw URI. Requests no route matched share [`UNMATCHED_PATH`], so unknown
//! URIs cannot grow the registry.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{MatchedPath, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use arena_metrics_core::Collector;

use super::normalize;

/// Label value for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Rewrites a route template into a bounded label value.
pub type PathNormalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Middleware state: target collector plus path policy.
#[derive(Clone)]
pub struct HttpMetrics {
    collector: Arc<Collector>,
    skip_paths: Arc<HashSet<String>>,
    normalizer: Option<PathNormalizer>,
}

impl HttpMetrics {
    pub fn new(collector: Arc<Collector>) -> Self {
        Self {
            collector,
            skip_paths: Arc::new(HashSet::new()),
            normalizer: None,
        }
    }

    pub fn with_skip_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_paths = Arc::new(paths.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_normalizer(mut self, f: PathNormalizer) -> Self {
        self.normalizer = Some(f);
        self
    }

    /// Use [`normalize::collapse_ids`].
    pub fn with_default_normalizer(self) -> Self {
        self.with_normalizer(Arc::new(normalize::collapse_ids))
    }

    pub fn collector(&self) -> &Arc<Collector> {
        &self.collector
    }

    pub fn is_skipped(&self, path: &str) -> bool {
        self.skip_paths.contains(path)
    }

    /// Label value for a matched route template.
    pub fn label_path(&self, path: &str) -> String {
        match &self.normalizer {
            Some(f) => f(path),
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpMetrics")
            .field("skip_paths", &self.skip_paths)
            .field("normalizer", &self.normalizer.is_some())
            .finish()
    }
}

pub async fn track_http(State(m): State<HttpMetrics>, req: Request, next: Next) -> Response {
    let raw_path = req.uri().path();
    if m.is_skipped(raw_path) {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_string();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => m.label_path(matched.as_str()),
        None => UNMATCHED_PATH.to_string(),
    };
    let request_size = content_length(req.headers()).or_else(|| req.body().size_hint().exact());

    let response = next.run(req).await;

    let elapsed = start.elapsed();
    let status = response.status().as_u16();
    let response_size =
        content_length(response.headers()).or_else(|| response.body().size_hint().exact());

    m.collector.record_http_request(
        &method,
        &path,
        status,
        elapsed,
        request_size.unwrap_or(0),
        response_size.unwrap_or(0),
    );
    tracing::trace!(%method, %path, status, elapsed_us = elapsed.as_micros() as u64, "http request recorded");

    response
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
