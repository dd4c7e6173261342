//! Shared error type across arena-metrics crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Metric definition rejected at registration.
    InvalidMetric,
    /// Configuration could not be used.
    InvalidConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidMetric => "INVALID_METRIC",
            ClientCode::InvalidConfig => "INVALID_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("invalid histogram buckets for {name}: {reason}")]
    InvalidBuckets { name: String, reason: String },
    #[error("invalid quantile {quantile} for {name}: must be finite and within [0, 1]")]
    InvalidQuantile { name: String, quantile: f64 },
    #[error("counter {name} cannot decrease (delta {delta})")]
    NegativeDelta { name: String, delta: f64 },
    #[error("global collector already initialized")]
    AlreadyInitialized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("unsupported config version {0}")]
    UnsupportedVersion(u32),
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::InvalidBuckets { .. }
            | MetricsError::InvalidQuantile { .. }
            | MetricsError::NegativeDelta { .. } => ClientCode::InvalidMetric,
            MetricsError::BadRequest(_) => ClientCode::BadRequest,
            MetricsError::InvalidConfig(_) => ClientCode::InvalidConfig,
            MetricsError::UnsupportedVersion(_) => ClientCode::UnsupportedVersion,
            MetricsError::AlreadyInitialized | MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
