//! HTTP mapping for metrics errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use arena_metrics_core::{ClientCode, MetricsError};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        let ApiError::Metrics(e) = self;
        match e.client_code() {
            ClientCode::BadRequest
            | ClientCode::InvalidMetric
            | ClientCode::InvalidConfig
            | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let ApiError::Metrics(ref e) = self;
        if status.is_server_error() {
            tracing::error!(error = %e, "request failed");
        }
        let body = Json(json!({
            "error": e.client_code().as_str(),
            "message": e.to_string(),
        }));
        (status, body).into_response()
    }
}
