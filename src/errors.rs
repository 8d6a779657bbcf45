use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing required field: {0}")]
    Validation(&'static str),

    #[error("tracking API credentials are not configured")]
    AuthConfig,

    #[error("token exchange failed: {0}")]
    AuthUpstream(String),

    #[error("upstream request failed: {0}")]
    UpstreamHttp(String),

    #[error("upstream query error: {0}")]
    UpstreamProtocol(String),

    #[error("no tracking record found")]
    NotFound,

    #[error("unknown carrier: {0}")]
    CarrierResolution(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::Validation(field) => (
                StatusCode::BAD_REQUEST,
                format!(
                    "carrier id and tracking number are required (missing {})",
                    field
                ),
            ),
            AppError::AuthConfig => {
                tracing::error!("tracking API credentials are not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::AuthUpstream(e) => {
                tracing::warn!("token exchange failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "tracking service is unavailable, try again".to_string(),
                )
            }
            AppError::UpstreamHttp(e) => {
                tracing::warn!("upstream request failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "tracking service is unavailable, try again".to_string(),
                )
            }
            AppError::UpstreamProtocol(e) => {
                tracing::warn!("upstream query error: {}", e);
                (StatusCode::BAD_GATEWAY, "tracking lookup failed".to_string())
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "no tracking record found".to_string(),
            ),
            // Batch callers skip unresolved rows before a lookup is ever
            // issued; this kind reaches the HTTP boundary only when a direct
            // request names a carrier we do not know.
            AppError::CarrierResolution(name) => (
                StatusCode::BAD_REQUEST,
                format!("unknown carrier: {}", name),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": msg }));
        (status, body).into_response()
    }
}
