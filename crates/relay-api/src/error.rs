//! Storefront event relay: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The tracing pipeline could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorBody {
    /// Pairs an error body with its status code as a response.
    pub fn respond(
        status: StatusCode,
        error: &'static str,
        message: impl Into<String>,
    ) -> Response {
        (
            status,
            Json(Self {
                error,
                message: message.into(),
            }),
        )
            .into_response()
    }
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            DomainError::IntegrationNotFound(_) => ErrorBody::respond(
                StatusCode::NOT_FOUND,
                "integration_not_found",
                self.0.to_string(),
            ),
            DomainError::Validation(_) => ErrorBody::respond(
                StatusCode::BAD_REQUEST,
                "validation_error",
                self.0.to_string(),
            ),
            DomainError::NotConnected(_) => ErrorBody::respond(
                StatusCode::CONFLICT,
                "integration_not_connected",
                "integration not connected",
            ),
            // Internal details stay in the logs.
            DomainError::Ledger(_) | DomainError::Infrastructure(_) => {
                error!(error = %self.0, "request failed");
                ErrorBody::respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error",
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use uuid::Uuid;

    async fn render(err: DomainError) -> (StatusCode, Value) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body_bytes).unwrap())
    }

    #[tokio::test]
    async fn test_integration_not_found_maps_to_404() {
        let (status, body) = render(DomainError::IntegrationNotFound(Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "integration_not_found");
    }

    #[tokio::test]
    async fn test_validation_maps_to_400_with_reason() {
        let (status, body) = render(DomainError::Validation("missing event name".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("missing event name"));
    }

    #[tokio::test]
    async fn test_not_connected_maps_to_409() {
        let (status, body) = render(DomainError::NotConnected(Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "integration_not_connected");
        assert_eq!(body["message"], "integration not connected");
    }

    #[tokio::test]
    async fn test_ledger_failure_maps_to_generic_500() {
        let (status, body) = render(DomainError::Ledger("relation does not exist".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "internal error");
    }

    #[tokio::test]
    async fn test_infrastructure_does_not_leak_details() {
        let (status, body) = render(DomainError::Infrastructure("db password wrong".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("password"));
    }
}
