//! Upstream transport abstraction.
//!
//! A transport performs exactly one HTTP call. Retry policy lives above it.

use async_trait::async_trait;
use thiserror::Error;

/// Network-level failure talking to the upstream API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete before the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// The connection could not be established.
    #[error("upstream connection failed: {0}")]
    Connect(String),

    /// Any other request failure.
    #[error("upstream request failed: {0}")]
    Request(String),
}

/// A completed upstream HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw `Retry-After` header, if present.
    pub retry_after: Option<String>,
    /// Response body; non-JSON bodies are wrapped as a JSON string.
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    /// Returns `true` for 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` for 401 and 403.
    #[must_use]
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

/// Sends one event payload to the upstream marketing API.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    /// Posts the payload using the tenant's credential.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no HTTP response was received.
    async fn post_event(
        &self,
        credential: &str,
        payload: &serde_json::Value,
    ) -> Result<UpstreamResponse, TransportError>;
}
