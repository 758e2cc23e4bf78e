//! Audit log abstraction.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;

/// Direction recorded on every relay audit row.
pub const DIRECTION_OUTBOUND: &str = "outbound";

/// Kind recorded on every relay audit row.
pub const KIND_EVENT: &str = "event";

/// A redacted record of one inbound request and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEntry {
    /// Tenant that sent the event.
    pub tenant_id: Uuid,
    /// Always [`DIRECTION_OUTBOUND`].
    pub direction: &'static str,
    /// Always [`KIND_EVENT`].
    pub kind: &'static str,
    /// Canonical event name.
    pub name: String,
    /// Outcome status code.
    pub status_code: Option<u16>,
    /// Redacted outbound payload.
    pub request: serde_json::Value,
    /// Redacted upstream response or error detail.
    pub response: serde_json::Value,
}

impl AuditEntry {
    /// Creates an outbound event entry.
    #[must_use]
    pub fn outbound_event(
        tenant_id: Uuid,
        name: impl Into<String>,
        status_code: Option<u16>,
        request: serde_json::Value,
        response: serde_json::Value,
    ) -> Self {
        Self {
            tenant_id,
            direction: DIRECTION_OUTBOUND,
            kind: KIND_EVENT,
            name: name.into(),
            status_code,
            request,
            response,
        }
    }
}

/// Append-only sink for audit entries.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Persists one entry.
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError>;
}
