//! Query handlers for integration health.
//!
//! Views never expose the credential itself.

use chrono::{DateTime, Utc};
use relay_core::error::DomainError;
use relay_core::integration::{IntegrationRepository, IntegrationStatus};
use serde::Serialize;
use uuid::Uuid;

/// Read-only view of a tenant's integration health.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatusView {
    /// The tenant identifier.
    pub tenant_id: Uuid,
    /// Current connection status.
    pub status: IntegrationStatus,
    /// Whether events can currently be delivered.
    pub connected: bool,
    /// Whether a credential is configured.
    pub has_credential: bool,
    /// Time of the last successful delivery.
    pub last_event_at: Option<DateTime<Utc>>,
    /// Short description of the last failure.
    pub last_error: Option<String>,
    /// Time of the last failure.
    pub last_error_at: Option<DateTime<Utc>>,
}

/// Retrieves integration health for a tenant.
///
/// # Errors
///
/// Returns `DomainError::IntegrationNotFound` if the tenant has no record.
/// Returns `DomainError::Infrastructure` if the record cannot be loaded.
pub async fn get_integration_status(
    tenant_id: Uuid,
    repo: &dyn IntegrationRepository,
) -> Result<IntegrationStatusView, DomainError> {
    let record = repo
        .find_by_tenant(tenant_id)
        .await?
        .ok_or(DomainError::IntegrationNotFound(tenant_id))?;

    Ok(IntegrationStatusView {
        tenant_id,
        status: record.status,
        connected: record.usable_credential().is_some(),
        has_credential: record
            .credential
            .as_deref()
            .is_some_and(|credential| !credential.trim().is_empty()),
        last_event_at: record.last_event_at,
        last_error: record.last_error,
        last_error_at: record.last_error_at,
    })
}
