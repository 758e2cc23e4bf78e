//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Deduplicated, skipped and upstream-rejected events are not errors; they
/// are reported as pipeline outcomes.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No integration record exists for the tenant.
    #[error("integration not found for tenant {0}")]
    IntegrationNotFound(Uuid),

    /// Malformed or incomplete event input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The tenant's integration is disabled, errored, or has no credential.
    #[error("integration not connected for tenant {0}")]
    NotConnected(Uuid),

    /// The idempotency ledger could not resolve a claim.
    #[error("ledger error: {0}")]
    Ledger(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
