//! `PostgreSQL` implementation of the `AuditLog` trait.

use async_trait::async_trait;
use sqlx::PgPool;

use relay_core::audit::{AuditEntry, AuditLog};
use relay_core::error::DomainError;

/// PostgreSQL-backed, append-only audit log.
#[derive(Debug, Clone)]
pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    /// Creates a new `PgAuditLog`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO audit_log \
             (tenant_id, direction, kind, name, status_code, request, response) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.tenant_id)
        .bind(entry.direction)
        .bind(entry.kind)
        .bind(&entry.name)
        .bind(entry.status_code.map(i32::from))
        .bind(&entry.request)
        .bind(&entry.response)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure(format!("failed to append audit entry: {e}")))?;

        Ok(())
    }
}
