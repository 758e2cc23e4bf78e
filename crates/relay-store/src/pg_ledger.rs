//! `PostgreSQL` implementation of the `IdempotencyLedger` trait.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use relay_core::error::DomainError;
use relay_core::ledger::{Claim, IdempotencyLedger};

/// PostgreSQL-backed idempotency ledger.
///
/// The `UNIQUE (tenant_id, event_id)` constraint on `event_ledger` decides
/// every race, across processes as well as tasks.
#[derive(Debug, Clone)]
pub struct PgIdempotencyLedger {
    pool: PgPool,
}

impl PgIdempotencyLedger {
    /// Creates a new `PgIdempotencyLedger`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdempotencyLedger for PgIdempotencyLedger {
    async fn claim(
        &self,
        tenant_id: Uuid,
        event_id: &str,
        event_name: &str,
    ) -> Result<Claim, DomainError> {
        let result = sqlx::query(
            "INSERT INTO event_ledger (tenant_id, event_id, event_name) VALUES ($1, $2, $3)",
        )
        .bind(tenant_id)
        .bind(event_id)
        .bind(event_name)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Claim::Claimed),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                debug!(%tenant_id, event_id, "ledger claim already held");
                Ok(Claim::AlreadyClaimed)
            }
            Err(e) => Err(DomainError::Ledger(format!("failed to claim event id: {e}"))),
        }
    }
}
