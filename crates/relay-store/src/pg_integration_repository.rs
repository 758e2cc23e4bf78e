//! `PostgreSQL` implementation of the `IntegrationRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use relay_core::error::DomainError;
use relay_core::integration::{IntegrationRecord, IntegrationRepository};

#[derive(Debug, FromRow)]
struct IntegrationRow {
    tenant_id: Uuid,
    status: String,
    credential: Option<String>,
    last_event_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    last_error_at: Option<DateTime<Utc>>,
}

impl TryFrom<IntegrationRow> for IntegrationRecord {
    type Error = DomainError;

    fn try_from(row: IntegrationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            tenant_id: row.tenant_id,
            status: row.status.parse()?,
            credential: row.credential,
            last_event_at: row.last_event_at,
            last_error: row.last_error,
            last_error_at: row.last_error_at,
        })
    }
}

/// PostgreSQL-backed integration repository.
#[derive(Debug, Clone)]
pub struct PgIntegrationRepository {
    pool: PgPool,
}

impl PgIntegrationRepository {
    /// Creates a new `PgIntegrationRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IntegrationRepository for PgIntegrationRepository {
    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<IntegrationRecord>, DomainError> {
        let row = sqlx::query_as::<_, IntegrationRow>(
            "SELECT tenant_id, status, credential, last_event_at, last_error, last_error_at \
             FROM integrations WHERE tenant_id = $1",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure(format!("failed to load integration: {e}")))?;

        row.map(IntegrationRecord::try_from).transpose()
    }

    async fn save_health(&self, record: &IntegrationRecord) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE integrations \
             SET status = $2, last_event_at = $3, last_error = $4, last_error_at = $5, \
                 updated_at = NOW() \
             WHERE tenant_id = $1",
        )
        .bind(record.tenant_id)
        .bind(record.status.as_str())
        .bind(record.last_event_at)
        .bind(record.last_error.as_deref())
        .bind(record.last_error_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Infrastructure(format!("failed to save integration: {e}")))?;

        Ok(())
    }
}
