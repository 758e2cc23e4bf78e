//! Test integration repositories.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::error::DomainError;
use relay_core::integration::{IntegrationRecord, IntegrationRepository, IntegrationStatus};
use uuid::Uuid;

/// An integration repository backed by a `HashMap`. Records every
/// `save_health` call.
#[derive(Debug, Default)]
pub struct InMemoryIntegrationRepository {
    records: Mutex<HashMap<Uuid, IntegrationRecord>>,
    saves: Mutex<Vec<IntegrationRecord>>,
}

impl InMemoryIntegrationRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding one connected integration.
    #[must_use]
    pub fn with_connected(tenant_id: Uuid, credential: &str) -> Self {
        let repo = Self::new();
        repo.insert(IntegrationRecord {
            tenant_id,
            status: IntegrationStatus::Connected,
            credential: Some(credential.to_owned()),
            last_event_at: None,
            last_error: None,
            last_error_at: None,
        });
        repo
    }

    /// Inserts or replaces a record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert(&self, record: IntegrationRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.tenant_id, record);
    }

    /// Returns the current record for a tenant.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn get(&self, tenant_id: Uuid) -> Option<IntegrationRecord> {
        self.records.lock().unwrap().get(&tenant_id).cloned()
    }

    /// Returns a snapshot of every record passed to `save_health`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<IntegrationRecord> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl IntegrationRepository for InMemoryIntegrationRepository {
    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<IntegrationRecord>, DomainError> {
        Ok(self.get(tenant_id))
    }

    async fn save_health(&self, record: &IntegrationRecord) -> Result<(), DomainError> {
        self.saves.lock().unwrap().push(record.clone());
        self.insert(record.clone());
        Ok(())
    }
}

/// Returns a fixed record on load but fails every `save_health`.
#[derive(Debug)]
pub struct FailingIntegrationRepository(pub IntegrationRecord);

#[async_trait]
impl IntegrationRepository for FailingIntegrationRepository {
    async fn find_by_tenant(
        &self,
        _tenant_id: Uuid,
    ) -> Result<Option<IntegrationRecord>, DomainError> {
        Ok(Some(self.0.clone()))
    }

    async fn save_health(&self, _record: &IntegrationRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
