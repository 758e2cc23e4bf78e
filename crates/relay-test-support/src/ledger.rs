//! Test ledgers: mock `IdempotencyLedger` implementations for tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::error::DomainError;
use relay_core::ledger::{Claim, IdempotencyLedger};
use uuid::Uuid;

/// A ledger backed by a `HashSet`. The set insert is the uniqueness check, so
/// concurrent claims for the same pair race exactly like the database does.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    rows: Mutex<HashSet<(Uuid, String)>>,
    names: Mutex<Vec<String>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successfully claimed rows.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Returns `true` when nothing has been claimed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the pair has been claimed.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn contains(&self, tenant_id: Uuid, event_id: &str) -> bool {
        self.rows
            .lock()
            .unwrap()
            .contains(&(tenant_id, event_id.to_owned()))
    }

    /// Event names of claimed rows, in claim order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn claimed_names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdempotencyLedger for InMemoryLedger {
    async fn claim(
        &self,
        tenant_id: Uuid,
        event_id: &str,
        event_name: &str,
    ) -> Result<Claim, DomainError> {
        let inserted = self
            .rows
            .lock()
            .unwrap()
            .insert((tenant_id, event_id.to_owned()));
        if inserted {
            self.names.lock().unwrap().push(event_name.to_owned());
            Ok(Claim::Claimed)
        } else {
            Ok(Claim::AlreadyClaimed)
        }
    }
}

/// A ledger that always fails with a storage error.
#[derive(Debug)]
pub struct FailingLedger;

#[async_trait]
impl IdempotencyLedger for FailingLedger {
    async fn claim(
        &self,
        _tenant_id: Uuid,
        _event_id: &str,
        _event_name: &str,
    ) -> Result<Claim, DomainError> {
        Err(DomainError::Ledger("connection refused".into()))
    }
}
