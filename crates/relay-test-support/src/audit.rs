//! Test audit logs.

use std::sync::Mutex;

use async_trait::async_trait;
use relay_core::audit::{AuditEntry, AuditLog};
use relay_core::error::DomainError;

/// An audit log that keeps every appended entry.
#[derive(Debug, Default)]
pub struct RecordingAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingAuditLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all appended entries.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuditLog for RecordingAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// An audit log whose writes always fail.
#[derive(Debug)]
pub struct FailingAuditLog;

#[async_trait]
impl AuditLog for FailingAuditLog {
    async fn append(&self, _entry: &AuditEntry) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }
}
