//! Relay Store: PostgreSQL implementations of the relay's persistence ports.

pub mod pg_audit_log;
pub mod pg_integration_repository;
pub mod pg_ledger;
