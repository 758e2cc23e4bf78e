//! Shared test mocks and utilities for the storefront event relay.

mod audit;
mod clock;
mod integration;
mod ledger;
mod rng;
mod upstream;

pub use audit::{FailingAuditLog, RecordingAuditLog};
pub use clock::FixedClock;
pub use integration::{FailingIntegrationRepository, InMemoryIntegrationRepository};
pub use ledger::{FailingLedger, InMemoryLedger};
pub use rng::{MockRng, SequenceRng};
pub use upstream::ScriptedTransport;
