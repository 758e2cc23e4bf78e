//! Idempotency ledger abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Result of attempting to claim an event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// This call reserved the identifier and may deliver.
    Claimed,
    /// Another call already holds the identifier.
    AlreadyClaimed,
}

impl Claim {
    /// Returns `true` when this call won the claim.
    #[must_use]
    pub fn is_claimed(self) -> bool {
        matches!(self, Self::Claimed)
    }
}

/// A uniquely-constrained store of `(tenant_id, event_id)` pairs.
///
/// The uniqueness constraint is the only concurrency primitive: of any number
/// of concurrent claims for the same pair, exactly one observes
/// [`Claim::Claimed`].
#[async_trait]
pub trait IdempotencyLedger: Send + Sync {
    /// Inserts the triple, reporting a uniqueness violation as
    /// [`Claim::AlreadyClaimed`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Ledger` for any other storage failure.
    async fn claim(
        &self,
        tenant_id: Uuid,
        event_id: &str,
        event_name: &str,
    ) -> Result<Claim, DomainError>;
}
