//! Commands for the event pipeline.

use relay_core::command::Command;
use uuid::Uuid;

/// Command to relay one storefront event for a verified tenant.
#[derive(Debug, Clone)]
pub struct TrackEvent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The tenant resolved by the identity service.
    pub tenant_id: Uuid,
    /// The raw, untrusted request body.
    pub body: serde_json::Value,
}

impl Command for TrackEvent {
    fn command_type(&self) -> &'static str {
        "events.track_event"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}
