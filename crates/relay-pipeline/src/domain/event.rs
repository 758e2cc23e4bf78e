//! The canonical event shape sent upstream.

use serde_json::{Map, Value, json};

use super::cleaning::clean;
use super::contact::Contact;

/// A normalized event, ready for classification and delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    /// Canonical event name.
    pub event_name: String,
    /// Idempotency key; caller-supplied or derived.
    pub event_id: String,
    /// RFC 3339 timestamp in UTC.
    pub event_time: String,
    /// Free-text source tag.
    pub origin: String,
    /// Upstream schema version.
    pub event_version: Option<String>,
    /// The person this event is about.
    pub contact: Contact,
    /// Cleaned event-specific data.
    pub properties: Map<String, Value>,
    /// Set when the contact has no `id`, `email` or `phone`.
    pub skipped_missing_identity: bool,
}

impl NormalizedEvent {
    /// Builds the upstream JSON body with empty values stripped.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        let payload = json!({
            "eventName": self.event_name,
            "eventID": self.event_id,
            "eventTime": self.event_time,
            "origin": self.origin,
            "eventVersion": self.event_version,
            "contact": self.contact,
            "properties": self.properties,
        });
        clean(&payload).unwrap_or_else(|| Value::Object(Map::new()))
    }
}
