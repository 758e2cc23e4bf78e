//! Maps raw client input onto a [`NormalizedEvent`].

use chrono::{DateTime, Utc};
use relay_core::clock::{Clock, wire_timestamp};
use relay_core::error::DomainError;
use serde_json::{Map, Value};

use super::aliases::{canonical_event_name, default_event_version};
use super::cleaning::clean_map;
use super::contact::Contact;
use super::event::NormalizedEvent;
use super::event_id::derive_event_id;

/// Origin recorded when the caller does not name one.
pub const DEFAULT_ORIGIN: &str = "api";

/// Normalizes a raw event body.
///
/// An event without a usable contact identity is still returned, flagged
/// with `skipped_missing_identity`.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the body is not an object, the name
/// is missing or blank, `eventTime` is not RFC 3339, or `properties` is not
/// an object.
pub fn normalize(raw: &Value, clock: &dyn Clock) -> Result<NormalizedEvent, DomainError> {
    let body = raw
        .as_object()
        .ok_or_else(|| validation("event payload must be a JSON object"))?;

    let event_name = ["eventName", "name"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).and_then(canonical_event_name))
        .ok_or_else(|| validation("missing event name"))?;

    let properties = match body.get("properties") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => clean_map(map),
        Some(_) => return Err(validation("properties must be an object")),
    };

    let contact = Contact::from_body(body);

    let event_id = non_blank(body, &["eventID", "eventId"])
        .map_or_else(|| derive_event_id(&event_name, &contact, &properties), str::to_owned);

    let event_time = match non_blank(body, &["eventTime"]) {
        Some(raw_time) => parse_event_time(raw_time)?,
        None if matches!(body.get("eventTime"), None | Some(Value::Null | Value::String(_))) => {
            clock.timestamp()
        }
        None => return Err(validation("invalid eventTime")),
    };

    let origin = non_blank(body, &["origin"]).unwrap_or(DEFAULT_ORIGIN).to_owned();

    let event_version = non_blank(body, &["eventVersion"])
        .map(str::to_owned)
        .or_else(|| default_event_version(&event_name).map(str::to_owned));

    Ok(NormalizedEvent {
        skipped_missing_identity: !contact.has_identity(),
        event_name,
        event_id,
        event_time,
        origin,
        event_version,
        contact,
        properties,
    })
}

fn validation(message: &str) -> DomainError {
    DomainError::Validation(message.to_owned())
}

/// First non-blank string among `keys`, trimmed.
fn non_blank<'a>(body: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn parse_event_time(raw: &str) -> Result<String, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| wire_timestamp(parsed.with_timezone(&Utc)))
        .map_err(|_| validation("invalid eventTime"))
}
