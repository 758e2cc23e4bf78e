//! Contact extraction from the accepted legacy request shapes.
//!
//! Accepted shapes, nested fields winning over top-level ones:
//!
//! | field       | nested under `contact`          | top level                             |
//! |-------------|---------------------------------|---------------------------------------|
//! | `id`        | `id`, `contactID`, `contactId`  | `contactID`, `contactId`, `contact_id` |
//! | `email`     | `email`                         | `email`                               |
//! | `phone`     | `phone`, `phoneNumber`          | `phone`, `phoneNumber`                |
//! | `firstName` | `firstName`, `first_name`       | `firstName`, `first_name`             |
//! | `lastName`  | `lastName`, `last_name`         | `lastName`, `last_name`               |

use serde::Serialize;
use serde_json::{Map, Value};

const NESTED_ID: &[&str] = &["id", "contactID", "contactId"];
const TOP_LEVEL_ID: &[&str] = &["contactID", "contactId", "contact_id"];
const EMAIL: &[&str] = &["email"];
const PHONE: &[&str] = &["phone", "phoneNumber"];
const FIRST_NAME: &[&str] = &["firstName", "first_name"];
const LAST_NAME: &[&str] = &["lastName", "last_name"];

/// The person an event is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Upstream contact identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Contact {
    /// Builds a contact from a raw request body.
    #[must_use]
    pub fn from_body(body: &Map<String, Value>) -> Self {
        let nested = body.get("contact").and_then(Value::as_object);
        let pick = |nested_keys: &[&str], top_keys: &[&str], numeric: bool| {
            nested
                .and_then(|contact| text_field(contact, nested_keys, numeric))
                .or_else(|| text_field(body, top_keys, numeric))
        };

        Self {
            id: pick(NESTED_ID, TOP_LEVEL_ID, true),
            email: pick(EMAIL, EMAIL, false),
            phone: pick(PHONE, PHONE, true),
            first_name: pick(FIRST_NAME, FIRST_NAME, false),
            last_name: pick(LAST_NAME, LAST_NAME, false),
        }
    }

    /// Returns `true` when the upstream can resolve a person from this
    /// contact, i.e. any of `id`, `email` or `phone` is present.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.email.is_some() || self.phone.is_some()
    }
}

/// First non-blank value among `keys`, trimmed. Numbers are accepted and
/// stringified when `numeric` is set.
fn text_field(map: &Map<String, Value>, keys: &[&str], numeric: bool) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) if numeric => Some(n.to_string()),
        _ => None,
    })
}
