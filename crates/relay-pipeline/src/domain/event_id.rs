//! Deterministic event identifiers for callers that do not supply one.

use serde_json::{Map, Value, json};
use sha2::{Digest, Sha256};

use super::contact::Contact;

/// Prefix marking an identifier as system-generated.
pub const GENERATED_ID_PREFIX: &str = "auto_";

/// Hex characters of the digest kept in a generated identifier.
pub const GENERATED_ID_HEX_LEN: usize = 32;

/// Lower-case hex SHA-256 digest of `input`.
#[must_use]
pub fn sha256_hex(input: &[u8]) -> String {
    Sha256::digest(input)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Derives an event identifier from the event's content.
///
/// Identical `(event_name, contact, properties)` always yield the same
/// identifier, so repeated legacy calls collapse onto one ledger row. Object
/// keys serialize in sorted order, which keeps the hash input canonical.
#[must_use]
pub fn derive_event_id(
    event_name: &str,
    contact: &Contact,
    properties: &Map<String, Value>,
) -> String {
    let canonical = json!({
        "eventName": event_name,
        "contact": contact,
        "properties": properties,
    });
    let digest = sha256_hex(canonical.to_string().as_bytes());
    format!("{GENERATED_ID_PREFIX}{}", &digest[..GENERATED_ID_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(email: &str) -> Contact {
        Contact {
            email: Some(email.to_owned()),
            ..Contact::default()
        }
    }

    fn props(value: &Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_same_inputs_same_id() {
        let a = derive_event_id(
            "viewed product",
            &contact("a@x.io"),
            &props(&json!({"sku": "1", "qty": 2})),
        );
        let b = derive_event_id(
            "viewed product",
            &contact("a@x.io"),
            &props(&json!({"qty": 2, "sku": "1"})),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_changed_properties_change_id() {
        let a = derive_event_id(
            "viewed product",
            &contact("a@x.io"),
            &props(&json!({"sku": "1"})),
        );
        let b = derive_event_id(
            "viewed product",
            &contact("a@x.io"),
            &props(&json!({"sku": "2"})),
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_changed_contact_changes_id() {
        let a = derive_event_id("viewed product", &contact("a@x.io"), &Map::new());
        let b = derive_event_id("viewed product", &contact("b@x.io"), &Map::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_changed_name_changes_id() {
        let a = derive_event_id("viewed product", &contact("a@x.io"), &Map::new());
        let b = derive_event_id("started checkout", &contact("a@x.io"), &Map::new());
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_id_shape() {
        let id = derive_event_id("viewed product", &Contact::default(), &Map::new());
        assert!(id.starts_with(GENERATED_ID_PREFIX));
        let hex = &id[GENERATED_ID_PREFIX.len()..];
        assert_eq!(hex.len(), GENERATED_ID_HEX_LEN);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
