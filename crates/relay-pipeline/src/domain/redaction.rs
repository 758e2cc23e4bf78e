//! PII redaction for persisted payloads.
//!
//! Output is for the audit trail only. The upstream always receives the
//! un-redacted normalized payload.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value, json};

use super::event_id::sha256_hex;

/// Hex characters of the correlation hash kept for masked emails.
pub const EMAIL_HASH_HEX_LEN: usize = 16;

/// Minimum digit count for a value to be treated as a phone number.
pub const PHONE_MIN_DIGITS: usize = 7;

const MASK: &str = "***";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Redacts a payload, preserving its array/object shape.
#[must_use]
pub fn redact(value: &Value) -> Value {
    redact_with_key(None, value)
}

fn redact_with_key(key: Option<&str>, value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_with_key(Some(k), v)))
                .collect::<Map<_, _>>(),
        ),
        // Array elements inherit the parent key, so `emails: [..]` is masked.
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| redact_with_key(key, item))
                .collect(),
        ),
        Value::String(s) => redact_leaf(key, s).unwrap_or_else(|| value.clone()),
        Value::Number(n) => match key {
            Some(k) if is_pii_key(k) => {
                redact_leaf(Some(k), &n.to_string()).unwrap_or_else(|| value.clone())
            }
            _ => value.clone(),
        },
        other => other.clone(),
    }
}

fn is_pii_key(key: &str) -> bool {
    let key = key.to_lowercase();
    key.contains("email") || key.contains("phone")
}

/// Masks one leaf, or returns `None` if it is not personal data.
fn redact_leaf(key: Option<&str>, raw: &str) -> Option<Value> {
    let key = key.map(str::to_lowercase).unwrap_or_default();

    if key.contains("email") || EMAIL_PATTERN.is_match(raw) {
        return Some(json!({
            "masked": mask_email(raw),
            "hash": &sha256_hex(raw.as_bytes())[..EMAIL_HASH_HEX_LEN],
        }));
    }

    if key.contains("phone") || digits(raw).len() >= PHONE_MIN_DIGITS {
        return Some(json!({ "masked": mask_phone(raw) }));
    }

    None
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// `jane.doe@example.com` becomes `ja***@example.com`.
fn mask_email(raw: &str) -> String {
    let masked = match raw.rsplit_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{visible}{MASK}@{domain}")
        }
        None => MASK.to_owned(),
    };
    never_containing(masked, raw)
}

/// `+1 (555) 123-4567` becomes `***4567`.
fn mask_phone(raw: &str) -> String {
    let digits = digits(raw);
    let masked = if digits.len() > 4 {
        format!("{MASK}{}", &digits[digits.len() - 4..])
    } else {
        MASK.to_owned()
    };
    never_containing(masked, raw)
}

fn never_containing(masked: String, raw: &str) -> String {
    if masked.contains(raw) {
        MASK.to_owned()
    } else {
        masked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked_strings(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (key, inner) in map {
                    if key == "masked" {
                        out.push(inner.as_str().unwrap().to_owned());
                    }
                    masked_strings(inner, out);
                }
            }
            Value::Array(items) => items.iter().for_each(|item| masked_strings(item, out)),
            _ => {}
        }
    }

    #[test]
    fn test_email_under_email_key_is_masked_and_hashed() {
        let redacted = redact(&json!({"email": "jane.doe@example.com"}));

        assert_eq!(redacted["email"]["masked"], "ja***@example.com");
        let hash = redacted["email"]["hash"].as_str().unwrap();
        assert_eq!(hash.len(), EMAIL_HASH_HEX_LEN);
        assert_eq!(hash, &sha256_hex(b"jane.doe@example.com")[..EMAIL_HASH_HEX_LEN]);
    }

    #[test]
    fn test_email_hash_is_stable_for_correlation() {
        let a = redact(&json!({"email": "jane@example.com"}));
        let b = redact(&json!({"note": "jane@example.com"}));
        assert_eq!(a["email"]["hash"], b["note"]["hash"]);
    }

    #[test]
    fn test_email_like_value_under_unrelated_key_is_masked() {
        let redacted = redact(&json!({"properties": {"customer": "bob@shop.io"}}));
        assert_eq!(redacted["properties"]["customer"]["masked"], "bo***@shop.io");
    }

    #[test]
    fn test_email_key_is_case_insensitive() {
        let redacted = redact(&json!({"BillingEMAIL": "not-an-address"}));
        assert_eq!(redacted["BillingEMAIL"]["masked"], MASK);
    }

    #[test]
    fn test_phone_under_phone_key_shows_last_four() {
        let redacted = redact(&json!({"contact": {"phoneNumber": "+1 (555) 123-4567"}}));
        assert_eq!(redacted["contact"]["phoneNumber"], json!({"masked": "***4567"}));
    }

    #[test]
    fn test_long_digit_run_under_unrelated_key_is_masked() {
        let redacted = redact(&json!({"ref": "555-123-9876"}));
        assert_eq!(redacted["ref"], json!({"masked": "***9876"}));
    }

    #[test]
    fn test_short_phone_is_fully_masked() {
        let redacted = redact(&json!({"phone": "1234"}));
        assert_eq!(redacted["phone"], json!({"masked": MASK}));
    }

    #[test]
    fn test_numeric_phone_is_masked() {
        let redacted = redact(&json!({"phone": 15_551_234_567_u64}));
        assert_eq!(redacted["phone"], json!({"masked": "***4567"}));
    }

    #[test]
    fn test_other_leaves_pass_through() {
        let input = json!({
            "sku": "A-12",
            "qty": 3,
            "price": 19_999_999,
            "gift": true,
            "title": "Blue mug"
        });
        assert_eq!(redact(&input), input);
    }

    #[test]
    fn test_shape_is_preserved() {
        let redacted = redact(&json!({
            "emails": ["a1@x.io", "b2@y.io"],
            "items": [{"sku": "1"}, {"sku": "2"}]
        }));

        assert_eq!(redacted["emails"].as_array().unwrap().len(), 2);
        assert_eq!(redacted["emails"][1]["masked"], "b2***@y.io");
        assert_eq!(redacted["items"], json!([{"sku": "1"}, {"sku": "2"}]));
    }

    #[test]
    fn test_masked_fields_never_contain_raw_values() {
        let raws = [
            "jane@example.com",
            "jo@example.com",
            "a@b.co",
            "x@y.z",
            "+1 555 123 4567",
            "5551234",
            "12345",
            "1234",
            "***@ex.io",
            "***4567",
        ];
        for raw in raws {
            for key in ["email", "phone", "note"] {
                let redacted = redact(&json!({ key: raw }));
                let mut masks = Vec::new();
                masked_strings(&redacted, &mut masks);
                for masked in masks {
                    assert!(
                        !masked.contains(raw),
                        "masked {masked:?} leaks raw {raw:?} under key {key}"
                    );
                }
            }
        }
    }
}
