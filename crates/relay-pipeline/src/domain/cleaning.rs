//! Recursive removal of empty values.
//!
//! `null`, blank strings, and arrays/objects that end up empty are dropped.
//! Numbers and booleans are kept as they are, including `0` and `false`.

use serde_json::{Map, Value};

/// Cleans a value. Returns `None` when nothing survives.
#[must_use]
pub fn clean(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::Array(items) => {
            let cleaned: Vec<Value> = items.iter().filter_map(clean).collect();
            (!cleaned.is_empty()).then_some(Value::Array(cleaned))
        }
        Value::Object(map) => {
            let cleaned = clean_map(map);
            (!cleaned.is_empty()).then_some(Value::Object(cleaned))
        }
        other => Some(other.clone()),
    }
}

/// Cleans every entry of an object, keeping the (possibly empty) object.
#[must_use]
pub fn clean_map(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter_map(|(key, value)| clean(value).map(|cleaned| (key.clone(), cleaned)))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_clean_drops_nulls_and_blank_strings() {
        let input = json!({"a": null, "b": "  ", "c": "x", "d": ""});
        assert_eq!(clean(&input), Some(json!({"c": "x"})));
    }

    #[test]
    fn test_clean_drops_containers_that_become_empty() {
        let input = json!({
            "nested": {"inner": {"gone": null}},
            "list": [null, "", {}],
            "keep": [{"sku": "A1"}, null]
        });
        assert_eq!(clean(&input), Some(json!({"keep": [{"sku": "A1"}]})));
    }

    #[test]
    fn test_clean_preserves_numbers_and_booleans() {
        let input = json!({"qty": 0, "price": 12.5, "gift": false, "tags": [true, 0]});
        assert_eq!(clean(&input), Some(input.clone()));
    }

    #[test]
    fn test_clean_preserves_non_blank_strings_verbatim() {
        let input = json!({"note": "  padded  "});
        assert_eq!(clean(&input), Some(input.clone()));
    }

    #[test]
    fn test_clean_of_entirely_empty_value_is_none() {
        assert_eq!(clean(&json!(null)), None);
        assert_eq!(clean(&json!({"a": {"b": [null]}})), None);
        assert_eq!(clean(&json!([])), None);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            json!({"a": null, "b": {"c": "", "d": [1, null, {"e": " "}]}, "f": "g"}),
            json!([[[]], {"x": {"y": null}}, "z", 0, false]),
            json!({"deep": {"er": {"est": {"value": "ok", "blank": "\n"}}}}),
            json!("plain"),
            json!(42),
        ];
        for sample in samples {
            let once = clean(&sample);
            let twice = once.as_ref().and_then(clean);
            assert_eq!(once, twice, "clean is not idempotent for {sample}");
        }
    }
}
