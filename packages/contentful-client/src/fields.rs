//! Total accessors over untyped field values.
//!
//! Each accessor checks the runtime JSON type and returns `None` (or an empty
//! collection) on mismatch. None of them coerce between types.

use serde_json::{Map, Value};

pub fn get_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

pub fn get_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

pub fn get_bool(value: Option<&Value>) -> Option<bool> {
    value.and_then(Value::as_bool)
}

/// String elements of an array; non-string elements are dropped.
pub fn get_string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

pub fn get_object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// First present string among `keys`.
pub(crate) fn first_string(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| get_string(fields.get(*key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_reject_wrong_types() {
        assert_eq!(get_string(Some(&json!(42))), None);
        assert_eq!(get_number(Some(&json!("42"))), None);
        assert_eq!(get_bool(Some(&json!("true"))), None);
        assert_eq!(get_string(None), None);
    }

    #[test]
    fn test_accessors_accept_matching_types() {
        assert_eq!(get_string(Some(&json!("x"))), Some("x".to_string()));
        assert_eq!(get_number(Some(&json!(3))), Some(3.0));
        assert_eq!(get_number(Some(&json!(-1.5))), Some(-1.5));
        assert_eq!(get_bool(Some(&json!(false))), Some(false));
    }

    #[test]
    fn test_string_array_filters_non_strings() {
        let value = json!(["rust", 7, null, "cli", { "a": 1 }]);
        assert_eq!(get_string_array(Some(&value)), vec!["rust", "cli"]);
        assert!(get_string_array(Some(&json!("rust"))).is_empty());
        assert!(get_string_array(None).is_empty());
    }

    #[test]
    fn test_first_string_falls_through() {
        let fields = json!({ "internalName": 1, "slug": "fallback" });
        let fields = fields.as_object().unwrap();
        assert_eq!(
            first_string(fields, &["internalName", "slug"]),
            Some("fallback".to_string())
        );
        assert_eq!(first_string(fields, &["missing"]), None);
    }
}
