//! Filter-group extraction and normalization.
//!
//! The `filterGroups` field has shipped both as a bare array and as
//! `{ "groups": [...] }`. Both shapes normalize to the same output.

use serde_json::Value;

use crate::fields::get_string;
use crate::types::{FilterField, FilterGroup};

const DEFAULT_GROUP_TITLE: &str = "Filters";

/// Unwrap the raw `filterGroups` value. Any other shape yields no groups.
pub fn extract_filter_groups(raw: Option<&Value>) -> Vec<Value> {
    match raw {
        Some(Value::Array(groups)) => groups.clone(),
        Some(Value::Object(wrapper)) => match wrapper.get("groups") {
            Some(Value::Array(groups)) => groups.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Normalize groups positionally. The output always has the input's length.
///
/// Groups without an `id` get `group-<index>`, which changes if the source
/// array is reordered.
pub fn normalize_filter_groups(raw_groups: &[Value]) -> Vec<FilterGroup> {
    raw_groups
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let group = raw.as_object();
            let get = |key: &str| group.and_then(|g| g.get(key));

            let options = match get("options") {
                Some(Value::Array(options)) => options.iter().map(option_label).collect(),
                _ => Vec::new(),
            };

            FilterGroup {
                id: get_string(get("id")).unwrap_or_else(|| format!("group-{index}")),
                title: get_string(get("title")).unwrap_or_else(|| DEFAULT_GROUP_TITLE.to_string()),
                field: get("field")
                    .and_then(Value::as_str)
                    .and_then(FilterField::parse)
                    .unwrap_or_default(),
                options,
            }
        })
        .collect()
}

fn option_label(option: &Value) -> String {
    match option {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
