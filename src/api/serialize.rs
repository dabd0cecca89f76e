// Copyright (c) 2025 - Cowboy AI, Inc.
//! Response filter for unresolved back-links

use serde_json::Value;

use crate::store::BACKLINK_MARKER;

fn is_placeholder(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|fields| fields.len() == 1 && fields.contains_key(BACKLINK_MARKER))
}

/// Replace every back-link placeholder with `null`, at any depth
pub fn strip_placeholders(value: Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| {
                    if is_placeholder(&value) {
                        (key, Value::Null)
                    } else {
                        (key, strip_placeholders(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|item| !is_placeholder(item))
                .map(strip_placeholders)
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_nested_placeholders_become_null() {
        let view = json!({
            "name": "R1",
            "physical_interface": {"$backlink": "interfaces"},
            "location": {"name": "POA", "tags": [{"$backlink": "x"}, 1]},
        });
        assert_eq!(
            strip_placeholders(view),
            json!({
                "name": "R1",
                "physical_interface": null,
                "location": {"name": "POA", "tags": [1]},
            })
        );
    }

    #[test]
    fn test_plain_objects_are_kept() {
        let value = json!({"options": {"$backlink": "a", "other": 1}});
        assert_eq!(strip_placeholders(value.clone()), value);
    }
}
