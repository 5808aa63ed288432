//! Field-level change sets stored in `activity_logs.changes`.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Bookkeeping columns that never show up in a change set
const IGNORED_KEYS: &[&str] = &[
    "id",
    "created_at",
    "updated_at",
    "user_id",
    "church_id",
    "department_id",
];

fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Returns `{ "old": {...}, "new": {...} }` with only the changed fields.
///
/// - `old` of `null` means a creation: the whole `new` object is returned.
/// - null, "" and absent are treated as the same value.
/// - `None` when nothing changed.
pub fn object_diff(old: &Value, new: &Value) -> Option<Value> {
    let (old_map, new_map) = match (old, new) {
        (Value::Null, _) => return Some(new.clone()),
        (Value::Object(o), Value::Object(n)) => (o, n),
        _ if old == new => return None,
        _ => {
            return Some(serde_json::json!({ "old": old, "new": new }));
        }
    };

    let keys: BTreeSet<&String> = old_map.keys().chain(new_map.keys()).collect();

    let mut old_out = Map::new();
    let mut new_out = Map::new();

    for key in keys {
        if IGNORED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let o = old_map.get(key);
        let n = new_map.get(key);
        if o == n {
            continue;
        }
        if is_blank(o) && is_blank(n) {
            continue;
        }
        old_out.insert(key.clone(), o.cloned().unwrap_or(Value::Null));
        new_out.insert(key.clone(), n.cloned().unwrap_or(Value::Null));
    }

    if old_out.is_empty() {
        None
    } else {
        Some(serde_json::json!({ "old": old_out, "new": new_out }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creation_returns_new_object() {
        let new = json!({"name": "Choir"});
        assert_eq!(object_diff(&Value::Null, &new), Some(new));
    }

    #[test]
    fn test_only_changed_fields() {
        let old = json!({"name": "Choir", "church": "Bole", "id": "1"});
        let new = json!({"name": "Choir B", "church": "Bole", "id": "2"});
        assert_eq!(
            object_diff(&old, &new),
            Some(json!({"old": {"name": "Choir"}, "new": {"name": "Choir B"}}))
        );
    }

    #[test]
    fn test_blank_values_are_equal() {
        let old = json!({"phone": null, "email": ""});
        let new = json!({"email": null});
        assert_eq!(object_diff(&old, &new), None);
    }

    #[test]
    fn test_arrays_compare_deeply() {
        let old = json!({"children": [{"name": "Liya"}]});
        let same = json!({"children": [{"name": "Liya"}]});
        let changed = json!({"children": [{"name": "Liya"}, {"name": "Noah"}]});
        assert_eq!(object_diff(&old, &same), None);
        assert!(object_diff(&old, &changed).is_some());
    }

    #[test]
    fn test_removed_field_becomes_null() {
        let old = json!({"location": "Addis"});
        let new = json!({});
        assert_eq!(
            object_diff(&old, &new),
            Some(json!({"old": {"location": "Addis"}, "new": {"location": null}}))
        );
    }
}
