//! Activity feed rows: a log entry joined with the account that performed it,
//! plus a flattened view of the recorded changes.

use super::aggregate::{ActionType, ActivityLog};
use crate::domain::common::search::{contains_ci, normalize_query};
use crate::domain::common::Searchable;
use crate::system::auth::UserRole;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Embedded `profiles:user_id(full_name,avatar_url,role)` fragment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorRef {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActivityLogRecord {
    #[serde(flatten)]
    pub log: ActivityLog,
    #[serde(default)]
    pub profiles: Option<ActorRef>,
}

impl ActivityLogRecord {
    pub fn actor_name(&self) -> Option<&str> {
        self.profiles.as_ref().and_then(|p| p.full_name.as_deref())
    }

    pub fn has_action(&self, action: Option<&ActionType>) -> bool {
        action.map(|a| &self.log.action_type == a).unwrap_or(true)
    }
}

impl Searchable for ActivityLogRecord {
    fn matches_filter(&self, filter: &str) -> bool {
        let Some(q) = normalize_query(filter) else {
            return true;
        };
        contains_ci(self.log.details.as_deref(), &q)
            || contains_ci(self.actor_name(), &q)
            || contains_ci(Some(self.log.action_type.as_str()), &q)
            || contains_ci(Some(self.log.entity_type.as_str()), &q)
    }
}

/// One changed field; `before` is `None` for snapshot-style entries
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeLine {
    pub field: String,
    pub before: Option<String>,
    pub after: String,
}

fn field_label(key: &str) -> String {
    key.replace('_', " ")
}

fn render(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Flatten a `changes` payload for display.
///
/// Diffs (`{"old": {..}, "new": {..}}`) become before/after pairs; any other
/// object is shown as a snapshot. Password fields are never shown.
pub fn change_lines(changes: &Value) -> Vec<ChangeLine> {
    let empty = Map::new();
    match (changes.get("old").and_then(Value::as_object), changes.get("new").and_then(Value::as_object)) {
        (Some(old), Some(new)) => {
            let mut keys: Vec<&String> = old.keys().chain(new.keys()).collect();
            keys.sort();
            keys.dedup();
            keys.into_iter()
                .filter(|k| k.as_str() != "password")
                .map(|k| ChangeLine {
                    field: field_label(k),
                    before: Some(render(old.get(k))),
                    after: render(new.get(k)),
                })
                .collect()
        }
        _ => changes
            .as_object()
            .unwrap_or(&empty)
            .iter()
            .filter(|(k, _)| k.as_str() != "password")
            .map(|(k, v)| ChangeLine {
                field: field_label(k),
                before: None,
                after: render(Some(v)),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_activity_log::aggregate::EntityType;
    use serde_json::json;

    fn record() -> ActivityLogRecord {
        serde_json::from_value(json!({
            "id": "33333333-3333-4333-8333-333333333333",
            "user_id": "22222222-2222-4222-8222-222222222222",
            "action_type": "UPDATE",
            "entity_type": "DEPARTMENT",
            "entity_id": null,
            "details": "Updated department Choir",
            "changes": null,
            "created_at": "2024-03-15T14:02:26+00:00",
            "profiles": { "full_name": "Pastor Dawit", "avatar_url": null, "role": "pastor" }
        }))
        .unwrap()
    }

    #[test]
    fn test_record_with_actor() {
        let r = record();
        assert_eq!(r.actor_name(), Some("Pastor Dawit"));
        assert_eq!(r.log.entity_type, EntityType::Department);
        assert!(r.matches_filter("dawit"));
        assert!(r.matches_filter("department"));
        assert!(!r.matches_filter("member"));
        assert!(r.has_action(None));
        assert!(r.has_action(Some(&ActionType::Update)));
        assert!(!r.has_action(Some(&ActionType::Delete)));
    }

    #[test]
    fn test_change_lines_from_diff() {
        let lines = change_lines(&json!({
            "old": { "name": "Choir", "full_name": null },
            "new": { "name": "Youth Choir", "full_name": "A" }
        }));
        assert_eq!(
            lines,
            vec![
                ChangeLine { field: "full name".into(), before: Some("-".into()), after: "A".into() },
                ChangeLine { field: "name".into(), before: Some("Choir".into()), after: "Youth Choir".into() },
            ]
        );
    }

    #[test]
    fn test_change_lines_snapshot_hides_password() {
        let lines = change_lines(&json!({ "email": "a@b.c", "password": "x", "age": 4 }));
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.before.is_none()));
        assert!(lines.iter().any(|l| l.field == "age" && l.after == "4"));
    }

    #[test]
    fn test_change_lines_non_object() {
        assert!(change_lines(&Value::Null).is_empty());
    }
}
