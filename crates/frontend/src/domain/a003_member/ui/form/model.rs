use crate::shared::api_utils::{eq, get_rows, insert_row, update_rows, ApiError};
use contracts::domain::a002_department::aggregate::Department;
use contracts::domain::a003_member::aggregate::Member;
use contracts::domain::a003_member::form::MemberDraft;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::system::auth::RowScope;
use serde_json::Value;
use web_sys::window;

const DRAFT_KEY: &str = "church-member-draft";

pub async fn fetch_member(id: &str) -> Result<Member, ApiError> {
    let rows: Vec<Member> = get_rows(
        Member::collection_name(),
        &[("select", "*".to_string()), eq("id", id)],
    )
    .await?;
    rows.into_iter().next().ok_or(ApiError::Empty)
}

/// Departments a member can be assigned to; limited to the church in `scope`
pub async fn fetch_departments(scope: RowScope) -> Result<Vec<Department>, ApiError> {
    get_rows(Department::collection_name(), &department_query(scope)).await
}

fn department_query(scope: RowScope) -> Vec<(&'static str, String)> {
    let mut query = vec![("select", "id,name,church_id".to_string())];
    query.extend(scope.filter());
    query.push(("order", "name".to_string()));
    query
}

pub async fn create_member(payload: &Value) -> Result<Member, ApiError> {
    insert_row(Member::collection_name(), payload).await
}

pub async fn update_member(id: &str, payload: &Value) -> Result<(), ApiError> {
    update_rows(Member::collection_name(), &[eq("id", id)], payload).await
}

pub fn department_name(departments: &[Department], id: &str) -> Option<String> {
    departments
        .iter()
        .find(|d| d.id.as_string() == id)
        .map(|d| d.name.clone())
}

/// Audit payload of a new registration: the stored row without ids, plus
/// the department name
pub fn created_changes(draft: &MemberDraft, departments: &[Department]) -> Value {
    let mut value = draft.payload("");
    if let Value::Object(row) = &mut value {
        row.remove("church_id");
        let department = row
            .remove("department_id")
            .and_then(|id| id.as_str().and_then(|id| department_name(departments, id)));
        row.insert("department".into(), department.map(Value::String).unwrap_or(Value::Null));
    }
    value
}

/// Columns that changed in an edit, for the log line
pub fn changed_fields(diff: &Value) -> String {
    diff.get("new")
        .and_then(Value::as_object)
        .map(|m| m.keys().cloned().collect::<Vec<_>>().join(", "))
        .unwrap_or_default()
}

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Unsaved registration kept across reloads
pub fn save_draft(draft: &MemberDraft) -> bool {
    let Ok(json) = serde_json::to_string(draft) else {
        return false;
    };
    local_storage().is_some_and(|s| s.set_item(DRAFT_KEY, &json).is_ok())
}

pub fn load_draft() -> Option<MemberDraft> {
    let json = local_storage()?.get_item(DRAFT_KEY).ok()??;
    match serde_json::from_str(&json) {
        Ok(draft) => Some(draft),
        Err(e) => {
            log::warn!("discarding unreadable member draft: {}", e);
            None
        }
    }
}

pub fn clear_draft() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(DRAFT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_church::aggregate::ChurchId;
    use serde_json::json;

    const DEPT: &str = "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60";

    fn departments() -> Vec<Department> {
        serde_json::from_value(json!([
            { "id": DEPT, "church_id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a", "name": "Choir" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_created_changes_names_department() {
        let mut draft = MemberDraft::new("2024-09-11", Some(DEPT.to_string()));
        draft.set("full_name", "Abebe");
        let v = created_changes(&draft, &departments());
        assert_eq!(v["full_name"], "Abebe");
        assert_eq!(v["department"], "Choir");
        assert!(v.get("church_id").is_none());
        assert!(v.get("department_id").is_none());
    }

    #[test]
    fn test_changed_fields_lists_new_keys() {
        let diff = json!({ "old": { "phone": null }, "new": { "email": "a@b.c", "phone": "0911" } });
        assert_eq!(changed_fields(&diff), "email, phone");
        assert_eq!(changed_fields(&json!({})), "");
    }

    #[test]
    fn test_department_query_scoped() {
        let church = ChurchId::from_string("5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a").unwrap();
        let q = department_query(RowScope::Church(church));
        assert_eq!(q[1], ("church_id", "eq.5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a".to_string()));
        assert_eq!(department_query(RowScope::All).len(), 2);
    }
}
