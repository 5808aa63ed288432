use crate::shared::api_utils::{eq, get_rows, insert_row, update_rows, ApiError};
use contracts::domain::a001_church::aggregate::Church;
use contracts::domain::a002_department::aggregate::{Department, DepartmentDto};
use contracts::domain::a004_activity_log::diff::object_diff;
use contracts::domain::common::{AggregateId, AggregateRoot};
use serde_json::{json, Value};

pub async fn fetch_churches() -> Result<Vec<Church>, ApiError> {
    get_rows(
        Church::collection_name(),
        &[("select", "*".to_string()), ("order", "name".to_string())],
    )
    .await
}

pub async fn create_department(dto: &DepartmentDto) -> Result<Department, ApiError> {
    let body = json!({ "name": dto.name.trim(), "church_id": dto.church_id });
    insert_row(Department::collection_name(), &body).await
}

pub async fn update_department(id: &str, dto: &DepartmentDto) -> Result<(), ApiError> {
    let body = json!({ "name": dto.name.trim(), "church_id": dto.church_id });
    update_rows(Department::collection_name(), &[eq("id", id)], &body).await
}

/// Church name for audit entries, "Unknown" when not loaded
pub fn church_name(churches: &[Church], id: &str) -> String {
    churches
        .iter()
        .find(|c| c.id.as_string() == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Audit payload of a newly created department
pub fn created_changes(dto: &DepartmentDto, churches: &[Church]) -> Value {
    json!({
        "name": dto.name.trim(),
        "church_id": dto.church_id,
        "church": church_name(churches, &dto.church_id),
    })
}

/// Audit diff of an edit; `None` when nothing visible changed
pub fn updated_changes(original: &Department, dto: &DepartmentDto, churches: &[Church]) -> Option<Value> {
    let old = json!({
        "name": original.name,
        "church": church_name(churches, &original.church_id.as_string()),
    });
    let new = json!({
        "name": dto.name.trim(),
        "church": church_name(churches, &dto.church_id),
    });
    object_diff(&old, &new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHURCH_A: &str = "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a";
    const CHURCH_B: &str = "6e5d4c3b-2a1f-4e0d-9c8b-7a6f5e4d3c2b";

    fn churches() -> Vec<Church> {
        serde_json::from_value(json!([
            { "id": CHURCH_A, "name": "Bole" },
            { "id": CHURCH_B, "name": "Piassa" }
        ]))
        .unwrap()
    }

    fn department() -> Department {
        serde_json::from_value(json!({
            "id": "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60",
            "church_id": CHURCH_A,
            "name": "Choir"
        }))
        .unwrap()
    }

    fn dto(name: &str, church: &str) -> DepartmentDto {
        DepartmentDto {
            id: None,
            name: name.to_string(),
            church_id: church.to_string(),
        }
    }

    #[test]
    fn test_church_name_lookup() {
        assert_eq!(church_name(&churches(), CHURCH_B), "Piassa");
        assert_eq!(church_name(&churches(), "nope"), "Unknown");
    }

    #[test]
    fn test_created_changes_resolves_church() {
        let v = created_changes(&dto(" Youth ", CHURCH_B), &churches());
        assert_eq!(v["name"], "Youth");
        assert_eq!(v["church"], "Piassa");
    }

    #[test]
    fn test_updated_changes_only_changed_fields() {
        let diff = updated_changes(&department(), &dto("Choir", CHURCH_B), &churches()).unwrap();
        assert_eq!(diff["old"], json!({ "church": "Bole" }));
        assert_eq!(diff["new"], json!({ "church": "Piassa" }));
    }

    #[test]
    fn test_updated_changes_none_when_same() {
        assert!(updated_changes(&department(), &dto("Choir ", CHURCH_A), &churches()).is_none());
    }
}
