use crate::shared::api_utils::{eq, insert_row, update_rows, ApiError};
use contracts::domain::a001_church::aggregate::{Church, ChurchDto};
use contracts::domain::a004_activity_log::diff::object_diff;
use contracts::domain::common::AggregateRoot;
use serde_json::Value;

pub async fn create_church(dto: &ChurchDto) -> Result<Church, ApiError> {
    insert_row(Church::collection_name(), &dto.to_row()).await
}

pub async fn update_church(id: &str, dto: &ChurchDto) -> Result<(), ApiError> {
    update_rows(Church::collection_name(), &[eq("id", id)], &dto.to_row()).await
}

/// "Added new church "Bole" at Addis Ababa"
pub fn created_details(dto: &ChurchDto) -> String {
    let location = dto.location.trim();
    format!(
        "Added new church \"{}\" at {}",
        dto.name.trim(),
        if location.is_empty() { "unspecified location" } else { location }
    )
}

/// Audit diff of an edit; `None` when nothing visible changed
pub fn updated_changes(original: &Church, dto: &ChurchDto) -> Option<Value> {
    object_diff(&ChurchDto::from_church(original).to_row(), &dto.to_row())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn church() -> Church {
        serde_json::from_value(json!({
            "id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
            "name": "Bole",
            "location": "Addis Ababa"
        }))
        .unwrap()
    }

    #[test]
    fn test_created_details_mentions_location() {
        let mut dto = ChurchDto {
            name: " Bole ".into(),
            ..Default::default()
        };
        assert_eq!(created_details(&dto), "Added new church \"Bole\" at unspecified location");
        dto.location = "Addis Ababa".into();
        assert_eq!(created_details(&dto), "Added new church \"Bole\" at Addis Ababa");
    }

    #[test]
    fn test_updated_changes_only_changed_fields() {
        let mut dto = ChurchDto::from_church(&church());
        assert!(updated_changes(&church(), &dto).is_none());
        dto.map_link = "https://maps.example.org/bole".into();
        let diff = updated_changes(&church(), &dto).unwrap();
        assert_eq!(diff["new"], json!({ "map_link": "https://maps.example.org/bole" }));
        assert_eq!(diff["old"], json!({ "map_link": null }));
    }
}
