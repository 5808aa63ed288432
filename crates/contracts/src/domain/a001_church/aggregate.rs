use crate::domain::common::search::{contains_ci, normalize_query};
use crate::domain::common::{AggregateId, AggregateRoot, Searchable};
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Church id
    ChurchId
);

/// A local church (congregation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Church {
    pub id: ChurchId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
}

impl AggregateRoot for Church {
    type Id = ChurchId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "churches"
    }

    fn element_name() -> &'static str {
        "Church"
    }

    fn list_name() -> &'static str {
        "Churches"
    }
}

/// `{ "name": ... }` fragment produced by an embedded `churches ( name )` select
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NameRef {
    pub name: String,
}

/// `[{ "count": n }]` fragment produced by an embedded `table(count)` select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CountRef {
    pub count: u32,
}

/// First count of an embedded aggregate, 0 when absent.
pub fn first_count(counts: Option<&[CountRef]>) -> u32 {
    counts
        .and_then(|c| c.first())
        .map(|c| c.count)
        .unwrap_or(0)
}

// ============================================================================
// Fetch boundary
// ============================================================================

/// Joined row returned by `select=*,members(count)`
#[derive(Debug, Clone, Deserialize)]
pub struct ChurchRecord {
    #[serde(flatten)]
    pub church: Church,
    #[serde(default)]
    pub members: Option<Vec<CountRef>>,
}

/// Church as shown in the directory
#[derive(Debug, Clone, PartialEq)]
pub struct ChurchSummary {
    pub church: Church,
    pub member_count: u32,
}

impl From<ChurchRecord> for ChurchSummary {
    fn from(r: ChurchRecord) -> Self {
        Self {
            member_count: first_count(r.members.as_deref()),
            church: r.church,
        }
    }
}

impl ChurchSummary {
    pub fn id_string(&self) -> String {
        self.church.id.as_string()
    }
}

impl Searchable for ChurchSummary {
    fn matches_filter(&self, filter: &str) -> bool {
        let Some(q) = normalize_query(filter) else {
            return true;
        };
        contains_ci(Some(&self.church.name), &q) || contains_ci(self.church.location.as_deref(), &q)
    }
}

/// Department row of a church's statistics, `select=id,name,profile_departments(count)`.
/// The staff count is absent when the legacy select is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ChurchDepartmentRecord {
    pub name: String,
    #[serde(default)]
    pub profile_departments: Option<Vec<CountRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChurchDepartment {
    pub name: String,
    pub staff_count: u32,
}

impl From<ChurchDepartmentRecord> for ChurchDepartment {
    fn from(r: ChurchDepartmentRecord) -> Self {
        Self {
            staff_count: first_count(r.profile_departments.as_deref()),
            name: r.name,
        }
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for create/update
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ChurchDto {
    pub name: String,
    pub location: String,
    pub map_link: String,
}

impl ChurchDto {
    pub fn from_church(c: &Church) -> Self {
        Self {
            name: c.name.clone(),
            location: c.location.clone().unwrap_or_default(),
            map_link: c.map_link.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Church name is required".into());
        }
        let link = self.map_link.trim();
        if !link.is_empty() && !(link.starts_with("https://") || link.starts_with("http://")) {
            return Err("Map link must be a web address".into());
        }
        Ok(())
    }

    pub fn has_changes(&self, original: Option<&Church>) -> bool {
        match original {
            None => !self.name.trim().is_empty(),
            Some(c) => *self != Self::from_church(c),
        }
    }

    /// Row body: trimmed, blanks stored as null
    pub fn to_row(&self) -> serde_json::Value {
        let opt = |s: &str| {
            let t = s.trim();
            (!t.is_empty()).then(|| t.to_string())
        };
        serde_json::json!({
            "name": self.name.trim(),
            "location": opt(&self.location),
            "map_link": opt(&self.map_link),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
        "name": "Bole",
        "location": "Addis Ababa",
        "map_link": null,
        "created_at": "2024-03-15T14:02:26Z",
        "members": [{ "count": 240 }]
    }"#;

    fn summary() -> ChurchSummary {
        serde_json::from_str::<ChurchRecord>(ROW).unwrap().into()
    }

    #[test]
    fn test_normalizes_joined_row() {
        let s = summary();
        assert_eq!(s.church.name, "Bole");
        assert_eq!(s.member_count, 240);
        assert_eq!(s.church.map_link, None);
    }

    #[test]
    fn test_search_matches_name_or_location() {
        let s = summary();
        assert!(s.matches_filter(""));
        assert!(s.matches_filter("bol"));
        assert!(s.matches_filter("ADDIS"));
        assert!(!s.matches_filter("piassa"));
    }

    #[test]
    fn test_department_stats_without_staff_links() {
        let d: ChurchDepartment = serde_json::from_str::<ChurchDepartmentRecord>(r#"{"name":"Choir"}"#)
            .unwrap()
            .into();
        assert_eq!(d, ChurchDepartment { name: "Choir".into(), staff_count: 0 });
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = ChurchDto::default();
        assert_eq!(dto.validate().unwrap_err(), "Church name is required");
        dto.name = "Bole".into();
        dto.map_link = "maps/@9.01,38.75".into();
        assert!(dto.validate().is_err());
        dto.map_link = "https://maps.google.com/?q=9.01,38.75".into();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_dto_changes_and_row() {
        let church = summary().church;
        let mut dto = ChurchDto::from_church(&church);
        assert!(!dto.has_changes(Some(&church)));
        dto.location = "  ".into();
        assert!(dto.has_changes(Some(&church)));
        let row = dto.to_row();
        assert_eq!(row["name"], "Bole");
        assert_eq!(row["location"], serde_json::Value::Null);
    }
}
