use crate::domain::a001_church::aggregate::{first_count, ChurchId, CountRef, NameRef};
use crate::domain::common::search::{contains_ci, normalize_query};
use crate::domain::common::{AggregateId, AggregateRoot, Searchable};
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

crate::uuid_id!(
    /// Department id
    DepartmentId
);

// ============================================================================
// Aggregate Root
// ============================================================================

/// A ministry department inside a church
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub church_id: ChurchId,
    pub name: String,
}

impl Department {
    /// Validation before insert/update
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Department name is required".into());
        }
        Ok(())
    }
}

impl AggregateRoot for Department {
    type Id = DepartmentId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "departments"
    }

    fn element_name() -> &'static str {
        "Department"
    }

    fn list_name() -> &'static str {
        "Departments"
    }
}

// ============================================================================
// Fetch boundary
// ============================================================================

/// Joined row returned by
/// `select=*,churches(name),members:members(count),profile_departments(count)`.
///
/// `profile_departments` is absent when the legacy select (without staff links) is used.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentRecord {
    #[serde(flatten)]
    pub department: Department,
    #[serde(default)]
    pub churches: Option<NameRef>,
    #[serde(default)]
    pub members: Option<Vec<CountRef>>,
    #[serde(default)]
    pub profile_departments: Option<Vec<CountRef>>,
}

/// Department as shown in the list: normalized once when fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub department: Department,
    pub church_name: Option<String>,
    pub member_count: u32,
    pub staff_count: u32,
}

impl From<DepartmentRecord> for DepartmentSummary {
    fn from(r: DepartmentRecord) -> Self {
        Self {
            member_count: first_count(r.members.as_deref()),
            staff_count: first_count(r.profile_departments.as_deref()),
            church_name: r.churches.map(|c| c.name),
            department: r.department,
        }
    }
}

impl DepartmentSummary {
    pub fn id_string(&self) -> String {
        self.department.id.as_string()
    }

    /// Roster members plus linked staff
    pub fn people_count(&self) -> u32 {
        self.member_count + self.staff_count
    }
}

impl Searchable for DepartmentSummary {
    fn matches_filter(&self, filter: &str) -> bool {
        let Some(q) = normalize_query(filter) else {
            return true;
        };
        contains_ci(Some(&self.department.name), &q) || contains_ci(self.church_name.as_deref(), &q)
    }
}

/// Sum of people across all departments (header counter).
pub fn total_people(items: &[DepartmentSummary]) -> u32 {
    items.iter().map(DepartmentSummary::people_count).sum()
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO for create/update
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DepartmentDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub church_id: String,
}

impl DepartmentDto {
    pub fn from_department(d: &Department) -> Self {
        Self {
            id: Some(d.id.as_string()),
            name: d.name.clone(),
            church_id: d.church_id.as_string(),
        }
    }

    /// Both name and church are mandatory
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Department name is required".into());
        }
        if self.church_id.trim().is_empty() {
            return Err("Church is required".into());
        }
        ChurchId::from_string(self.church_id.trim())?;
        Ok(())
    }

    /// A new form is dirty once filled in; an edit form once it differs from the original.
    pub fn has_changes(&self, original: Option<&Department>) -> bool {
        match original {
            None => !self.name.is_empty() && !self.church_id.is_empty(),
            Some(d) => self.name != d.name || self.church_id != d.church_id.as_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "id": "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60",
        "church_id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
        "name": "Choir",
        "created_at": "2024-03-15T14:02:26Z",
        "churches": { "name": "Bole" },
        "members": [{ "count": 12 }],
        "profile_departments": [{ "count": 2 }]
    }"#;

    fn summary(json: &str) -> DepartmentSummary {
        serde_json::from_str::<DepartmentRecord>(json).unwrap().into()
    }

    #[test]
    fn test_normalizes_joined_row() {
        let s = summary(ROW);
        assert_eq!(s.department.name, "Choir");
        assert_eq!(s.church_name.as_deref(), Some("Bole"));
        assert_eq!(s.member_count, 12);
        assert_eq!(s.staff_count, 2);
        assert_eq!(s.people_count(), 14);
    }

    #[test]
    fn test_legacy_row_without_staff_links() {
        let legacy = r#"{
            "id": "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60",
            "church_id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
            "name": "Ushers",
            "churches": null,
            "members": []
        }"#;
        let s = summary(legacy);
        assert_eq!(s.church_name, None);
        assert_eq!(s.member_count, 0);
        assert_eq!(s.staff_count, 0);
    }

    #[test]
    fn test_search_matches_name_or_church() {
        let s = summary(ROW);
        assert!(s.matches_filter(""));
        assert!(s.matches_filter("  "));
        assert!(s.matches_filter("CHO"));
        assert!(s.matches_filter("bole"));
        assert!(!s.matches_filter("youth"));
    }

    #[test]
    fn test_total_people() {
        let a = summary(ROW);
        let mut b = a.clone();
        b.member_count = 3;
        b.staff_count = 0;
        assert_eq!(total_people(&[a, b]), 17);
    }

    #[test]
    fn test_dto_validation() {
        let mut dto = DepartmentDto::default();
        assert!(dto.validate().is_err());
        dto.name = "Youth".into();
        assert_eq!(dto.validate().unwrap_err(), "Church is required");
        dto.church_id = "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a".into();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_dto_change_tracking() {
        let s = summary(ROW);
        let mut dto = DepartmentDto::from_department(&s.department);
        assert!(!dto.has_changes(Some(&s.department)));
        dto.name = "Choir B".into();
        assert!(dto.has_changes(Some(&s.department)));

        let fresh = DepartmentDto {
            id: None,
            name: "Youth".into(),
            church_id: String::new(),
        };
        assert!(!fresh.has_changes(None));
    }
}
