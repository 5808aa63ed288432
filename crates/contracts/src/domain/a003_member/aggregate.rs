use crate::domain::a001_church::aggregate::{ChurchId, NameRef};
use crate::domain::a002_department::aggregate::DepartmentId;
use crate::domain::common::search::{contains_ci, normalize_query};
use crate::domain::common::{AggregateId, AggregateRoot, Searchable};
use serde::{Deserialize, Deserializer, Serialize};

crate::uuid_id!(
    /// Member id
    MemberId
);

/// Registered church member.
///
/// Registration-form sections are flattened into the same `members` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub church_id: ChurchId,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,

    #[serde(flatten)]
    pub personal: PersonalInfo,
    #[serde(flatten)]
    pub spiritual: SpiritualInfo,
    #[serde(flatten)]
    pub education: EducationAndWork,
    #[serde(flatten)]
    pub family: FamilyInfo,
    #[serde(flatten)]
    pub service: ServiceHistory,
    #[serde(flatten)]
    pub fellowship: FellowshipInfo,
    #[serde(flatten)]
    pub signatures: SignatureInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersonalInfo {
    pub photo: Option<String>,
    pub dob: Option<String>,
    pub place_of_birth: Option<String>,
    pub mother_tongue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SpiritualInfo {
    pub salvation_date: Option<String>,
    pub salvation_place: Option<String>,
    pub previous_church: Option<String>,
    pub reason_for_coming: Option<String>,
    pub faith: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EducationAndWork {
    pub field_of_study: Option<String>,
    pub educational_level: Option<String>,
    pub employment_status: Option<String>,
    pub workplace_address: Option<String>,
    pub income_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FamilyInfo {
    pub marital_status: Option<String>,
    pub spouse_name: Option<String>,
    pub marriage_date: Option<String>,
    pub marriage_place: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub children: Vec<ChildInfo>,
    pub additional_family_info: Option<String>,
    pub living_situation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceHistory {
    pub service_type: Option<String>,
    pub service_duration: Option<String>,
    pub service_responsibility: Option<String>,
    pub current_service: Option<String>,
    pub spiritual_gift: Option<String>,
    pub future_service: Option<String>,
    pub additional_service_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FellowshipInfo {
    pub fellowship_start_date: Option<String>,
    pub fellowship_name: Option<String>,
    pub fellowship_responsibility: Option<String>,
    pub fellowship_mentor: Option<String>,
    pub fellowship_leader: Option<String>,
    pub additional_fellowship_info: Option<String>,
}

/// Sign-off block at the end of the paper registration form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SignatureInfo {
    pub member_signature: Option<String>,
    pub form_filled_date: Option<String>,
    pub fellowship_leader_signature: Option<String>,
    pub zone_rep_signature: Option<String>,
    pub middle_sector_rep_signature: Option<String>,
}

/// Entry of the `children` JSONB column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ChildInfo {
    pub name: String,
    pub gender: Option<String>,
    /// Stored as typed by the registrar: number or text
    #[serde(deserialize_with = "string_or_number")]
    pub age: Option<String>,
    pub education: Option<String>,
    pub faith: Option<String>,
}

fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

fn string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(de)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl AggregateRoot for Member {
    type Id = MemberId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "members"
    }

    fn element_name() -> &'static str {
        "Member"
    }

    fn list_name() -> &'static str {
        "Members"
    }
}

// ============================================================================
// Fetch boundary
// ============================================================================

/// Joined row returned by `select=*,departments(name),churches(name)`
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRecord {
    #[serde(flatten)]
    pub member: Member,
    #[serde(default)]
    pub departments: Option<NameRef>,
    #[serde(default)]
    pub churches: Option<NameRef>,
}

/// Member with the names of its church and department resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub member: Member,
    pub department_name: Option<String>,
    pub church_name: Option<String>,
}

impl From<MemberRecord> for MemberSummary {
    fn from(r: MemberRecord) -> Self {
        Self {
            member: r.member,
            department_name: r.departments.map(|d| d.name),
            church_name: r.churches.map(|c| c.name),
        }
    }
}

impl MemberSummary {
    pub fn id_string(&self) -> String {
        self.member.id.as_string()
    }

    /// Snapshot stored in the activity log when the member is deleted
    pub fn audit_snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "full_name": self.member.full_name,
            "church": self.church_name,
            "department": self.department_name,
        })
    }
}

impl Searchable for MemberSummary {
    fn matches_filter(&self, filter: &str) -> bool {
        let Some(q) = normalize_query(filter) else {
            return true;
        };
        contains_ci(Some(&self.member.full_name), &q)
            || contains_ci(self.member.email.as_deref(), &q)
            || contains_ci(self.member.phone.as_deref(), &q)
            || contains_ci(self.department_name.as_deref(), &q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "id": "11111111-1111-4111-8111-111111111111",
        "church_id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
        "department_id": null,
        "full_name": "Abebe Kebede",
        "phone": "+251911000000",
        "email": "abebe@example.org",
        "dob": "1990-05-01",
        "faith": "Protestant",
        "income_amount": 1200.5,
        "children": [{"name": "Liya", "gender": "F", "age": 7}, {"name": "Noah", "age": "3"}],
        "departments": {"name": "Choir"},
        "churches": {"name": "Bole"},
        "created_at": "2024-03-15T14:02:26Z"
    }"#;

    fn summary() -> MemberSummary {
        serde_json::from_str::<MemberRecord>(ROW).unwrap().into()
    }

    #[test]
    fn test_normalizes_joined_row() {
        let s = summary();
        assert_eq!(s.member.full_name, "Abebe Kebede");
        assert_eq!(s.department_name.as_deref(), Some("Choir"));
        assert_eq!(s.church_name.as_deref(), Some("Bole"));
        assert_eq!(s.member.personal.dob.as_deref(), Some("1990-05-01"));
        assert_eq!(s.member.education.income_amount, Some(1200.5));
    }

    #[test]
    fn test_children_age_accepts_number_or_text() {
        let s = summary();
        let ages: Vec<_> = s
            .member
            .family
            .children
            .iter()
            .map(|c| c.age.clone())
            .collect();
        assert_eq!(ages, vec![Some("7".to_string()), Some("3".to_string())]);
    }

    #[test]
    fn test_null_children_is_empty() {
        let row = ROW.replace(
            r#"[{"name": "Liya", "gender": "F", "age": 7}, {"name": "Noah", "age": "3"}]"#,
            "null",
        );
        let r: MemberRecord = serde_json::from_str(&row).unwrap();
        assert!(r.member.family.children.is_empty());
    }

    #[test]
    fn test_search() {
        let s = summary();
        assert!(s.matches_filter("abebe"));
        assert!(s.matches_filter("EXAMPLE"));
        assert!(s.matches_filter("+2519"));
        assert!(s.matches_filter("choir"));
        assert!(!s.matches_filter("ushers"));
    }

    #[test]
    fn test_audit_snapshot() {
        let snap = summary().audit_snapshot();
        assert_eq!(snap["full_name"], "Abebe Kebede");
        assert_eq!(snap["department"], "Choir");
    }
}
