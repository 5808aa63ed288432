use crate::domain::a001_church::aggregate::ChurchId;
use crate::domain::a002_department::aggregate::DepartmentId;
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Id of an authenticated account (`profiles.id` = auth user id)
    ProfileId
);

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Pastor,
    Servant,
}

impl UserRole {
    pub fn label_key(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "roles.super_admin",
            UserRole::Pastor => "roles.pastor",
            UserRole::Servant => "roles.servant",
        }
    }

    /// Whether the role may open a section of the console
    pub fn can_access(&self, section: Section) -> bool {
        match section {
            Section::Members => true,
            Section::Churches => matches!(self, UserRole::SuperAdmin),
            Section::Departments | Section::Activities => {
                matches!(self, UserRole::SuperAdmin | UserRole::Pastor)
            }
        }
    }

    /// Super admins oversee but do not edit member records
    pub fn can_edit_members(&self) -> bool {
        matches!(self, UserRole::Pastor | UserRole::Servant)
    }

    /// Only super admins choose the church of a department
    pub fn picks_church(&self) -> bool {
        matches!(self, UserRole::SuperAdmin)
    }
}

/// Calendar used to display dates to this account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Gregorian,
    Ethiopian,
}

/// Row of `profiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub role: UserRole,
    #[serde(default)]
    pub church_id: Option<ChurchId>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub calendar_type: Option<CalendarType>,
}

impl Profile {
    pub fn calendar(&self) -> CalendarType {
        self.calendar_type.unwrap_or_default()
    }
}

/// Navigable sections of the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Churches,
    Members,
    Departments,
    Activities,
}

impl Section {
    pub fn all() -> [Section; 4] {
        [
            Section::Churches,
            Section::Departments,
            Section::Members,
            Section::Activities,
        ]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Section::Churches => "/churches",
            Section::Members => "/members",
            Section::Departments => "/departments",
            Section::Activities => "/activities",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Section::Churches => "nav.churches",
            Section::Members => "nav.members",
            Section::Departments => "nav.departments",
            Section::Activities => "nav.activities",
        }
    }
}

/// Row filter applied to `members` and `departments` for the signed-in account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    All,
    Church(ChurchId),
    Department(DepartmentId),
}

impl RowScope {
    /// Members: pastors see their church, servants their department (or church)
    pub fn members_for(profile: &Profile) -> Self {
        match profile.role {
            UserRole::SuperAdmin => RowScope::All,
            UserRole::Pastor => profile.church_id.map(RowScope::Church).unwrap_or(RowScope::All),
            UserRole::Servant => match (profile.department_id, profile.church_id) {
                (Some(d), _) => RowScope::Department(d),
                (None, Some(c)) => RowScope::Church(c),
                (None, None) => RowScope::All,
            },
        }
    }

    /// Departments: everyone below super admin is limited to their church
    pub fn departments_for(profile: &Profile) -> Self {
        match (profile.role, profile.church_id) {
            (UserRole::SuperAdmin, _) | (_, None) => RowScope::All,
            (_, Some(c)) => RowScope::Church(c),
        }
    }

    /// PostgREST filter pair, e.g. `("church_id", "eq.<uuid>")`
    pub fn filter(&self) -> Option<(&'static str, String)> {
        match self {
            RowScope::All => None,
            RowScope::Church(c) => Some(("church_id", format!("eq.{}", c))),
            RowScope::Department(d) => Some(("department_id", format!("eq.{}", d))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHURCH: &str = "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a";
    const DEPT: &str = "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60";

    fn profile(role: &str, church: bool, dept: bool) -> Profile {
        let json = serde_json::json!({
            "id": "22222222-2222-4222-8222-222222222222",
            "role": role,
            "church_id": if church { Some(CHURCH) } else { None },
            "department_id": if dept { Some(DEPT) } else { None },
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_section_access() {
        assert!(UserRole::Servant.can_access(Section::Members));
        assert!(!UserRole::Servant.can_access(Section::Departments));
        assert!(!UserRole::Servant.can_access(Section::Activities));
        assert!(UserRole::Pastor.can_access(Section::Departments));
        assert!(UserRole::SuperAdmin.can_access(Section::Activities));
        assert!(UserRole::SuperAdmin.can_access(Section::Churches));
        assert!(!UserRole::Pastor.can_access(Section::Churches));
        assert!(!UserRole::Servant.can_access(Section::Churches));
    }

    #[test]
    fn test_member_editing_rights() {
        assert!(!UserRole::SuperAdmin.can_edit_members());
        assert!(UserRole::Pastor.can_edit_members());
        assert!(UserRole::Servant.can_edit_members());
    }

    #[test]
    fn test_member_scope() {
        assert_eq!(RowScope::members_for(&profile("super_admin", true, true)), RowScope::All);
        assert!(matches!(
            RowScope::members_for(&profile("pastor", true, true)),
            RowScope::Church(_)
        ));
        assert!(matches!(
            RowScope::members_for(&profile("servant", true, true)),
            RowScope::Department(_)
        ));
        assert!(matches!(
            RowScope::members_for(&profile("servant", true, false)),
            RowScope::Church(_)
        ));
    }

    #[test]
    fn test_department_scope_filter() {
        let scope = RowScope::departments_for(&profile("pastor", true, false));
        assert_eq!(scope.filter(), Some(("church_id", format!("eq.{CHURCH}"))));
        assert_eq!(RowScope::departments_for(&profile("super_admin", true, false)).filter(), None);
    }

    #[test]
    fn test_profile_defaults() {
        let p = profile("servant", false, false);
        assert_eq!(p.calendar(), CalendarType::Gregorian);
        assert!(!p.is_blocked);
    }
}
