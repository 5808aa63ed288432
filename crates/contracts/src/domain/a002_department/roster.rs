//! People attached to a department.
//!
//! Two sources feed a department roster: plain `members` rows and staff accounts
//! (pastors, servants) linked through `profile_departments`. Both are normalized
//! into [`DepartmentPerson`] right after fetching.

use crate::domain::a003_member::aggregate::MemberId;
use crate::domain::common::search::{contains_ci, normalize_query};
use crate::domain::common::Searchable;
use crate::system::auth::{ProfileId, UserRole};
use serde::Deserialize;

/// Row of `members?select=id,full_name,email,phone`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RosterMember {
    pub id: MemberId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Embedded `profiles(id,full_name,role,avatar_url)` fragment
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaffProfile {
    pub id: ProfileId,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Row of `profile_departments?select=profiles(...)`; the link may dangle.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffLinkRecord {
    #[serde(default)]
    pub profiles: Option<StaffProfile>,
}

/// A person on a department roster, tagged by where the record came from.
#[derive(Debug, Clone, PartialEq)]
pub enum DepartmentPerson {
    Roster(RosterMember),
    Staff(StaffProfile),
}

impl DepartmentPerson {
    pub fn key(&self) -> String {
        match self {
            DepartmentPerson::Roster(m) => format!("member-{}", m.id),
            DepartmentPerson::Staff(p) => format!("staff-{}", p.id),
        }
    }

    pub fn full_name(&self) -> &str {
        match self {
            DepartmentPerson::Roster(m) => &m.full_name,
            DepartmentPerson::Staff(p) => p.full_name.as_deref().unwrap_or(""),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            DepartmentPerson::Roster(m) => m.email.as_deref(),
            DepartmentPerson::Staff(_) => None,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            DepartmentPerson::Roster(m) => m.phone.as_deref(),
            DepartmentPerson::Staff(_) => None,
        }
    }

    /// Translation key of the badge shown next to the name
    pub fn kind_key(&self) -> &'static str {
        match self {
            DepartmentPerson::Roster(_) => "roles.member",
            DepartmentPerson::Staff(p) => p.role.label_key(),
        }
    }
}

impl Searchable for DepartmentPerson {
    fn matches_filter(&self, filter: &str) -> bool {
        let Some(q) = normalize_query(filter) else {
            return true;
        };
        contains_ci(Some(self.full_name()), &q)
            || contains_ci(self.email(), &q)
            || contains_ci(self.phone(), &q)
    }
}

/// Merges both sources: roster members first, then staff; dangling links are dropped.
pub fn build_roster(members: Vec<RosterMember>, staff: Vec<StaffLinkRecord>) -> Vec<DepartmentPerson> {
    members
        .into_iter()
        .map(DepartmentPerson::Roster)
        .chain(
            staff
                .into_iter()
                .filter_map(|link| link.profiles)
                .map(DepartmentPerson::Staff),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Vec<RosterMember>, Vec<StaffLinkRecord>) {
        let members: Vec<RosterMember> = serde_json::from_str(
            r#"[{"id":"11111111-1111-4111-8111-111111111111","full_name":"Abebe Kebede","email":"abebe@example.org","phone":null}]"#,
        )
        .unwrap();
        let staff: Vec<StaffLinkRecord> = serde_json::from_str(
            r#"[
                {"profiles":{"id":"22222222-2222-4222-8222-222222222222","full_name":"Pastor Dawit","role":"pastor","avatar_url":null}},
                {"profiles":null}
            ]"#,
        )
        .unwrap();
        (members, staff)
    }

    #[test]
    fn test_build_roster_tags_sources() {
        let (members, staff) = fixtures();
        let roster = build_roster(members, staff);
        assert_eq!(roster.len(), 2);
        assert!(matches!(roster[0], DepartmentPerson::Roster(_)));
        assert!(matches!(roster[1], DepartmentPerson::Staff(_)));
        assert_eq!(roster[1].kind_key(), "roles.pastor");
        assert_ne!(roster[0].key(), roster[1].key());
    }

    #[test]
    fn test_roster_search() {
        let (members, staff) = fixtures();
        let roster = build_roster(members, staff);
        assert!(roster[0].matches_filter("EXAMPLE.org"));
        assert!(!roster[1].matches_filter("example"));
        assert!(roster[1].matches_filter("dawit"));
    }
}
