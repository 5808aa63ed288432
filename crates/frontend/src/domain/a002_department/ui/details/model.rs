use crate::shared::api_utils::{eq, get_rows, ApiError};
use contracts::domain::a002_department::roster::{build_roster, DepartmentPerson, RosterMember, StaffLinkRecord};
use contracts::domain::a003_member::aggregate::Member;
use contracts::domain::common::AggregateRoot;

/// Roster members and linked staff of one department
pub async fn fetch_roster(department_id: &str) -> Result<Vec<DepartmentPerson>, ApiError> {
    let members: Vec<RosterMember> = get_rows(
        Member::collection_name(),
        &[
            ("select", "id,full_name,email,phone".to_string()),
            eq("department_id", department_id),
            ("order", "full_name".to_string()),
        ],
    )
    .await?;

    let staff: Vec<StaffLinkRecord> = get_rows(
        "profile_departments",
        &[
            ("select", "profiles(id,full_name,role,avatar_url)".to_string()),
            eq("department_id", department_id),
        ],
    )
    .await?;

    Ok(build_roster(members, staff))
}
