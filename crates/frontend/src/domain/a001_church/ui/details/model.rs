use crate::shared::api_utils::{eq, get_rows, ApiError};
use contracts::domain::a001_church::aggregate::{ChurchDepartment, ChurchDepartmentRecord};
use contracts::domain::a002_department::aggregate::Department;
use contracts::domain::common::AggregateRoot;

const STATS_SELECT: &str = "id,name,profile_departments(count)";
const LEGACY_STATS_SELECT: &str = "id,name";

fn stats_query(select: &str, church_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("select", select.to_string()),
        eq("church_id", church_id),
        ("order", "name".to_string()),
    ]
}

/// Departments of a church with their staff counts; counts are 0 when the
/// REST service does not know `profile_departments`.
pub async fn fetch_church_departments(church_id: &str) -> Result<Vec<ChurchDepartment>, ApiError> {
    let table = Department::collection_name();
    let rows: Vec<ChurchDepartmentRecord> = match get_rows(table, &stats_query(STATS_SELECT, church_id)).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("church staff counts unavailable, retrying without them: {}", e);
            get_rows(table, &stats_query(LEGACY_STATS_SELECT, church_id)).await?
        }
    };
    Ok(rows.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_query() {
        let q = stats_query(STATS_SELECT, "c1");
        assert_eq!(q[0].1, STATS_SELECT);
        assert_eq!(q[1], ("church_id", "eq.c1".to_string()));
        assert!(!stats_query(LEGACY_STATS_SELECT, "c1")[0].1.contains("profile_departments"));
    }
}
