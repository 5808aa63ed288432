//! Audit trail writer. Failures are logged and never reach the caller: a
//! missing audit row must not undo or block the action it describes.

use crate::shared::api_utils::insert_only;
use contracts::domain::a004_activity_log::aggregate::{ActionType, ActivityLog, EntityType, NewActivityLog};
use contracts::domain::common::AggregateRoot;
use contracts::system::auth::ProfileId;
use serde_json::Value;

pub async fn log_activity(
    user_id: Option<ProfileId>,
    action_type: ActionType,
    entity_type: EntityType,
    details: String,
    entity_id: Option<String>,
    changes: Option<Value>,
) {
    let Some(user_id) = user_id else {
        log::warn!("activity not logged, no signed-in user: {}", details);
        return;
    };
    let entry = NewActivityLog {
        user_id,
        action_type,
        entity_type,
        entity_id,
        details,
        changes,
    };
    if let Err(e) = insert_only(ActivityLog::collection_name(), &entry).await {
        log::error!("failed to write activity log: {}", e);
    }
}
