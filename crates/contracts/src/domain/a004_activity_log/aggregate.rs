use crate::domain::common::AggregateRoot;
use crate::system::auth::ProfileId;
use serde::{Deserialize, Serialize};

crate::uuid_id!(
    /// Activity log entry id
    ActivityLogId
);

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    Create,
    Update,
    Delete,
    Block,
    Unblock,
    RoleChange,
    Login,
    Logout,
    Upload,
    Toggle,
    PasswordChange,
    /// Value written by a newer client
    Other(String),
}

impl ActionType {
    pub fn as_str(&self) -> &str {
        match self {
            ActionType::Create => "CREATE",
            ActionType::Update => "UPDATE",
            ActionType::Delete => "DELETE",
            ActionType::Block => "BLOCK",
            ActionType::Unblock => "UNBLOCK",
            ActionType::RoleChange => "ROLE_CHANGE",
            ActionType::Login => "LOGIN",
            ActionType::Logout => "LOGOUT",
            ActionType::Upload => "UPLOAD",
            ActionType::Toggle => "TOGGLE",
            ActionType::PasswordChange => "PASSWORD_CHANGE",
            ActionType::Other(s) => s,
        }
    }

    /// Verb used in "<user> <verb> <entity>" sentences
    pub fn label(&self) -> String {
        match self {
            ActionType::Create => "created".into(),
            ActionType::Update => "updated".into(),
            ActionType::Delete => "deleted".into(),
            ActionType::Block => "blocked".into(),
            ActionType::Unblock => "unblocked".into(),
            ActionType::RoleChange => "changed role of".into(),
            ActionType::Login => "logged in".into(),
            ActionType::Logout => "logged out".into(),
            ActionType::Upload => "uploaded".into(),
            ActionType::Toggle => "toggled".into(),
            ActionType::PasswordChange => "changed password".into(),
            ActionType::Other(s) => s.to_lowercase(),
        }
    }

    /// CSS modifier for the action badge
    pub fn tone(&self) -> &'static str {
        match self {
            ActionType::Create => "success",
            ActionType::Update => "info",
            ActionType::Delete => "danger",
            ActionType::Block => "warning",
            ActionType::Unblock => "teal",
            ActionType::RoleChange => "purple",
            ActionType::Login => "sky",
            ActionType::Upload => "indigo",
            ActionType::Toggle => "amber",
            ActionType::PasswordChange => "rose",
            ActionType::Logout | ActionType::Other(_) => "neutral",
        }
    }
}

impl From<String> for ActionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATE" => ActionType::Create,
            "UPDATE" => ActionType::Update,
            "DELETE" => ActionType::Delete,
            "BLOCK" => ActionType::Block,
            "UNBLOCK" => ActionType::Unblock,
            "ROLE_CHANGE" => ActionType::RoleChange,
            "LOGIN" => ActionType::Login,
            "LOGOUT" => ActionType::Logout,
            "UPLOAD" => ActionType::Upload,
            "TOGGLE" => ActionType::Toggle,
            "PASSWORD_CHANGE" => ActionType::PasswordChange,
            _ => ActionType::Other(s),
        }
    }
}

impl From<ActionType> for String {
    fn from(a: ActionType) -> Self {
        a.as_str().to_string()
    }
}

/// What it happened to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    Servant,
    Pastor,
    Member,
    Church,
    Department,
    Profile,
    Settings,
    User,
    System,
    Other(String),
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Servant => "SERVANT",
            EntityType::Pastor => "PASTOR",
            EntityType::Member => "MEMBER",
            EntityType::Church => "CHURCH",
            EntityType::Department => "DEPARTMENT",
            EntityType::Profile => "PROFILE",
            EntityType::Settings => "SETTINGS",
            EntityType::User => "USER",
            EntityType::System => "SYSTEM",
            EntityType::Other(s) => s,
        }
    }

    pub fn label(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SERVANT" => EntityType::Servant,
            "PASTOR" => EntityType::Pastor,
            "MEMBER" => EntityType::Member,
            "CHURCH" => EntityType::Church,
            "DEPARTMENT" => EntityType::Department,
            "PROFILE" => EntityType::Profile,
            "SETTINGS" => EntityType::Settings,
            "USER" => EntityType::User,
            "SYSTEM" => EntityType::System,
            _ => EntityType::Other(s),
        }
    }
}

impl From<EntityType> for String {
    fn from(e: EntityType) -> Self {
        e.as_str().to_string()
    }
}

/// Row of `activity_logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    #[serde(default)]
    pub user_id: Option<ProfileId>,
    pub action_type: ActionType,
    pub entity_type: EntityType,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub changes: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl AggregateRoot for ActivityLog {
    type Id = ActivityLogId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "activity_logs"
    }

    fn element_name() -> &'static str {
        "Activity"
    }

    fn list_name() -> &'static str {
        "Activities"
    }
}

/// Insert payload for `activity_logs`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewActivityLog {
    pub user_id: ProfileId,
    pub action_type: ActionType,
    pub entity_type: EntityType,
    pub entity_id: Option<String>,
    pub details: String,
    pub changes: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_form() {
        assert_eq!(
            serde_json::to_string(&ActionType::RoleChange).unwrap(),
            "\"ROLE_CHANGE\""
        );
        let a: ActionType = serde_json::from_str("\"PASSWORD_CHANGE\"").unwrap();
        assert_eq!(a, ActionType::PasswordChange);
    }

    #[test]
    fn test_unknown_values_survive() {
        let a: ActionType = serde_json::from_str("\"ARCHIVE\"").unwrap();
        assert_eq!(a, ActionType::Other("ARCHIVE".into()));
        assert_eq!(a.label(), "archive");
        assert_eq!(a.tone(), "neutral");
        let e: EntityType = serde_json::from_str("\"EVENT\"").unwrap();
        assert_eq!(e.label(), "event");
    }

    #[test]
    fn test_labels() {
        assert_eq!(ActionType::RoleChange.label(), "changed role of");
        assert_eq!(EntityType::Department.label(), "department");
    }

    #[test]
    fn test_parses_log_row() {
        let row = r#"{
            "id": "33333333-3333-4333-8333-333333333333",
            "user_id": null,
            "action_type": "DELETE",
            "entity_type": "MEMBER",
            "entity_id": "11111111-1111-4111-8111-111111111111",
            "details": "Deleted member Abebe",
            "changes": {"full_name": "Abebe"},
            "created_at": "2024-03-15T14:02:26.123456+00:00"
        }"#;
        let log: ActivityLog = serde_json::from_str(row).unwrap();
        assert_eq!(log.action_type, ActionType::Delete);
        assert_eq!(log.entity_type, EntityType::Member);
        assert_eq!(log.display_name(), "Deleted member Abebe");
    }
}
