//! Audit Entry

use chrono::{DateTime, Utc};
use kernel::id::{AuditLogId, UserId};
use platform::client::ClientInfo;
use uuid::Uuid;

/// One journal line
///
/// `entity_type` and `action` are short lowercase names such as
/// `session` / `completed`; together they read as `session.completed`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: AuditLogId,
    pub user_id: UserId,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub action: String,
    pub action_data: Option<serde_json::Value>,
    pub occurred_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditEntry {
    pub fn new(
        user_id: UserId,
        entity_type: impl Into<String>,
        entity_id: impl Into<Uuid>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            user_id,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            action: action.into(),
            action_data: None,
            occurred_at: Utc::now(),
            ip_address: None,
            user_agent: None,
        }
    }

    /// Attach a JSON payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.action_data = Some(data);
        self
    }

    /// Attach request IP and User-Agent
    pub fn with_client(mut self, client: &ClientInfo) -> Self {
        self.ip_address = client.ip_string();
        self.user_agent = client.user_agent.clone();
        self
    }

    /// Override the occurrence instant (defaults to now)
    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }

    /// `entity_type.action`, e.g. `session.created`
    pub fn event_name(&self) -> String {
        format!("{}.{}", self.entity_type, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let user_id = UserId::new();
        let entity_id = Uuid::new_v4();
        let client = ClientInfo {
            ip: Some("203.0.113.1".parse().unwrap()),
            user_agent: Some("curl/8.0".to_string()),
        };

        let entry = AuditEntry::new(user_id, "session", entity_id, "created")
            .with_data(serde_json::json!({"workoutId": "w"}))
            .with_client(&client);

        assert_eq!(entry.user_id, user_id);
        assert_eq!(entry.entity_id, entity_id);
        assert_eq!(entry.event_name(), "session.created");
        assert_eq!(entry.ip_address.as_deref(), Some("203.0.113.1"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(entry.action_data.unwrap()["workoutId"], "w");
    }

    #[test]
    fn test_without_client() {
        let entry = AuditEntry::new(UserId::new(), "user", Uuid::new_v4(), "registered");
        assert!(entry.ip_address.is_none());
        assert!(entry.user_agent.is_none());
        assert!(entry.action_data.is_none());
    }
}
