use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Avatar marker carried by every sweep-generated notification.
pub const NOTIFICATION_AVATAR: &str = "A";

/// An append-only notification record. The sweep only ever creates these;
/// it never reads, mutates, or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub avatar: String,
    pub title: String,
    pub message: String,
    pub receiver_id: String,
    #[serde(default)]
    pub referenced_id: Option<String>,
    #[serde(default)]
    pub referenced_type: Option<String>,
    pub unread: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Notification sent to a contract participant after an auto-cancellation.
    pub fn contract_cancelled(
        receiver_id: &str,
        contract_id: &str,
        event_name: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            avatar: NOTIFICATION_AVATAR.into(),
            title: "Contract Auto-Cancelled".into(),
            message: format!(
                "The contract for '{event_name}' has been automatically cancelled because \
                 the event has passed and there were no successful transactions or deliveries."
            ),
            receiver_id: receiver_id.into(),
            referenced_id: Some(contract_id.into()),
            referenced_type: Some("contract".into()),
            unread: true,
            created_at,
        }
    }

    /// Notification sent to the event owner after an expired event is removed.
    pub fn event_deleted(receiver_id: &str, event_name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            avatar: NOTIFICATION_AVATAR.into(),
            title: "Event Deleted".into(),
            message: format!(
                "The event '{event_name}' has been automatically deleted because it has \
                 passed and there are no associated contracts."
            ),
            receiver_id: receiver_id.into(),
            referenced_id: None,
            referenced_type: None,
            unread: true,
            created_at,
        }
    }
}
