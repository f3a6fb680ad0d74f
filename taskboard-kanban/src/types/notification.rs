//! Notification types

use super::ids::NotificationId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification addressed to the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: NotificationId,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskAssigned,
    TaskUpdated,
    TaskMoved,
    CommentAdded,
    MemberAdded,
    DueDateReminder,
    #[default]
    #[serde(other)]
    Other,
}

/// Badge text for an unread counter: nothing at zero, "9+" above nine
pub fn unread_badge(count: u64) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}
