//! The remote data gateway seam.
//!
//! Everything the engine persists goes through [`KanbanGateway`]. The HTTP
//! implementation lives in the `taskboard-gateway` crate; tests use
//! `test_support::FakeGateway`.

use crate::error::Result;
use crate::types::{
    Assignee, Board, BoardId, BoardMember, Card, CardId, CardPatch, Column, ColumnId, Comment,
    CommentId, MemberRole, Notification, NotificationId, Position, Priority, UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for creating a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub board_id: BoardId,
    pub title: String,
}

/// Payload for creating a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub title: String,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<Assignee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Payload for moving a card between columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub card_id: CardId,
    pub from_column_id: ColumnId,
    pub to_column_id: ColumnId,
    pub new_position: Position,
}

/// Payload for inviting a member to a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInvite {
    pub board_id: BoardId,
    pub email: String,
    pub role: MemberRole,
}

/// Payload for changing a member's role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleChange {
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: MemberRole,
}

/// Payload for removing a member from a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRemoval {
    pub board_id: BoardId,
    pub user_id: UserId,
}

/// Payload for creating a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub card_id: CardId,
    pub content: String,
}

/// Remote persistence for boards, columns, cards, comments, members and
/// notifications.
///
/// Every mutation is a single logical request; implementations never batch.
/// Transport failures and non-success responses are reported as
/// `KanbanError::Fetch`, `Timeout` or `Conflict`.
#[async_trait]
pub trait KanbanGateway: Send + Sync {
    // Boards and columns

    async fn list_boards(&self) -> Result<Vec<Board>>;
    async fn create_board(&self, board: &NewBoard) -> Result<Board>;
    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>>;
    async fn create_column(&self, column: &NewColumn) -> Result<Column>;

    // Cards

    /// Cards of a board, unordered across columns
    async fn list_cards(&self, board_id: &BoardId) -> Result<Vec<Card>>;
    async fn create_card(&self, draft: &CardDraft) -> Result<Card>;
    async fn update_card(&self, card_id: &CardId, patch: &CardPatch) -> Result<Card>;
    /// Returns the moved card when the server includes it in the acknowledgement
    async fn move_card(&self, request: &MoveRequest) -> Result<Option<Card>>;
    async fn delete_card(&self, card_id: &CardId) -> Result<()>;

    // Members

    async fn list_members(&self, board_id: &BoardId) -> Result<Vec<BoardMember>>;
    async fn add_member(&self, invite: &MemberInvite) -> Result<()>;
    async fn update_member_role(&self, change: &RoleChange) -> Result<()>;
    async fn remove_member(&self, removal: &MemberRemoval) -> Result<()>;

    // Comments

    async fn list_comments(&self, card_id: &CardId) -> Result<Vec<Comment>>;
    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn update_comment(&self, comment_id: &CommentId, content: &str) -> Result<Comment>;
    async fn delete_comment(&self, comment_id: &CommentId) -> Result<()>;

    // Notifications

    async fn list_notifications(&self) -> Result<Vec<Notification>>;
    async fn unread_notification_count(&self) -> Result<u64>;
    async fn mark_notification_read(&self, notification_id: &NotificationId) -> Result<()>;
    async fn mark_all_notifications_read(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_request_wire_format() {
        let request = MoveRequest {
            card_id: CardId::from("c1"),
            from_column_id: ColumnId::from("todo"),
            to_column_id: ColumnId::from("done"),
            new_position: Position::ORIGIN,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "cardId": "c1",
                "fromColumnId": "todo",
                "toColumnId": "done",
                "newPosition": 0.0
            })
        );
    }

    #[test]
    fn test_card_draft_skips_absent_fields() {
        let draft = CardDraft {
            title: "Write docs".into(),
            board_id: BoardId::from("b1"),
            column_id: ColumnId::from("todo"),
            description: None,
            priority: Priority::Medium,
            due_date: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            position: None,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Write docs",
                "boardId": "b1",
                "columnId": "todo",
                "priority": "Medium"
            })
        );
    }
}
