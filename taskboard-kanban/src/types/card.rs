//! Card types: Card, Priority, Assignee, Subtask, CardPatch

use super::ids::{BoardId, CardId, ColumnId, UserId};
use super::position::Position;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A card (task) on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id", alias = "id")]
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub column_id: ColumnId,
    pub board_id: BoardId,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Ordering key within the column
    #[serde(default)]
    pub position: Position,
}

impl Card {
    /// Create a card with just the required fields
    pub fn new(
        id: impl Into<CardId>,
        title: impl Into<String>,
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            column_id: column_id.into(),
            board_id: board_id.into(),
            assignees: Vec::new(),
            labels: Vec::new(),
            subtasks: Vec::new(),
            position,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Calendar day (UTC) the card is due on
    pub fn due_day(&self) -> Option<NaiveDate> {
        self.due_date.map(|d| d.date_naive())
    }

    /// Fraction of completed subtasks, 0.0 when there are none
    pub fn progress(&self) -> f64 {
        if self.subtasks.is_empty() {
            return 0.0;
        }
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        done as f64 / self.subtasks.len() as f64
    }
}

/// Card priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

/// A user assigned to a card, as displayed on the card face
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub user_id: UserId,
    pub name: String,
    pub initials: String,
}

impl Assignee {
    /// Build an assignee descriptor from a user's first and last name.
    ///
    /// A blank name becomes "User"; initials fall back to "U".
    pub fn for_user(
        user_id: impl Into<UserId>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Self {
        let first = first_name.unwrap_or("").trim();
        let last = last_name.unwrap_or("").trim();

        let full = format!("{} {}", first, last).trim().to_string();
        let name = if full.is_empty() {
            "User".to_string()
        } else {
            full
        };

        let mut initials = String::new();
        initials.push(first.chars().next().unwrap_or('U'));
        if let Some(c) = last.chars().next() {
            initials.push(c);
        }

        Self {
            user_id: user_id.into(),
            name,
            initials: initials.to_uppercase(),
        }
    }
}

/// A checklist item on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial card update. Only fields that are `Some` are sent and merged;
/// everything else is left as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// None = don't change, Some(None) = clear, Some(Some(x)) = set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<Assignee>>,
}

impl CardPatch {
    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.subtasks.is_none()
            && self.labels.is_none()
            && self.assignees.is_none()
    }

    /// Merge the supplied fields into `card`
    pub fn apply_to(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title = title.clone();
        }
        if let Some(description) = &self.description {
            card.description = Some(description.clone());
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            card.due_date = due_date;
        }
        if let Some(subtasks) = &self.subtasks {
            card.subtasks = subtasks.clone();
        }
        if let Some(labels) = &self.labels {
            card.labels = labels.clone();
        }
        if let Some(assignees) = &self.assignees {
            card.assignees = assignees.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_card_wire_format() {
        let json = r#"{
            "_id": "card1",
            "title": "Design new dashboard",
            "priority": "High",
            "dueDate": "2025-10-05T00:00:00.000Z",
            "columnId": "col1",
            "boardId": "board1",
            "assignees": [{"userId": "u1", "name": "Jane Doe", "initials": "JD"}],
            "labels": ["Design"],
            "subtasks": [{"title": "Sketch", "completed": true}],
            "position": 2
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id.as_str(), "card1");
        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.due_day(), NaiveDate::from_ymd_opt(2025, 10, 5));
        assert_eq!(card.position, Position::from(2));
        assert_eq!(card.assignees[0].initials, "JD");
        assert_eq!(card.progress(), 1.0);
    }

    #[test]
    fn test_card_defaults_when_fields_missing() {
        let card: Card =
            serde_json::from_str(r#"{"id":"c","title":"T","columnId":"x","boardId":"b"}"#).unwrap();
        assert_eq!(card.priority, Priority::Medium);
        assert!(card.description.is_none());
        assert_eq!(card.position, Position::ORIGIN);
    }

    #[test]
    fn test_priority_accepts_lowercase() {
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
    }

    #[test]
    fn test_assignee_for_user() {
        let a = Assignee::for_user("u1", Some("jane"), Some("doe"));
        assert_eq!(a.name, "jane doe");
        assert_eq!(a.initials, "JD");

        let anon = Assignee::for_user("u2", None, None);
        assert_eq!(anon.name, "User");
        assert_eq!(anon.initials, "U");
    }

    #[test]
    fn test_patch_merges_only_supplied_fields() {
        let mut card = Card::new("c1", "Title", "b1", "col1", Position::ORIGIN)
            .with_description("keep me");

        let patch = CardPatch {
            priority: Some(Priority::High),
            ..Default::default()
        };
        patch.apply_to(&mut card);

        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.description.as_deref(), Some("keep me"));
        assert_eq!(card.title, "Title");
    }

    #[test]
    fn test_patch_clears_due_date() {
        let due = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut card = Card::new("c1", "Title", "b1", "col1", Position::ORIGIN).with_due_date(due);

        let patch = CardPatch {
            due_date: Some(None),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({"dueDate": null})
        );

        patch.apply_to(&mut card);
        assert!(card.due_date.is_none());
    }
}
