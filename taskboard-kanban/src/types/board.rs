//! Board-level types: Board, Column, Stage

use super::ids::{BoardId, ColumnId, UserId};
use serde::{Deserialize, Serialize};

/// A kanban board - metadata only. Columns and cards are fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id", alias = "id")]
    pub id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Board {
    /// Titles of the columns every new board starts with, in display order
    pub fn default_column_titles() -> [&'static str; 3] {
        [Stage::ToDo.title(), Stage::InProgress.title(), Stage::Done.title()]
    }
}

/// A column defines a workflow stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "_id", alias = "id")]
    pub id: ColumnId,
    pub title: String,
    pub board_id: BoardId,
}

impl Column {
    /// The semantic stage this column represents, if its title is a known one
    pub fn stage(&self) -> Option<Stage> {
        Stage::from_title(&self.title)
    }
}

/// The fixed set of semantic stages a column title can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ToDo,
    InProgress,
    Done,
}

impl Stage {
    /// Column title used for this stage
    pub fn title(self) -> &'static str {
        match self {
            Stage::ToDo => "To Do",
            Stage::InProgress => "In Progress",
            Stage::Done => "Done",
        }
    }

    /// Parse a column title. Matching is exact, like the board views.
    pub fn from_title(title: &str) -> Option<Self> {
        match title {
            "To Do" => Some(Stage::ToDo),
            "In Progress" => Some(Stage::InProgress),
            "Done" => Some(Stage::Done),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_stage() {
        let column = Column {
            id: ColumnId::from("c1"),
            title: "In Progress".into(),
            board_id: BoardId::from("b1"),
        };
        assert_eq!(column.stage(), Some(Stage::InProgress));

        let custom = Column {
            title: "Review".into(),
            ..column
        };
        assert_eq!(custom.stage(), None);
    }

    #[test]
    fn test_board_wire_format() {
        let board: Board = serde_json::from_str(
            r#"{"_id":"b1","name":"Team","ownerId":"user_1","description":"Main"}"#,
        )
        .unwrap();
        assert_eq!(board.id.as_str(), "b1");
        assert_eq!(board.owner_id, Some(UserId::from("user_1")));
    }

    #[test]
    fn test_default_columns_order() {
        assert_eq!(
            Board::default_column_titles(),
            ["To Do", "In Progress", "Done"]
        );
    }
}
