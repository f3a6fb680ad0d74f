//! OpenBoard command

use crate::board::LoadBoard;
use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::gateway::{KanbanGateway, NewBoard, NewColumn};
use crate::operation::Execute;
use crate::types::{Board, BoardId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Open a board and load it into the store.
///
/// Without an explicit board the user's first board is used. A user with no
/// boards gets one created for them, and a board without columns gets the
/// default To Do / In Progress / Done columns, so there is always somewhere
/// to put a new card.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OpenBoard {
    pub board_id: Option<BoardId>,
}

impl OpenBoard {
    /// Open the user's first board
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a specific board
    pub fn with_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for OpenBoard {
    type Output = Board;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Board> {
        let gateway = ctx.gateway();
        let mut boards = gateway.list_boards().await?.into_iter();

        let board = match &self.board_id {
            Some(id) => boards
                .find(|b| &b.id == id)
                .ok_or_else(|| KanbanError::validation(format!("board {} does not exist", id)))?,
            None => match boards.next() {
                Some(board) => board,
                None => {
                    let board = gateway
                        .create_board(&NewBoard {
                            name: ctx.settings().default_board_name.clone(),
                            description: None,
                        })
                        .await?;
                    info!(board = %board.id, name = %board.name, "Created first board");
                    board
                }
            },
        };

        if gateway.list_columns(&board.id).await?.is_empty() {
            // Created one at a time so the server keeps them in this order
            for title in Board::default_column_titles() {
                gateway
                    .create_column(&NewColumn {
                        board_id: board.id.clone(),
                        title: title.to_string(),
                    })
                    .await?;
            }
            info!(board = %board.id, "Created default columns");
        }

        LoadBoard::new(board.id.clone()).execute(ctx).await?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::KanbanSettings;
    use crate::test_support::FakeGateway;
    use crate::types::Stage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_open_creates_board_and_columns() {
        let gateway = FakeGateway::new();
        let ctx = BoardContext::new(Arc::new(gateway.clone()));

        let board = OpenBoard::new().execute(&ctx).await.unwrap();

        assert_eq!(board.name, "My Board");
        assert_eq!(gateway.boards().len(), 1);
        let stages: Vec<_> = ctx.store().columns().iter().map(|c| c.stage()).collect();
        assert_eq!(
            stages,
            [Some(Stage::ToDo), Some(Stage::InProgress), Some(Stage::Done)]
        );
        assert_eq!(ctx.current_board().unwrap(), board.id);
    }

    #[tokio::test]
    async fn test_open_existing_board_creates_nothing() {
        let gateway = FakeGateway::new();
        let board = gateway.seed_board("Team", &["Backlog"]);
        let ctx = BoardContext::new(Arc::new(gateway.clone()))
            .with_settings(KanbanSettings::default().with_default_board_name("Unused"));

        let opened = OpenBoard::new().execute(&ctx).await.unwrap();

        assert_eq!(opened.id, board.id);
        assert_eq!(gateway.call_count("create_board"), 0);
        assert_eq!(gateway.call_count("create_column"), 0);
        assert_eq!(ctx.store().columns().len(), 1);
    }

    #[tokio::test]
    async fn test_open_unknown_board() {
        let gateway = FakeGateway::new();
        gateway.seed_board("Team", &["To Do"]);
        let ctx = BoardContext::new(Arc::new(gateway));

        let result = OpenBoard::new().with_board("nope").execute(&ctx).await;
        assert!(matches!(result, Err(KanbanError::Validation { .. })));
        assert!(ctx.store().board_id().is_none());
    }
}
