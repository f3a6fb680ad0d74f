//! LoadBoard command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::store::BoardStore;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;

/// Replace the store's snapshot with a fresh fetch of a board.
///
/// If either the column or the card request fails the previous snapshot is
/// kept.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadBoard {
    pub board_id: BoardId,
}

impl LoadBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for LoadBoard {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        let snapshot = BoardStore::fetch(ctx.gateway(), &self.board_id).await?;
        ctx.store().install(snapshot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use crate::test_support::loaded_board;
    use crate::types::{Card, Position};

    #[tokio::test]
    async fn test_reload_picks_up_server_changes() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        let board = ctx.current_board().unwrap();
        let done = ctx.store().columns()[2].id.clone();
        gateway.seed_card(Card::new("z", "Z", board.clone(), done.clone(), Position::ORIGIN));

        LoadBoard::new(board).execute(&ctx).await.unwrap();
        assert_eq!(ctx.store().card_count(), 2);
        assert_eq!(ctx.store().cards_for_column(&done).count(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_snapshot() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        let board = ctx.current_board().unwrap();
        gateway.fail_next("list_columns");

        let err = LoadBoard::new(board).execute(&ctx).await.unwrap_err();
        assert!(matches!(err, KanbanError::Fetch { .. }));
        assert_eq!(ctx.store().card_count(), 1);
        assert_eq!(ctx.store().columns().len(), 3);
    }
}
