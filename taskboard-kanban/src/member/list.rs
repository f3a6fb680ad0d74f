//! ListMembers command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::{BoardId, BoardMember};
use async_trait::async_trait;
use serde::Deserialize;

/// List the members of a board (the open board by default)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListMembers {
    pub board_id: Option<BoardId>,
}

impl ListMembers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_board(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: Some(board_id.into()),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for ListMembers {
    type Output = Vec<BoardMember>;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Vec<BoardMember>> {
        let board_id = match &self.board_id {
            Some(id) => id.clone(),
            None => ctx.current_board()?,
        };
        ctx.gateway().list_members(&board_id).await
    }
}
