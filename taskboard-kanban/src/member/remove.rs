//! RemoveMember command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::gateway::{KanbanGateway, MemberRemoval};
use crate::operation::Execute;
use crate::types::{BoardId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Remove a member from the open board. Needs explicit confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveMember {
    pub user_id: UserId,
    pub board_id: Option<BoardId>,
    #[serde(default)]
    pub confirmed: bool,
}

impl RemoveMember {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            board_id: None,
            confirmed: false,
        }
    }

    pub fn for_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }

    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for RemoveMember {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        if !self.confirmed {
            return Err(KanbanError::validation("Removing a member must be confirmed"));
        }
        let board_id = match &self.board_id {
            Some(id) => id.clone(),
            None => ctx.current_board()?,
        };

        ctx.gateway()
            .remove_member(&MemberRemoval {
                board_id: board_id.clone(),
                user_id: self.user_id.clone(),
            })
            .await?;
        info!(board = %board_id, user = %self.user_id, "Removed member");
        Ok(())
    }
}
