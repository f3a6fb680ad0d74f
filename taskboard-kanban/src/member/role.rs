//! UpdateMemberRole command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::{KanbanGateway, RoleChange};
use crate::operation::Execute;
use crate::types::{BoardId, MemberRole, UserId};
use async_trait::async_trait;
use serde::Deserialize;

/// Change a member's role on the open board
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRole {
    pub user_id: UserId,
    pub role: MemberRole,
    pub board_id: Option<BoardId>,
}

impl UpdateMemberRole {
    pub fn new(user_id: impl Into<UserId>, role: MemberRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            board_id: None,
        }
    }

    pub fn for_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for UpdateMemberRole {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        let board_id = match &self.board_id {
            Some(id) => id.clone(),
            None => ctx.current_board()?,
        };
        ctx.gateway()
            .update_member_role(&RoleChange {
                board_id,
                user_id: self.user_id.clone(),
                role: self.role,
            })
            .await
    }
}
