//! AddMember command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::gateway::{KanbanGateway, MemberInvite};
use crate::operation::Execute;
use crate::types::{BoardId, MemberRole};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Invite someone to the open board by email
#[derive(Debug, Clone, Deserialize)]
pub struct AddMember {
    pub email: String,
    #[serde(default)]
    pub role: MemberRole,
    pub board_id: Option<BoardId>,
}

impl AddMember {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "add member";

    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: MemberRole::default(),
            board_id: None,
        }
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }

    pub fn for_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for AddMember {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(KanbanError::validation("Email is required"));
        }
        let board_id = match &self.board_id {
            Some(id) => id.clone(),
            None => ctx.current_board()?,
        };

        ctx.gateway()
            .add_member(&MemberInvite {
                board_id: board_id.clone(),
                email: email.to_string(),
                role: self.role,
            })
            .await?;
        info!(board = %board_id, role = ?self.role, "Added member");
        Ok(())
    }
}
