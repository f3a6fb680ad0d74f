//! DeleteComment command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::CommentId;
use async_trait::async_trait;
use serde::Deserialize;

/// Delete a comment
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteComment {
    pub id: CommentId,
}

impl DeleteComment {
    pub fn new(id: impl Into<CommentId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for DeleteComment {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        ctx.gateway().delete_comment(&self.id).await
    }
}
