//! UpdateComment command

use super::comment_content;
use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::{Comment, CommentId};
use async_trait::async_trait;
use serde::Deserialize;

/// Replace the text of a comment
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComment {
    pub id: CommentId,
    pub content: String,
}

impl UpdateComment {
    pub fn new(id: impl Into<CommentId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for UpdateComment {
    type Output = Comment;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Comment> {
        let content = comment_content(&self.content)?;
        ctx.gateway().update_comment(&self.id, &content).await
    }
}
