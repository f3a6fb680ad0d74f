//! AddComment command

use super::comment_content;
use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::{KanbanGateway, NewComment};
use crate::operation::Execute;
use crate::types::{CardId, Comment};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Add a comment to a card
#[derive(Debug, Clone, Deserialize)]
pub struct AddComment {
    pub card_id: CardId,
    pub content: String,
}

impl AddComment {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "add comment";

    pub fn new(card_id: impl Into<CardId>, content: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            content: content.into(),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for AddComment {
    type Output = Comment;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Comment> {
        let request = NewComment {
            card_id: self.card_id.clone(),
            content: comment_content(&self.content)?,
        };
        let comment = ctx.gateway().create_comment(&request).await?;
        info!(card = %self.card_id, comment = %comment.id, "Added comment");
        Ok(comment)
    }
}
