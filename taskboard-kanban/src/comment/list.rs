//! ListComments command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::types::{CardId, Comment};
use async_trait::async_trait;
use serde::Deserialize;

/// List the comments on a card, oldest first
#[derive(Debug, Clone, Deserialize)]
pub struct ListComments {
    pub card_id: CardId,
}

impl ListComments {
    pub fn new(card_id: impl Into<CardId>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for ListComments {
    type Output = Vec<Comment>;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Vec<Comment>> {
        let mut comments = ctx.gateway().list_comments(&self.card_id).await?;
        comments.sort_by_key(|c| c.created_at);
        Ok(comments)
    }
}
