//! DeleteCard command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::store::CardMutation;
use crate::types::CardId;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

/// Delete a card. The caller must confirm the deletion explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteCard {
    pub id: CardId,
    #[serde(default)]
    pub confirmed: bool,
}

impl DeleteCard {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "delete task";

    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            confirmed: false,
        }
    }

    /// Mark the deletion as confirmed by the user
    pub fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for DeleteCard {
    type Output = ();

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<()> {
        if !self.confirmed {
            return Err(KanbanError::validation("Deletion must be confirmed"));
        }

        let mut turn = {
            let store = ctx.store();
            if store.card(&self.id).is_none() {
                return Err(KanbanError::card_not_found(&self.id));
            }
            ctx.take_turn(&self.id)
        };

        turn.ready().await;
        ctx.gateway().delete_card(&self.id).await?;

        {
            let mut store = ctx.store();
            if store.card(&self.id).is_some() {
                store.commit(CardMutation::Delete(self.id.clone()))?;
            }
        }
        if ctx.close_card_if_open(&self.id) {
            info!(card = %self.id, "Closed detail view of deleted card");
        }

        info!(card = %self.id, "Deleted card");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::loaded_board;

    #[tokio::test]
    async fn test_delete_card() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0), ("b", "Done", 0)]).await;
        ctx.set_open_card(Some(CardId::from("a")));

        DeleteCard::new("a").confirmed().execute(&ctx).await.unwrap();

        assert!(ctx.store().card(&CardId::from("a")).is_none());
        assert_eq!(ctx.store().card_count(), 1);
        assert_eq!(ctx.open_card(), None);
        assert!(gateway.card(&CardId::from("a")).is_none());
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_is_rejected() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;

        let err = DeleteCard::new("a").execute(&ctx).await.unwrap_err();
        assert!(matches!(err, KanbanError::Validation { .. }));
        assert_eq!(gateway.call_count("delete_card"), 0);
        assert_eq!(ctx.store().card_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_card() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        ctx.set_open_card(Some(CardId::from("a")));
        gateway.fail_next("delete_card");

        let err = DeleteCard::new("a").confirmed().execute(&ctx).await.unwrap_err();
        assert_eq!(
            err.user_message(DeleteCard::ACTION),
            "Failed to delete task: injected failure"
        );
        assert!(ctx.store().card(&CardId::from("a")).is_some());
        assert_eq!(ctx.open_card(), Some(CardId::from("a")));
    }
}
