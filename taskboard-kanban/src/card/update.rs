//! UpdateCard command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::placement::plan_update;
use crate::store::Outcome;
use crate::types::{Assignee, Card, CardId, CardPatch, Priority, Subtask};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

/// Edit a card. Only the fields that are set are changed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCard {
    pub id: CardId,
    #[serde(flatten)]
    pub patch: CardPatch,
}

impl UpdateCard {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "update task";

    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            patch: CardPatch::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.patch.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.patch.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.patch.priority = Some(priority);
        self
    }

    /// Set (`Some`) or clear (`None`) the due date
    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.patch.due_date = Some(due_date);
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.patch.subtasks = Some(subtasks);
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.patch.labels = Some(labels);
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<Assignee>) -> Self {
        self.patch.assignees = Some(assignees);
        self
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for UpdateCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Card> {
        let (patch, token, mut turn) = {
            let mut store = ctx.store();
            let plan = plan_update(&self.id, &self.patch, &store)?;
            let token = store.apply_optimistic(plan.mutation)?;
            let turn = ctx.take_turn(&self.id);
            (plan.patch, token, turn)
        };

        turn.ready().await;
        match ctx.gateway().update_card(&self.id, &patch).await {
            Ok(card) => {
                let reconciliation = ctx
                    .store()
                    .reconcile(&token, Outcome::Confirmed(Some(card.clone())));
                info!(card = %self.id, ?reconciliation, "Updated card");
                Ok(card)
            }
            Err(e) => {
                let reconciliation = ctx.store().reconcile(&token, Outcome::Failed);
                warn!(card = %self.id, ?reconciliation, error = %e, "Update failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use crate::test_support::loaded_board;

    #[tokio::test]
    async fn test_partial_edit_preserves_other_fields() {
        let (_gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        UpdateCard::new("a")
            .with_description("Original notes")
            .execute(&ctx)
            .await
            .unwrap();

        let card = UpdateCard::new("a")
            .with_priority(Priority::High)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(card.priority, Priority::High);
        assert_eq!(card.description.as_deref(), Some("Original notes"));
        let stored = ctx.store().card(&CardId::from("a")).cloned().unwrap();
        assert_eq!(stored, card);
    }

    #[tokio::test]
    async fn test_only_supplied_fields_are_sent() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        UpdateCard::new("a")
            .with_title("  Renamed ")
            .execute(&ctx)
            .await
            .unwrap();

        let (_, patch) = &gateway.patches()[0];
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            serde_json::json!({"title": "Renamed"})
        );
    }

    #[tokio::test]
    async fn test_failed_update_rolls_back() {
        let (gateway, ctx) = loaded_board(&[("a", "To Do", 0)]).await;
        gateway.fail_next("update_card");

        let result = UpdateCard::new("a")
            .with_title("Never saved")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(KanbanError::Fetch { .. })));
        assert_eq!(ctx.store().card(&CardId::from("a")).unwrap().title, "A");
    }

    #[tokio::test]
    async fn test_update_unknown_card() {
        let (gateway, ctx) = loaded_board(&[]).await;
        let result = UpdateCard::new("ghost")
            .with_priority(Priority::Low)
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(KanbanError::CardNotFound { .. })));
        assert_eq!(gateway.call_count("update_card"), 0);
    }

    #[test]
    fn test_deserialize_flattened_patch() {
        let cmd: UpdateCard =
            serde_json::from_str(r#"{"id":"a","priority":"Low","dueDate":null}"#).unwrap();
        assert_eq!(cmd.patch.priority, Some(Priority::Low));
    }
}
