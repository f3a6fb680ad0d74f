//! MoveCard command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::placement::{plan_move, MoveIntent};
use crate::store::{Outcome, Reconciliation};
use crate::types::{Card, CardId, ColumnId};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{info, warn};

/// Result of a move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Dropped back into its own column; nothing happened
    Unchanged,
    /// The move request completed
    Moved {
        /// The card as the store shows it now, if it is still on the board
        card: Option<Card>,
        reconciliation: Reconciliation,
    },
}

/// Move a card to another column
#[derive(Debug, Clone, Deserialize)]
pub struct MoveCard {
    pub card_id: CardId,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
    /// Where to insert among the destination's cards; bottom when absent
    #[serde(default)]
    pub index: Option<usize>,
}

impl MoveCard {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "move task";

    pub fn new(
        card_id: impl Into<CardId>,
        from_column: impl Into<ColumnId>,
        to_column: impl Into<ColumnId>,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            from_column: from_column.into(),
            to_column: to_column.into(),
            index: None,
        }
    }

    /// Insert at this index among the destination's cards
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    fn intent(&self) -> MoveIntent {
        MoveIntent {
            card_id: self.card_id.clone(),
            from_column: self.from_column.clone(),
            to_column: self.to_column.clone(),
            index: self.index,
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for MoveCard {
    type Output = MoveOutcome;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<MoveOutcome> {
        let (request, token, mut turn) = {
            let mut store = ctx.store();
            let Some(plan) = plan_move(&self.intent(), &store, ctx.settings().position_policy)?
            else {
                return Ok(MoveOutcome::Unchanged);
            };
            let token = store.apply_optimistic(plan.mutation)?;
            let turn = ctx.take_turn(&self.card_id);
            (plan.request, token, turn)
        };

        turn.ready().await;
        let result = ctx.gateway().move_card(&request).await;

        let reconciliation = match result {
            Ok(server) => ctx.store().reconcile(&token, Outcome::Confirmed(server)),
            Err(e) => {
                let reconciliation = ctx.store().reconcile(&token, Outcome::Failed);
                warn!(card = %self.card_id, ?reconciliation, error = %e, "Move failed");
                return Err(e);
            }
        };

        info!(
            card = %self.card_id,
            to = %self.to_column,
            position = %request.new_position,
            ?reconciliation,
            "Moved card"
        );
        let card = ctx.store().card(&self.card_id).cloned();
        Ok(MoveOutcome::Moved {
            card,
            reconciliation,
        })
    }
}
