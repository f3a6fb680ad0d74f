//! AddCard command

use crate::context::BoardContext;
use crate::error::Result;
use crate::gateway::KanbanGateway;
use crate::operation::Execute;
use crate::placement::{plan_create, CardIntent};
use crate::store::CardMutation;
use crate::types::{Assignee, Card, ColumnId, Priority};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

/// Create a new card on the open board
#[derive(Debug, Clone, Deserialize)]
pub struct AddCard {
    /// The card title (required)
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Destination column; the "To Do" column when absent
    pub column: Option<ColumnId>,
}

impl AddCard {
    /// Action name used in user-facing failure messages
    pub const ACTION: &'static str = "create task";

    /// Create a new AddCard command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
            assignees: Vec::new(),
            labels: Vec::new(),
            column: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Add an assignee
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignees.push(assignee);
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Put the card in a specific column
    pub fn in_column(mut self, column: impl Into<ColumnId>) -> Self {
        self.column = Some(column.into());
        self
    }

    fn intent(&self) -> CardIntent {
        CardIntent {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            due_date: self.due_date,
            assignees: self.assignees.clone(),
            labels: self.labels.clone(),
            column: self.column.clone(),
        }
    }
}

#[async_trait]
impl<G: KanbanGateway + ?Sized> Execute<BoardContext<G>> for AddCard {
    type Output = Card;

    async fn execute(&self, ctx: &BoardContext<G>) -> Result<Card> {
        let plan = {
            let store = ctx.store();
            plan_create(&self.intent(), &store)?
        };

        debug!(title = %plan.draft.title, column = %plan.draft.column_id, "Creating card");
        let card = ctx.gateway().create_card(&plan.draft).await?;

        {
            let mut store = ctx.store();
            // A reload may have switched boards or already fetched the card
            if store.board_id() == Some(&card.board_id) && store.card(&card.id).is_none() {
                store.commit(CardMutation::Create(card.clone()))?;
            }
        }

        info!(card = %card.id, column = %card.column_id, "Created card");
        Ok(card)
    }
}
