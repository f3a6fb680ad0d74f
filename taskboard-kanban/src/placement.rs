//! Card Placement Engine planners.
//!
//! Each planner is a pure function from an intent and the current store to
//! the optimistic store mutation plus the single gateway request that
//! persists it. Nothing here touches the network or mutates the store, so a
//! drag gesture, a keyboard shortcut or a test can all drive the same code.

use crate::error::{KanbanError, Result};
use crate::gateway::{CardDraft, MoveRequest};
use crate::settings::PositionPolicy;
use crate::store::{BoardStore, CardMutation};
use crate::types::{
    Assignee, BoardId, Card, CardId, CardPatch, ColumnId, Position, Priority, Stage,
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// A request to move a card into another column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent {
    pub card_id: CardId,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
    /// Insertion index among the destination's other cards; `None` is the bottom
    pub index: Option<usize>,
}

/// Store mutation and gateway request for a move
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub mutation: CardMutation,
    pub request: MoveRequest,
}

/// Plan a move.
///
/// Returns `Ok(None)` when source and destination are the same column: the
/// drop is ignored and nothing is sent.
pub fn plan_move(
    intent: &MoveIntent,
    store: &BoardStore,
    policy: PositionPolicy,
) -> Result<Option<MovePlan>> {
    if intent.from_column == intent.to_column {
        debug!(card = %intent.card_id, "Ignoring drop into the same column");
        return Ok(None);
    }

    let card = store
        .card(&intent.card_id)
        .ok_or_else(|| KanbanError::card_not_found(&intent.card_id))?;
    if card.column_id != intent.from_column {
        return Err(KanbanError::validation(format!(
            "card {} is not in column {}",
            intent.card_id, intent.from_column
        )));
    }
    if store.column(&intent.to_column).is_none() {
        return Err(KanbanError::column_not_found(&intent.to_column));
    }

    let neighbours: Vec<Position> = store
        .cards_for_column(&intent.to_column)
        .filter(|c| c.id != intent.card_id)
        .map(|c| c.position)
        .collect();
    let position = match policy {
        PositionPolicy::Interpolate => interpolate(&neighbours, intent.index),
        PositionPolicy::Top => interpolate(&neighbours, Some(0)),
    };

    debug!(
        card = %intent.card_id,
        from = %intent.from_column,
        to = %intent.to_column,
        %position,
        "Planned move"
    );

    Ok(Some(MovePlan {
        mutation: CardMutation::Move {
            card_id: intent.card_id.clone(),
            to_column: intent.to_column.clone(),
            position,
        },
        request: MoveRequest {
            card_id: intent.card_id.clone(),
            from_column_id: intent.from_column.clone(),
            to_column_id: intent.to_column.clone(),
            new_position: position,
        },
    }))
}

/// Position for a card inserted at `index` among `sorted` positions.
///
/// The result never equals a neighbour. When the gap at `index` is too
/// narrow to split, the card goes to the bottom of the column instead.
fn interpolate(sorted: &[Position], index: Option<usize>) -> Position {
    let len = sorted.len();
    let index = index.unwrap_or(len).min(len);
    match (index.checked_sub(1).map(|i| sorted[i]), sorted.get(index)) {
        (None, None) => Position::ORIGIN,
        (None, Some(&first)) => Position::before(first),
        (Some(last), None) => Position::after(last),
        (Some(above), Some(&below)) => Position::strictly_between(above, below)
            .unwrap_or_else(|| {
                let last = sorted[len - 1];
                warn!(%above, %below, %last, "No room between neighbours, placing at the bottom");
                Position::after(last)
            }),
    }
}

/// What the caller wants a new card to look like
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardIntent {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignees: Vec<Assignee>,
    pub labels: Vec<String>,
    /// Destination column; defaults to the board's "To Do" column
    pub column: Option<ColumnId>,
}

/// Gateway request for a create
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePlan {
    pub draft: CardDraft,
}

/// Plan a create.
///
/// The title and description are trimmed; a blank title or a missing
/// destination column is a validation error. The card is appended to the
/// bottom of its column.
pub fn plan_create(intent: &CardIntent, store: &BoardStore) -> Result<CreatePlan> {
    let title = intent.title.trim();
    if title.is_empty() {
        return Err(KanbanError::validation("Task title is required"));
    }

    let board_id: &BoardId = store.board_id().ok_or(KanbanError::BoardNotLoaded)?;

    let column_id = match &intent.column {
        Some(id) => store
            .column(id)
            .map(|c| c.id.clone())
            .ok_or_else(|| KanbanError::validation(format!("column {} does not exist", id)))?,
        None => store
            .columns()
            .iter()
            .find(|c| c.stage() == Some(Stage::ToDo))
            .map(|c| c.id.clone())
            .ok_or_else(|| KanbanError::validation("No \"To Do\" column found on this board"))?,
    };

    let position = store
        .cards_for_column(&column_id)
        .map(|c| c.position)
        .last()
        .map(Position::after)
        .unwrap_or(Position::ORIGIN);

    let description = intent
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    Ok(CreatePlan {
        draft: CardDraft {
            title: title.to_string(),
            board_id: board_id.clone(),
            column_id,
            description,
            priority: intent.priority.unwrap_or_default(),
            due_date: intent.due_date,
            assignees: intent.assignees.clone(),
            labels: intent.labels.clone(),
            position: Some(position),
        },
    })
}

/// Store mutation and gateway request for an edit
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePlan {
    pub mutation: CardMutation,
    pub patch: CardPatch,
}

/// Plan an edit: merge only the supplied fields into the current card.
pub fn plan_update(card_id: &CardId, patch: &CardPatch, store: &BoardStore) -> Result<UpdatePlan> {
    let current = store
        .card(card_id)
        .ok_or_else(|| KanbanError::card_not_found(card_id))?;

    let mut patch = patch.clone();
    if let Some(title) = patch.title.as_mut() {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(KanbanError::validation("Task title is required"));
        }
        *title = trimmed.to_string();
    }
    if patch.is_empty() {
        return Err(KanbanError::validation("Nothing to update"));
    }

    let mut edited: Card = current.clone();
    patch.apply_to(&mut edited);

    Ok(UpdatePlan {
        mutation: CardMutation::Update(edited),
        patch,
    })
}
