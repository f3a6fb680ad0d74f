//! Kanban board client core with optimistic updates
//!
//! This crate holds the state of one open board and turns user intents
//! (create, edit, move, delete a card) into a local optimistic change plus a
//! single request to a remote API. When the response arrives the change is
//! either confirmed with the server's copy or rolled back, one card at a time.
//!
//! ## Overview
//!
//! - **Board State Store** ([`BoardStore`]) - columns and cards of the last
//!   fetch with pending optimistic edits layered on top
//! - **Card Placement Engine** ([`placement`] planners and [`card`] commands) -
//!   computes the store mutation and the gateway request for each intent
//! - **Gateway seam** ([`KanbanGateway`]) - the remote API; the HTTP
//!   implementation lives in `taskboard-gateway`
//! - **Per-card ordering** - requests for the same card run in the order they
//!   were issued, requests for different cards run concurrently
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_kanban::{board::OpenBoard, card::{AddCard, MoveCard}, BoardContext, Execute, KanbanGateway};
//!
//! # async fn example(gateway: Arc<dyn KanbanGateway>) -> taskboard_kanban::Result<()> {
//! let ctx = BoardContext::new(gateway);
//! OpenBoard::new().execute(&ctx).await?;
//!
//! let card = AddCard::new("Write release notes").execute(&ctx).await?;
//! let done = ctx.store().columns()[2].id.clone();
//!
//! if let Err(e) = MoveCard::new(card.id, card.column_id, done).execute(&ctx).await {
//!     eprintln!("{}", e.user_message(MoveCard::ACTION));
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
pub mod filter;
pub mod gateway;
mod operation;
pub mod placement;
mod settings;
pub mod store;
pub mod types;

// Command modules
pub mod board;
pub mod card;
pub mod comment;
pub mod member;
pub mod notification;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use context::{BoardContext, CardTurn};
pub use error::{ErrorKind, KanbanError, Result, CONFLICT_MESSAGE, UNKNOWN_ERROR};
pub use gateway::KanbanGateway;
pub use operation::Execute;
pub use settings::{KanbanSettings, PositionPolicy, DEFAULT_BOARD_NAME};
pub use store::{BoardStore, Outcome, PlacementState, Reconciliation, ReversalToken};

// Re-export commonly used types
pub use types::{
    Assignee, Board, BoardId, BoardMember, Card, CardId, CardPatch, Column, ColumnId, Comment,
    CommentId, MemberRole, Notification, NotificationId, NotificationKind, Position, Priority,
    Stage, Subtask, UserId,
};
