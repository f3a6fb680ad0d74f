//! In-memory gateway for tests.
//!
//! `FakeGateway` behaves like the remote API: it mints ids, keeps boards,
//! columns, cards, comments, members and notifications in memory, and answers
//! requests for unknown cards with a conflict. Tests can inject failures for
//! the next call of an operation and hold requests at a gate to control the
//! order in which responses arrive.

use crate::error::{KanbanError, Result};
use crate::gateway::{
    CardDraft, KanbanGateway, MemberInvite, MemberRemoval, MoveRequest, NewBoard, NewColumn,
    NewComment, RoleChange,
};
use crate::types::{
    Board, BoardId, BoardMember, Card, CardId, CardPatch, Column, ColumnId, Comment,
    CommentAuthor, CommentId, Notification, NotificationId, Position, UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;
use ulid::Ulid;

/// User id the fake attributes comments to
pub const FAKE_USER: &str = "user_fake";

/// Kind of failure to inject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injected {
    Fetch,
    Conflict,
}

impl Injected {
    fn into_error(self) -> KanbanError {
        match self {
            Injected::Fetch => KanbanError::fetch(Some(500), Some("injected failure".into())),
            Injected::Conflict => KanbanError::conflict(Some("injected conflict".into())),
        }
    }
}

/// Holds requests of one operation until released
#[derive(Debug, Clone)]
pub struct Gate {
    permits: Arc<Semaphore>,
}

impl Gate {
    /// Let one held request through
    pub fn release(&self) {
        self.permits.add_permits(1);
    }
}

#[derive(Debug, Default)]
struct FakeState {
    boards: Vec<Board>,
    columns: Vec<Column>,
    cards: Vec<Card>,
    comments: Vec<Comment>,
    members: HashMap<BoardId, Vec<BoardMember>>,
    notifications: Vec<Notification>,
    failures: HashMap<String, Vec<Injected>>,
    gates: HashMap<String, Gate>,
    calls: Vec<String>,
    moves: Vec<MoveRequest>,
    drafts: Vec<CardDraft>,
    patches: Vec<(CardId, CardPatch)>,
    bare_move_ack: bool,
}

/// In-memory implementation of [`KanbanGateway`]
#[derive(Debug, Default, Clone)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

fn new_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // =========================================================================
    // Seeding and inspection
    // =========================================================================

    /// Create a board with the given column titles
    pub fn seed_board(&self, name: &str, column_titles: &[&str]) -> Board {
        let board = Board {
            id: BoardId::from_string(new_id()),
            name: name.to_string(),
            owner_id: Some(UserId::from(FAKE_USER)),
            description: None,
        };
        let mut state = self.state();
        state.boards.push(board.clone());
        for title in column_titles {
            state.columns.push(Column {
                id: ColumnId::from_string(new_id()),
                title: title.to_string(),
                board_id: board.id.clone(),
            });
        }
        board
    }

    /// Put a card on the server as-is
    pub fn seed_card(&self, card: Card) {
        self.state().cards.push(card);
    }

    /// Add a notification
    pub fn seed_notification(&self, notification: Notification) {
        self.state().notifications.push(notification);
    }

    /// Columns of a board in server order
    pub fn columns_of(&self, board_id: &BoardId) -> Vec<Column> {
        self.state()
            .columns
            .iter()
            .filter(|c| &c.board_id == board_id)
            .cloned()
            .collect()
    }

    /// Server copy of a card
    pub fn card(&self, card_id: &CardId) -> Option<Card> {
        self.state().cards.iter().find(|c| &c.id == card_id).cloned()
    }

    /// Boards on the server
    pub fn boards(&self) -> Vec<Board> {
        self.state().boards.clone()
    }

    /// Make the next call of `op` fail with a fetch error
    pub fn fail_next(&self, op: &str) {
        self.inject(op, Injected::Fetch);
    }

    /// Make the next call of `op` fail with a conflict
    pub fn conflict_next(&self, op: &str) {
        self.inject(op, Injected::Conflict);
    }

    /// Queue an injected failure for `op`; failures are consumed in order
    pub fn inject(&self, op: &str, failure: Injected) {
        self.state()
            .failures
            .entry(op.to_string())
            .or_default()
            .push(failure);
    }

    /// Hold every call of `op` until the returned gate releases it
    pub fn gate(&self, op: &str) -> Gate {
        let gate = Gate {
            permits: Arc::new(Semaphore::new(0)),
        };
        self.state().gates.insert(op.to_string(), gate.clone());
        gate
    }

    /// Acknowledge moves without echoing the card back
    pub fn ack_moves_without_card(&self) {
        self.state().bare_move_ack = true;
    }

    /// Names of the operations called so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// How many times `op` was called
    pub fn call_count(&self, op: &str) -> usize {
        self.state().calls.iter().filter(|c| c.as_str() == op).count()
    }

    /// Move requests received, in arrival order
    pub fn moves(&self) -> Vec<MoveRequest> {
        self.state().moves.clone()
    }

    /// Create payloads received
    pub fn drafts(&self) -> Vec<CardDraft> {
        self.state().drafts.clone()
    }

    /// Update payloads received
    pub fn patches(&self) -> Vec<(CardId, CardPatch)> {
        self.state().patches.clone()
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Record the call, wait at its gate, then apply any injected failure
    async fn enter(&self, op: &str) -> Result<()> {
        let gate = {
            let mut state = self.state();
            state.calls.push(op.to_string());
            state.gates.get(op).cloned()
        };

        if let Some(gate) = gate {
            if let Ok(permit) = gate.permits.acquire().await {
                permit.forget();
            }
        }

        let failure = {
            let mut state = self.state();
            match state.failures.get_mut(op) {
                Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                _ => None,
            }
        };
        match failure {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

fn missing_card(card_id: &CardId) -> KanbanError {
    KanbanError::conflict(Some(format!("Card {} not found", card_id)))
}

#[async_trait]
impl KanbanGateway for FakeGateway {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        self.enter("list_boards").await?;
        Ok(self.state().boards.clone())
    }

    async fn create_board(&self, board: &NewBoard) -> Result<Board> {
        self.enter("create_board").await?;
        let created = Board {
            id: BoardId::from_string(new_id()),
            name: board.name.clone(),
            owner_id: Some(UserId::from(FAKE_USER)),
            description: board.description.clone(),
        };
        self.state().boards.push(created.clone());
        Ok(created)
    }

    async fn list_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        self.enter("list_columns").await?;
        Ok(self.columns_of(board_id))
    }

    async fn create_column(&self, column: &NewColumn) -> Result<Column> {
        self.enter("create_column").await?;
        let created = Column {
            id: ColumnId::from_string(new_id()),
            title: column.title.clone(),
            board_id: column.board_id.clone(),
        };
        self.state().columns.push(created.clone());
        Ok(created)
    }

    async fn list_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        self.enter("list_cards").await?;
        Ok(self
            .state()
            .cards
            .iter()
            .filter(|c| &c.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn create_card(&self, draft: &CardDraft) -> Result<Card> {
        self.enter("create_card").await?;
        let mut state = self.state();
        state.drafts.push(draft.clone());

        let position = draft.position.unwrap_or_else(|| {
            state
                .cards
                .iter()
                .filter(|c| c.column_id == draft.column_id)
                .map(|c| c.position)
                .max()
                .map(Position::after)
                .unwrap_or(Position::ORIGIN)
        });

        let card = Card {
            id: CardId::from_string(new_id()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            due_date: draft.due_date,
            column_id: draft.column_id.clone(),
            board_id: draft.board_id.clone(),
            assignees: draft.assignees.clone(),
            labels: draft.labels.clone(),
            subtasks: Vec::new(),
            position,
        };
        state.cards.push(card.clone());
        Ok(card)
    }

    async fn update_card(&self, card_id: &CardId, patch: &CardPatch) -> Result<Card> {
        self.enter("update_card").await?;
        let mut state = self.state();
        state.patches.push((card_id.clone(), patch.clone()));

        let card = state
            .cards
            .iter_mut()
            .find(|c| &c.id == card_id)
            .ok_or_else(|| missing_card(card_id))?;
        patch.apply_to(card);
        Ok(card.clone())
    }

    async fn move_card(&self, request: &MoveRequest) -> Result<Option<Card>> {
        self.enter("move_card").await?;
        let mut state = self.state();
        state.moves.push(request.clone());

        let bare = state.bare_move_ack;
        let card = state
            .cards
            .iter_mut()
            .find(|c| c.id == request.card_id)
            .ok_or_else(|| missing_card(&request.card_id))?;
        card.column_id = request.to_column_id.clone();
        card.position = request.new_position;
        let moved = card.clone();

        Ok(if bare { None } else { Some(moved) })
    }

    async fn delete_card(&self, card_id: &CardId) -> Result<()> {
        self.enter("delete_card").await?;
        let mut state = self.state();
        let before = state.cards.len();
        state.cards.retain(|c| &c.id != card_id);
        if state.cards.len() == before {
            return Err(missing_card(card_id));
        }
        state.comments.retain(|c| &c.card_id != card_id);
        Ok(())
    }

    async fn list_members(&self, board_id: &BoardId) -> Result<Vec<BoardMember>> {
        self.enter("list_members").await?;
        Ok(self
            .state()
            .members
            .get(board_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_member(&self, invite: &MemberInvite) -> Result<()> {
        self.enter("add_member").await?;
        let mut state = self.state();
        let members = state.members.entry(invite.board_id.clone()).or_default();
        if members.iter().any(|m| m.email == invite.email) {
            return Err(KanbanError::fetch(
                Some(400),
                Some("User is already a member".into()),
            ));
        }
        members.push(BoardMember {
            user_id: UserId::from_string(new_id()),
            name: None,
            email: invite.email.clone(),
            role: invite.role,
        });
        Ok(())
    }

    async fn update_member_role(&self, change: &RoleChange) -> Result<()> {
        self.enter("update_member_role").await?;
        let mut state = self.state();
        let member = state
            .members
            .get_mut(&change.board_id)
            .and_then(|members| members.iter_mut().find(|m| m.user_id == change.user_id))
            .ok_or_else(|| KanbanError::conflict(Some("Member not found".into())))?;
        member.role = change.role;
        Ok(())
    }

    async fn remove_member(&self, removal: &MemberRemoval) -> Result<()> {
        self.enter("remove_member").await?;
        if let Some(members) = self.state().members.get_mut(&removal.board_id) {
            members.retain(|m| m.user_id != removal.user_id);
        }
        Ok(())
    }

    async fn list_comments(&self, card_id: &CardId) -> Result<Vec<Comment>> {
        self.enter("list_comments").await?;
        Ok(self
            .state()
            .comments
            .iter()
            .filter(|c| &c.card_id == card_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        self.enter("create_comment").await?;
        let mut state = self.state();
        if !state.cards.iter().any(|c| c.id == comment.card_id) {
            return Err(missing_card(&comment.card_id));
        }
        let created = Comment {
            id: CommentId::from_string(new_id()),
            card_id: comment.card_id.clone(),
            author: Some(CommentAuthor {
                user_id: UserId::from(FAKE_USER),
                name: None,
            }),
            content: comment.content.clone(),
            created_at: Utc::now(),
        };
        state.comments.push(created.clone());
        Ok(created)
    }

    async fn update_comment(&self, comment_id: &CommentId, content: &str) -> Result<Comment> {
        self.enter("update_comment").await?;
        let mut state = self.state();
        let comment = state
            .comments
            .iter_mut()
            .find(|c| &c.id == comment_id)
            .ok_or_else(|| KanbanError::conflict(Some("Comment not found".into())))?;
        comment.content = content.to_string();
        Ok(comment.clone())
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> Result<()> {
        self.enter("delete_comment").await?;
        self.state().comments.retain(|c| &c.id != comment_id);
        Ok(())
    }

    async fn list_notifications(&self) -> Result<Vec<Notification>> {
        self.enter("list_notifications").await?;
        Ok(self.state().notifications.clone())
    }

    async fn unread_notification_count(&self) -> Result<u64> {
        self.enter("unread_notification_count").await?;
        Ok(self
            .state()
            .notifications
            .iter()
            .filter(|n| !n.is_read)
            .count() as u64)
    }

    async fn mark_notification_read(&self, notification_id: &NotificationId) -> Result<()> {
        self.enter("mark_notification_read").await?;
        if let Some(n) = self
            .state()
            .notifications
            .iter_mut()
            .find(|n| &n.id == notification_id)
        {
            n.is_read = true;
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        self.enter("mark_all_notifications_read").await?;
        for n in self.state().notifications.iter_mut() {
            n.is_read = true;
        }
        Ok(())
    }
}

/// A fake server holding one board with the default columns and the given
/// cards (`(id, column title, position)`), plus a context with that board
/// loaded.
pub async fn loaded_board(
    cards: &[(&str, &str, i32)],
) -> (FakeGateway, crate::context::BoardContext<FakeGateway>) {
    use crate::board::LoadBoard;
    use crate::operation::Execute;

    let gateway = FakeGateway::new();
    let board = gateway.seed_board("Team", &Board::default_column_titles());
    let columns = gateway.columns_of(&board.id);

    for (id, column_title, position) in cards {
        let column = columns
            .iter()
            .find(|c| c.title == *column_title)
            .unwrap_or_else(|| panic!("no column titled {column_title}"));
        gateway.seed_card(Card::new(
            *id,
            id.to_uppercase(),
            board.id.clone(),
            column.id.clone(),
            Position::from(*position),
        ));
    }

    let ctx = crate::context::BoardContext::new(Arc::new(gateway.clone()));
    if let Err(e) = LoadBoard::new(board.id).execute(&ctx).await {
        panic!("failed to load seeded board: {e}");
    }
    (gateway, ctx)
}
