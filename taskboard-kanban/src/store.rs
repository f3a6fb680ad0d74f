//! BoardStore - in-memory snapshot of the open board
//!
//! The store holds the columns and cards of the last successful fetch, with
//! optimistic local edits layered on top. It is mutated only through
//! [`BoardStore::install`], [`BoardStore::apply_optimistic`],
//! [`BoardStore::reconcile`] and [`BoardStore::commit`].
//!
//! Each card that has optimistic edits in flight carries a chain of pending
//! entries in issuance order. Every entry remembers what the card looked like
//! before that entry was applied, so a failure can restore exactly that state
//! for that single card. When a newer entry exists, resolving an older one
//! never touches the visible card; it only rewrites what the newer entry will
//! restore on its own failure.

use crate::error::{KanbanError, Result};
use crate::gateway::KanbanGateway;
use crate::types::{BoardId, Card, CardId, Column, ColumnId, Position};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Columns and cards of one board as returned by the gateway
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub board_id: Option<BoardId>,
    pub columns: Vec<Column>,
    pub cards: Vec<Card>,
}

/// A local change applied before the server confirms it
#[derive(Debug, Clone, PartialEq)]
pub enum CardMutation {
    /// Insert a card that is not in the store yet
    Create(Card),
    /// Replace a card with an edited copy
    Update(Card),
    /// Reassign a card's column and position
    Move {
        card_id: CardId,
        to_column: ColumnId,
        position: Position,
    },
    /// Remove a card
    Delete(CardId),
}

impl CardMutation {
    /// The card this mutation targets
    pub fn card_id(&self) -> &CardId {
        match self {
            Self::Create(card) | Self::Update(card) => &card.id,
            Self::Move { card_id, .. } | Self::Delete(card_id) => card_id,
        }
    }

    fn kind(&self) -> MutationKind {
        match self {
            Self::Create(_) => MutationKind::Create,
            Self::Update(_) => MutationKind::Update,
            Self::Move { .. } => MutationKind::Move,
            Self::Delete(_) => MutationKind::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MutationKind {
    Create,
    Update,
    Move,
    Delete,
}

/// Handle returned by [`BoardStore::apply_optimistic`] that undoes exactly
/// that mutation when reconciled with [`Outcome::Failed`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReversalToken {
    seq: u64,
    card_id: CardId,
}

impl ReversalToken {
    /// The card the mutation targeted
    pub fn card_id(&self) -> &CardId {
        &self.card_id
    }
}

/// What the gateway said about an optimistic mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The request succeeded; carries the server's copy of the card if it sent one
    Confirmed(Option<Card>),
    /// The request failed
    Failed,
}

/// What [`BoardStore::reconcile`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Server truth replaced (or confirmed) the optimistic state
    Reconciled,
    /// The card was restored to its pre-mutation state
    RolledBack,
    /// A newer mutation of the same card is pending; visible state unchanged
    Superseded,
    /// The token no longer refers to a pending mutation; nothing changed
    Stale,
}

/// Placement lifecycle of a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementState {
    Idle,
    Optimistic { pending: usize },
}

/// Card state captured before a pending mutation
#[derive(Debug, Clone)]
struct Prior {
    card: Card,
    /// Index in the fetch-ordered card list, used when re-inserting
    index: usize,
}

#[derive(Debug, Clone)]
struct PendingEntry {
    seq: u64,
    kind: MutationKind,
    /// `None` when the card did not exist before the mutation
    prior: Option<Prior>,
}

/// In-memory state of the currently open board
#[derive(Debug, Default)]
pub struct BoardStore {
    board_id: Option<BoardId>,
    columns: Vec<Column>,
    /// Cards in fetch order; display order is derived per column
    cards: Vec<Card>,
    pending: HashMap<CardId, Vec<PendingEntry>>,
    next_seq: u64,
}

impl BoardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch columns and cards for a board without touching any store.
    ///
    /// Fails if either request fails.
    pub async fn fetch<G>(gateway: &G, board_id: &BoardId) -> Result<BoardSnapshot>
    where
        G: KanbanGateway + ?Sized,
    {
        let (columns, cards) = tokio::try_join!(
            gateway.list_columns(board_id),
            gateway.list_cards(board_id)
        )?;

        Ok(BoardSnapshot {
            board_id: Some(board_id.clone()),
            columns,
            cards,
        })
    }

    /// Replace the entire snapshot.
    ///
    /// When the snapshot is of the same board, pending optimistic entries
    /// survive: each fetched card becomes what its oldest entry restores on
    /// failure, and the optimistic state is laid back on top until the
    /// responses arrive. Switching boards discards them, and their late
    /// responses reconcile as [`Reconciliation::Stale`].
    pub fn install(&mut self, snapshot: BoardSnapshot) {
        let same_board = self.board_id.is_some() && self.board_id == snapshot.board_id;
        let previous = std::mem::replace(&mut self.cards, snapshot.cards);
        self.board_id = snapshot.board_id;
        self.columns = snapshot.columns;

        if same_board {
            self.rebase_pending(&previous);
        } else if !self.pending.is_empty() {
            debug!(
                "Discarding {} pending card chains on board switch",
                self.pending.len()
            );
            self.pending.clear();
        }

        info!(
            board = ?self.board_id,
            columns = self.columns.len(),
            cards = self.cards.len(),
            "Installed board snapshot"
        );
    }

    /// Fetch and install a board. On failure the previous snapshot is kept.
    pub async fn load<G>(&mut self, gateway: &G, board_id: &BoardId) -> Result<()>
    where
        G: KanbanGateway + ?Sized,
    {
        let snapshot = Self::fetch(gateway, board_id).await?;
        self.install(snapshot);
        Ok(())
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Board currently loaded, if any
    pub fn board_id(&self) -> Option<&BoardId> {
        self.board_id.as_ref()
    }

    /// Columns in server order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    /// All cards in fetch order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Number of cards across all columns
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards of a column, ascending by position.
    ///
    /// Equal positions keep their fetch order, so repeated calls always yield
    /// the same sequence.
    pub fn cards_for_column<'a>(
        &'a self,
        column_id: &ColumnId,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        let mut cards: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| &c.column_id == column_id)
            .collect();
        cards.sort_by_key(|c| c.position);
        cards.into_iter()
    }

    /// Placement lifecycle state of a card
    pub fn placement_state(&self, card_id: &CardId) -> PlacementState {
        match self.pending.get(card_id) {
            Some(chain) if !chain.is_empty() => PlacementState::Optimistic {
                pending: chain.len(),
            },
            _ => PlacementState::Idle,
        }
    }

    // =========================================================================
    // Optimistic mutation
    // =========================================================================

    /// Apply a mutation locally and return the token that reverses it.
    pub fn apply_optimistic(&mut self, mutation: CardMutation) -> Result<ReversalToken> {
        let card_id = mutation.card_id().clone();
        let kind = mutation.kind();
        let index = self.index_of(&card_id);

        let prior = match (&mutation, index) {
            (CardMutation::Create(_), Some(_)) => {
                return Err(KanbanError::validation(format!(
                    "card {} already exists",
                    card_id
                )));
            }
            (CardMutation::Create(_), None) => None,
            (_, None) => return Err(KanbanError::card_not_found(&card_id)),
            (_, Some(i)) => Some(Prior {
                card: self.cards[i].clone(),
                index: i,
            }),
        };

        match mutation {
            CardMutation::Create(card) => self.cards.push(card),
            CardMutation::Update(card) => {
                if let Some(i) = index {
                    self.cards[i] = card;
                }
            }
            CardMutation::Move {
                to_column,
                position,
                ..
            } => {
                if let Some(i) = index {
                    self.cards[i].column_id = to_column;
                    self.cards[i].position = position;
                }
            }
            CardMutation::Delete(_) => {
                if let Some(i) = index {
                    self.cards.remove(i);
                }
            }
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending
            .entry(card_id.clone())
            .or_default()
            .push(PendingEntry { seq, kind, prior });

        debug!(card = %card_id, seq, ?kind, "Applied optimistic mutation");
        Ok(ReversalToken { seq, card_id })
    }

    /// Resolve an optimistic mutation with the gateway's outcome.
    pub fn reconcile(&mut self, token: &ReversalToken, outcome: Outcome) -> Reconciliation {
        let Some(chain) = self.pending.get_mut(&token.card_id) else {
            warn!(card = %token.card_id, seq = token.seq, "Ignoring stale reconciliation");
            return Reconciliation::Stale;
        };
        let Some(pos) = chain.iter().position(|e| e.seq == token.seq) else {
            warn!(card = %token.card_id, seq = token.seq, "Ignoring stale reconciliation");
            return Reconciliation::Stale;
        };

        let is_latest = pos + 1 == chain.len();
        let result = match outcome {
            Outcome::Confirmed(server) => {
                // Later confirmations subsume anything still pending before them
                let entry = chain.drain(..=pos).last();
                match entry {
                    Some(entry) if is_latest => {
                        if let Some(server) = server.filter(|_| entry.kind != MutationKind::Delete)
                        {
                            self.replace_if_present(server);
                        }
                        Reconciliation::Reconciled
                    }
                    Some(entry) => {
                        if let Some(next) = chain.first_mut() {
                            if entry.kind == MutationKind::Delete {
                                next.prior = None;
                            } else if let Some(server) = server {
                                let index = next
                                    .prior
                                    .as_ref()
                                    .map(|p| p.index)
                                    .unwrap_or(usize::MAX);
                                next.prior = Some(Prior {
                                    card: server,
                                    index,
                                });
                            }
                        }
                        Reconciliation::Superseded
                    }
                    None => Reconciliation::Stale,
                }
            }
            Outcome::Failed => {
                let entry = chain.remove(pos);
                if is_latest {
                    self.restore(&token.card_id, entry.prior);
                    warn!(card = %token.card_id, seq = token.seq, "Rolled back optimistic mutation");
                    Reconciliation::RolledBack
                } else {
                    chain[pos].prior = entry.prior;
                    Reconciliation::Superseded
                }
            }
        };

        if self
            .pending
            .get(&token.card_id)
            .is_some_and(|chain| chain.is_empty())
        {
            self.pending.remove(&token.card_id);
        }

        debug!(card = %token.card_id, seq = token.seq, ?result, "Reconciled");
        result
    }

    /// Apply a mutation the server has already accepted.
    ///
    /// Anything still pending for the card is resolved by it, so late
    /// responses for those entries reconcile as stale.
    pub fn commit(&mut self, mutation: CardMutation) -> Result<()> {
        let token = self.apply_optimistic(mutation)?;
        self.reconcile(&token, Outcome::Confirmed(None));
        Ok(())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn index_of(&self, card_id: &CardId) -> Option<usize> {
        self.cards.iter().position(|c| &c.id == card_id)
    }

    /// Carry pending chains over a freshly installed snapshot
    fn rebase_pending(&mut self, previous: &[Card]) {
        let card_ids: Vec<CardId> = self.pending.keys().cloned().collect();
        for card_id in &card_ids {
            let fetched = self.index_of(card_id).map(|i| Prior {
                card: self.cards[i].clone(),
                index: i,
            });
            if let Some(oldest) = self.pending.get_mut(card_id).and_then(|c| c.first_mut()) {
                oldest.prior = fetched;
            }

            let optimistic = previous.iter().find(|c| &c.id == card_id).cloned();
            match (optimistic, self.index_of(card_id)) {
                (Some(card), Some(i)) => self.cards[i] = card,
                (Some(card), None) => self.cards.push(card),
                (None, Some(i)) => {
                    self.cards.remove(i);
                }
                (None, None) => {}
            }
        }
        if !card_ids.is_empty() {
            debug!(chains = card_ids.len(), "Rebased pending card chains onto reload");
        }
    }

    /// Replace a card with server truth, never resurrecting a removed card
    fn replace_if_present(&mut self, card: Card) {
        if let Some(i) = self.index_of(&card.id) {
            self.cards[i] = card;
        }
    }

    fn restore(&mut self, card_id: &CardId, prior: Option<Prior>) {
        match (prior, self.index_of(card_id)) {
            (Some(prior), Some(i)) => self.cards[i] = prior.card,
            (Some(prior), None) => {
                let index = prior.index.min(self.cards.len());
                self.cards.insert(index, prior.card);
            }
            (None, Some(i)) => {
                self.cards.remove(i);
            }
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeGateway;
    use crate::types::{BoardId, Priority};

    fn card(id: &str, column: &str, position: i32) -> Card {
        Card::new(id, id.to_uppercase(), "board", column, Position::from(position))
    }

    fn column(id: &str, title: &str) -> Column {
        Column {
            id: ColumnId::from(id),
            title: title.into(),
            board_id: BoardId::from("board"),
        }
    }

    fn store_with(cards: Vec<Card>) -> BoardStore {
        let mut store = BoardStore::new();
        store.install(BoardSnapshot {
            board_id: Some(BoardId::from("board")),
            columns: vec![column("todo", "To Do"), column("done", "Done")],
            cards,
        });
        store
    }

    fn ids<'a>(cards: impl Iterator<Item = &'a Card>) -> Vec<&'a str> {
        cards.map(|c| c.id.as_str()).collect()
    }

    fn move_to(id: &str, column: &str, position: i32) -> CardMutation {
        CardMutation::Move {
            card_id: CardId::from(id),
            to_column: ColumnId::from(column),
            position: Position::from(position),
        }
    }

    #[test]
    fn test_cards_for_column_sorted_and_stable() {
        let store = store_with(vec![
            card("c", "todo", 3),
            card("a", "todo", 1),
            card("x", "done", 0),
            card("b1", "todo", 2),
            card("b2", "todo", 2),
        ]);

        let todo = ColumnId::from("todo");
        assert_eq!(ids(store.cards_for_column(&todo)), ["a", "b1", "b2", "c"]);
        // Same answer on every call
        assert_eq!(ids(store.cards_for_column(&todo)), ["a", "b1", "b2", "c"]);
        assert_eq!(ids(store.cards_for_column(&ColumnId::from("done"))), ["x"]);
    }

    #[test]
    fn test_failed_move_restores_exact_position() {
        let mut store = store_with(vec![card("a", "todo", 7), card("b", "todo", 9)]);

        let token = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
        assert_eq!(store.card(&CardId::from("a")).unwrap().column_id.as_str(), "done");
        assert_eq!(
            store.placement_state(&CardId::from("a")),
            PlacementState::Optimistic { pending: 1 }
        );

        let result = store.reconcile(&token, Outcome::Failed);
        assert_eq!(result, Reconciliation::RolledBack);

        let restored = store.card(&CardId::from("a")).unwrap();
        assert_eq!(restored.column_id.as_str(), "todo");
        assert_eq!(restored.position, Position::from(7));
        assert_eq!(store.placement_state(&CardId::from("a")), PlacementState::Idle);
    }

    #[test]
    fn test_confirmed_move_takes_server_copy() {
        let mut store = store_with(vec![card("a", "todo", 1)]);
        let token = store.apply_optimistic(move_to("a", "done", 0)).unwrap();

        let server = card("a", "done", 5).with_priority(Priority::High);
        let result = store.reconcile(&token, Outcome::Confirmed(Some(server.clone())));

        assert_eq!(result, Reconciliation::Reconciled);
        assert_eq!(store.card(&CardId::from("a")), Some(&server));
        assert_eq!(store.card_count(), 1);
    }

    #[test]
    fn test_stale_rollback_does_not_undo_newer_move() {
        let mut store = store_with(vec![card("a", "todo", 1)]);

        let first = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
        let second = store.apply_optimistic(move_to("a", "todo", 4)).unwrap();

        // First request fails while the second is still in flight
        assert_eq!(store.reconcile(&first, Outcome::Failed), Reconciliation::Superseded);
        let visible = store.card(&CardId::from("a")).unwrap();
        assert_eq!(visible.column_id.as_str(), "todo");
        assert_eq!(visible.position, Position::from(4));

        // Second failing now restores the original state, not the first move's
        assert_eq!(store.reconcile(&second, Outcome::Failed), Reconciliation::RolledBack);
        let visible = store.card(&CardId::from("a")).unwrap();
        assert_eq!(visible.column_id.as_str(), "todo");
        assert_eq!(visible.position, Position::from(1));
    }

    #[test]
    fn test_superseded_confirmation_becomes_rollback_base() {
        let mut store = store_with(vec![card("a", "todo", 1)]);

        let first = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
        let second = store.apply_optimistic(move_to("a", "todo", 4)).unwrap();

        assert_eq!(
            store.reconcile(&first, Outcome::Confirmed(None)),
            Reconciliation::Superseded
        );
        assert_eq!(store.reconcile(&second, Outcome::Failed), Reconciliation::RolledBack);

        // The first move was accepted by the server, so that is the truth now
        let visible = store.card(&CardId::from("a")).unwrap();
        assert_eq!(visible.column_id.as_str(), "done");
        assert_eq!(visible.position, Position::from(0));
    }

    #[test]
    fn test_late_move_response_does_not_resurrect_deleted_card() {
        for outcome in [Outcome::Failed, Outcome::Confirmed(Some(card("a", "done", 0)))] {
            let mut store = store_with(vec![card("a", "todo", 1), card("b", "todo", 2)]);

            let mv = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
            let del = store
                .apply_optimistic(CardMutation::Delete(CardId::from("a")))
                .unwrap();
            assert_eq!(
                store.reconcile(&del, Outcome::Confirmed(None)),
                Reconciliation::Reconciled
            );

            assert_eq!(store.reconcile(&mv, outcome), Reconciliation::Stale);
            assert!(store.card(&CardId::from("a")).is_none());
            assert_eq!(store.card_count(), 1);
        }
    }

    #[test]
    fn test_move_failure_while_delete_pending_keeps_card_hidden() {
        let mut store = store_with(vec![card("a", "todo", 1)]);

        let mv = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
        let del = store
            .apply_optimistic(CardMutation::Delete(CardId::from("a")))
            .unwrap();

        assert_eq!(store.reconcile(&mv, Outcome::Failed), Reconciliation::Superseded);
        assert!(store.card(&CardId::from("a")).is_none());

        // Delete fails too: the card comes back where it was before the move
        assert_eq!(store.reconcile(&del, Outcome::Failed), Reconciliation::RolledBack);
        let restored = store.card(&CardId::from("a")).unwrap();
        assert_eq!(restored.column_id.as_str(), "todo");
        assert_eq!(restored.position, Position::from(1));
    }

    #[test]
    fn test_failed_create_removes_card() {
        let mut store = store_with(vec![card("a", "todo", 1)]);

        let token = store
            .apply_optimistic(CardMutation::Create(card("n", "todo", 2)))
            .unwrap();
        assert_eq!(store.card_count(), 2);

        store.reconcile(&token, Outcome::Failed);
        assert_eq!(store.card_count(), 1);
        assert!(store.card(&CardId::from("n")).is_none());
    }

    #[test]
    fn test_apply_requires_existing_card() {
        let mut store = store_with(vec![]);
        let result = store.apply_optimistic(move_to("ghost", "done", 0));
        assert!(matches!(result, Err(KanbanError::CardNotFound { .. })));

        let mut store = store_with(vec![card("a", "todo", 1)]);
        let result = store.apply_optimistic(CardMutation::Create(card("a", "todo", 1)));
        assert!(matches!(result, Err(KanbanError::Validation { .. })));
    }

    #[test]
    fn test_rollback_only_touches_its_own_card() {
        let mut store = store_with(vec![card("a", "todo", 1), card("b", "todo", 2)]);

        let ta = store.apply_optimistic(move_to("a", "done", 0)).unwrap();
        let _tb = store.apply_optimistic(move_to("b", "done", 1)).unwrap();

        store.reconcile(&ta, Outcome::Failed);
        assert_eq!(store.card(&CardId::from("a")).unwrap().column_id.as_str(), "todo");
        assert_eq!(store.card(&CardId::from("b")).unwrap().column_id.as_str(), "done");
    }

    #[test]
    fn test_commit_delete_resolves_later_pending_move() {
        let mut store = store_with(vec![card("a", "todo", 1)]);
        let mv = store.apply_optimistic(move_to("a", "done", 0)).unwrap();

        store.commit(CardMutation::Delete(CardId::from("a"))).unwrap();
        assert!(store.card(&CardId::from("a")).is_none());
        assert_eq!(store.placement_state(&CardId::from("a")), PlacementState::Idle);
        assert_eq!(store.reconcile(&mv, Outcome::Failed), Reconciliation::Stale);
        assert!(store.card(&CardId::from("a")).is_none());
    }

    #[test]
    fn test_reload_keeps_pending_move_on_top() {
        let mut store = store_with(vec![card("a", "todo", 1), card("b", "todo", 2)]);
        let token = store.apply_optimistic(move_to("a", "done", 0)).unwrap();

        // Fetched before the server applied the move, with b edited elsewhere
        store.install(BoardSnapshot {
            board_id: Some(BoardId::from("board")),
            columns: vec![column("todo", "To Do"), column("done", "Done")],
            cards: vec![card("a", "todo", 1), card("b", "todo", 5)],
        });
        assert_eq!(store.card(&CardId::from("a")).unwrap().column_id.as_str(), "done");
        assert_eq!(store.card(&CardId::from("b")).unwrap().position, Position::from(5));
        assert_eq!(
            store.placement_state(&CardId::from("a")),
            PlacementState::Optimistic { pending: 1 }
        );

        let server = card("a", "done", 7);
        assert_eq!(
            store.reconcile(&token, Outcome::Confirmed(Some(server.clone()))),
            Reconciliation::Reconciled
        );
        assert_eq!(store.card(&CardId::from("a")), Some(&server));
    }

    #[test]
    fn test_failure_after_reload_restores_fetched_card() {
        let mut store = store_with(vec![card("a", "todo", 1)]);
        let token = store.apply_optimistic(move_to("a", "done", 0)).unwrap();

        store.install(BoardSnapshot {
            board_id: Some(BoardId::from("board")),
            columns: vec![column("todo", "To Do"), column("done", "Done")],
            cards: vec![card("a", "todo", 3)],
        });

        assert_eq!(store.reconcile(&token, Outcome::Failed), Reconciliation::RolledBack);
        assert_eq!(store.card(&CardId::from("a")), Some(&card("a", "todo", 3)));
    }

    #[test]
    fn test_board_switch_makes_pending_tokens_stale() {
        let mut store = store_with(vec![card("a", "todo", 1)]);
        let token = store.apply_optimistic(move_to("a", "done", 0)).unwrap();

        store.install(BoardSnapshot {
            board_id: Some(BoardId::from("other")),
            columns: vec![column("todo", "To Do")],
            cards: vec![card("a", "todo", 1)],
        });

        assert_eq!(
            store.reconcile(&token, Outcome::Confirmed(Some(card("a", "done", 0)))),
            Reconciliation::Stale
        );
        assert_eq!(store.card(&CardId::from("a")).unwrap().column_id.as_str(), "todo");
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot() {
        let gateway = FakeGateway::new();
        let board = gateway.seed_board("Team", &["To Do", "Done"]);
        let todo = gateway.columns_of(&board.id)[0].id.clone();
        gateway.seed_card(Card::new("c1", "First", board.id.clone(), todo.clone(), Position::ORIGIN));

        let mut store = BoardStore::new();
        store.load(&gateway, &board.id).await.unwrap();

        assert_eq!(store.board_id(), Some(&board.id));
        assert_eq!(store.columns().len(), 2);
        assert_eq!(ids(store.cards_for_column(&todo)), ["c1"]);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let gateway = FakeGateway::new();
        let board = gateway.seed_board("Team", &["To Do"]);

        let mut store = store_with(vec![card("a", "todo", 1)]);
        gateway.fail_next("list_cards");

        let result = store.load(&gateway, &board.id).await;
        assert!(matches!(result, Err(KanbanError::Fetch { .. })));
        assert_eq!(store.board_id().map(|b| b.as_str()), Some("board"));
        assert_eq!(store.card_count(), 1);
    }
}
