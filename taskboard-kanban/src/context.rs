//! BoardContext - access to the gateway, the store and per-card ordering
//!
//! The context provides access primitives. No business logic lives here;
//! commands do all the work.

use crate::error::{KanbanError, Result};
use crate::gateway::KanbanGateway;
use crate::settings::KanbanSettings;
use crate::store::BoardStore;
use crate::types::{BoardId, CardId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// A place in one card's request queue.
///
/// Requests for the same card run strictly in issuance order. The turn ends
/// when this value is dropped, which lets the next request for the card go.
#[derive(Debug)]
pub struct CardTurn {
    previous: Option<oneshot::Receiver<()>>,
    _done: oneshot::Sender<()>,
}

impl CardTurn {
    /// Wait until every earlier request for this card has finished
    pub async fn ready(&mut self) {
        if let Some(previous) = self.previous.as_mut() {
            // The sender is only ever dropped, so the error is the signal
            let _ = previous.await;
            self.previous = None;
        }
    }
}

/// Context passed to every command - provides access, not logic
pub struct BoardContext<G: ?Sized> {
    settings: KanbanSettings,
    store: Mutex<BoardStore>,
    /// Receiver of the most recently issued turn per card
    turns: Mutex<HashMap<CardId, oneshot::Receiver<()>>>,
    /// Card whose detail view is open
    open_card: Mutex<Option<CardId>>,
    gateway: Arc<G>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<G: KanbanGateway + ?Sized> BoardContext<G> {
    /// Create a context over a gateway with default settings
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            settings: KanbanSettings::default(),
            store: Mutex::new(BoardStore::new()),
            turns: Mutex::new(HashMap::new()),
            open_card: Mutex::new(None),
            gateway,
        }
    }

    /// Use the given settings
    pub fn with_settings(mut self, settings: KanbanSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The remote gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Engine settings
    pub fn settings(&self) -> &KanbanSettings {
        &self.settings
    }

    /// Lock the board store.
    ///
    /// The guard must not be held across an await point.
    pub fn store(&self) -> MutexGuard<'_, BoardStore> {
        lock(&self.store)
    }

    /// The board currently loaded into the store
    pub fn current_board(&self) -> Result<BoardId> {
        self.store()
            .board_id()
            .cloned()
            .ok_or(KanbanError::BoardNotLoaded)
    }

    // =========================================================================
    // Per-card ordering
    // =========================================================================

    /// Join the back of a card's request queue.
    ///
    /// Take the turn while still holding the store lock used to apply the
    /// optimistic mutation, so queue order matches the order of mutations.
    pub fn take_turn(&self, card_id: &CardId) -> CardTurn {
        let mut turns = lock(&self.turns);
        Self::enqueue(&mut turns, card_id)
    }

    fn enqueue(
        turns: &mut HashMap<CardId, oneshot::Receiver<()>>,
        card_id: &CardId,
    ) -> CardTurn {
        // Drop queues whose last request has already finished
        turns.retain(|_, rx| {
            !matches!(rx.try_recv(), Err(oneshot::error::TryRecvError::Closed))
        });

        let (done, rx) = oneshot::channel();
        let previous = turns.insert(card_id.clone(), rx);
        CardTurn {
            previous,
            _done: done,
        }
    }

    // =========================================================================
    // Detail view selection
    // =========================================================================

    /// Card whose detail view is open, if any
    pub fn open_card(&self) -> Option<CardId> {
        lock(&self.open_card).clone()
    }

    /// Open (or with `None`, close) the detail view
    pub fn set_open_card(&self, card_id: Option<CardId>) {
        *lock(&self.open_card) = card_id;
    }

    /// Close the detail view if it shows `card_id`
    pub fn close_card_if_open(&self, card_id: &CardId) -> bool {
        let mut open = lock(&self.open_card);
        if open.as_ref() == Some(card_id) {
            *open = None;
            true
        } else {
            false
        }
    }
}
