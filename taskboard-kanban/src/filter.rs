//! Quick-action views over the loaded board.
//!
//! Every view walks the columns in server order and each column's cards in
//! display order, so results keep the order a user sees on the board. The
//! current day and time are always passed in; nothing here reads the clock.

use crate::store::BoardStore;
use crate::types::{Card, Priority, Stage};
use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// How many days ahead "due soon" looks, inclusive
pub const DUE_SOON_DAYS: u64 = 7;

/// Quick-action filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    #[default]
    All,
    /// Cards in the "In Progress" column
    InProgress,
    /// Cards in the "Done" column
    Completed,
    /// Cards due between today and a week from today, inclusive
    DueSoon,
    /// Cards without a due date
    NoDueDate,
}

impl QuickFilter {
    /// Whether a card passes this filter.
    ///
    /// `stage` is the stage of the card's column.
    pub fn matches(self, card: &Card, stage: Option<Stage>, today: NaiveDate) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::InProgress => stage == Some(Stage::InProgress),
            QuickFilter::Completed => stage == Some(Stage::Done),
            QuickFilter::DueSoon => card.due_day().is_some_and(|due| is_due_soon(due, today)),
            QuickFilter::NoDueDate => card.due_date.is_none(),
        }
    }
}

/// `today <= due <= today + 7 days`, comparing calendar days only
pub fn is_due_soon(due: NaiveDate, today: NaiveDate) -> bool {
    let horizon = today
        .checked_add_days(Days::new(DUE_SOON_DAYS))
        .unwrap_or(NaiveDate::MAX);
    today <= due && due <= horizon
}

/// Cards passing `filter`, in board order
pub fn filter_cards(store: &BoardStore, filter: QuickFilter, today: NaiveDate) -> Vec<&Card> {
    store
        .columns()
        .iter()
        .flat_map(|column| {
            let stage = column.stage();
            store
                .cards_for_column(&column.id)
                .filter(move |card| filter.matches(card, stage, today))
        })
        .collect()
}

/// Cards due on a calendar day, in board order
pub fn cards_due_on(store: &BoardStore, day: NaiveDate) -> Vec<&Card> {
    store
        .columns()
        .iter()
        .flat_map(|column| store.cards_for_column(&column.id))
        .filter(|card| card.due_day() == Some(day))
        .collect()
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoardStats {
    pub total: usize,
    pub high_priority: usize,
    pub with_due_date: usize,
    /// Due before `now` and not in a "Done" column
    pub overdue: usize,
}

impl BoardStats {
    pub fn compute(store: &BoardStore, now: DateTime<Utc>) -> Self {
        let mut stats = Self::default();
        for card in store.cards() {
            stats.total += 1;
            if card.priority == Priority::High {
                stats.high_priority += 1;
            }
            if let Some(due) = card.due_date {
                stats.with_due_date += 1;
                let done = store
                    .column(&card.column_id)
                    .is_some_and(|c| c.stage() == Some(Stage::Done));
                if due < now && !done {
                    stats.overdue += 1;
                }
            }
        }
        stats
    }
}
