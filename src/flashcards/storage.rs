//! Deck persistence
//!
//! The whole deck lives in one JSON array under a single key of a
//! [`KeyValueStore`]. Every write replaces the full array, so concurrent
//! writers resolve as last-writer-wins.

use std::sync::Arc;

use thiserror::Error;

use super::algorithm::{review_stats, schedule_next_review_at, select_due_cards};
use super::clock::{Clock, SystemClock};
use super::models::*;
use crate::storage::{KeyValueStore, StorageError};

/// Key the deck blob is stored under
pub const DECK_KEY: &str = "zn_flashcards_deck";

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    CardNotFound(CardId),
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Result of adding a card to the deck
#[derive(Debug, Clone, PartialEq)]
pub enum AddCardOutcome {
    Added(Flashcard),
    /// A card with the same front already exists
    Duplicate(Flashcard),
}

/// Storage manager for the flashcard deck
pub struct DeckStorage<S> {
    store: S,
    deck_key: String,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> DeckStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            deck_key: DECK_KEY.to_string(),
            clock,
        }
    }

    /// Store the deck under a different key
    pub fn with_deck_key(mut self, deck_key: impl Into<String>) -> Self {
        self.deck_key = deck_key.into();
        self
    }

    pub fn deck_key(&self) -> &str {
        &self.deck_key
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    // ==================== Deck Operations ====================

    /// Load every card in the deck
    ///
    /// An unreadable blob is logged and treated as an empty deck.
    pub fn load_deck(&self) -> Result<Vec<Flashcard>> {
        let Some(bytes) = self.store.get(&self.deck_key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&bytes) {
            Ok(deck) => Ok(deck),
            Err(e) => {
                log::warn!("Failed to parse deck {:?}, starting empty: {}", self.deck_key, e);
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored deck
    pub fn save_deck(&self, deck: &[Flashcard]) -> Result<()> {
        let bytes = serde_json::to_vec(deck)?;
        self.store.set(&self.deck_key, &bytes)?;
        Ok(())
    }

    // ==================== Card Operations ====================

    /// Get a specific card
    pub fn get_card(&self, card_id: &CardId) -> Result<Flashcard> {
        self.load_deck()?
            .into_iter()
            .find(|c| &c.id == card_id)
            .ok_or_else(|| FlashcardStorageError::CardNotFound(card_id.clone()))
    }

    /// Create a new card unless one with the same front already exists
    pub fn add_card(
        &self,
        front: String,
        back: String,
        source: Option<String>,
    ) -> Result<AddCardOutcome> {
        let mut deck = self.load_deck()?;

        if let Some(existing) = deck.iter().find(|c| c.front == front) {
            log::info!("{:?} is already in the deck", front);
            return Ok(AddCardOutcome::Duplicate(existing.clone()));
        }

        let card = Flashcard::new_at(front, back, source, self.clock.now_millis());
        deck.push(card.clone());
        self.save_deck(&deck)?;

        log::info!("Added card {} ({:?})", card.id, card.front);
        Ok(AddCardOutcome::Added(card))
    }

    // ==================== Review Operations ====================

    /// Get all cards due now, in deck order
    pub fn due_cards(&self) -> Result<Vec<Flashcard>> {
        let deck = self.load_deck()?;
        let now = self.clock.now_millis();
        Ok(select_due_cards(&deck, now).into_iter().cloned().collect())
    }

    /// Submit a review for a card and persist its new state
    pub fn submit_review(&self, card_id: &CardId, quality: i32) -> Result<Flashcard> {
        let mut deck = self.load_deck()?;
        let pos = deck
            .iter()
            .position(|c| &c.id == card_id)
            .ok_or_else(|| FlashcardStorageError::CardNotFound(card_id.clone()))?;

        let updated = schedule_next_review_at(&deck[pos], quality, self.clock.now_millis());
        log::debug!(
            "Reviewed {} with quality {}: interval {}d, repetition {}, ease {:.2}",
            card_id,
            quality,
            updated.interval,
            updated.repetition,
            updated.ease_factor
        );

        deck[pos] = updated.clone();
        self.save_deck(&deck)?;

        Ok(updated)
    }

    /// Submit a review using one of the four rating buttons
    pub fn submit_rating(&self, card_id: &CardId, rating: ReviewRating) -> Result<Flashcard> {
        self.submit_review(card_id, rating.quality())
    }

    /// Get review statistics for the deck
    pub fn stats(&self) -> Result<ReviewStats> {
        let deck = self.load_deck()?;
        Ok(review_stats(&deck, self.clock.now_millis()))
    }
}
