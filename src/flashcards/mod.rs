//! Flashcard and spaced repetition system
//!
//! This module provides:
//! - Flashcard data model and rating buttons
//! - SM-2 spaced repetition algorithm
//! - Due-card selection and review statistics
//! - Deck persistence over a key-value store

pub mod algorithm;
pub mod clock;
pub mod models;
pub mod storage;

pub use algorithm::{schedule_next_review, schedule_next_review_at, select_due_cards};
pub use clock::{Clock, FixedClock, SystemClock, MS_PER_DAY};
pub use models::*;
pub use storage::{AddCardOutcome, DeckStorage, FlashcardStorageError, DECK_KEY};
