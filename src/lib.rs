//! Spaced repetition scheduling for vocabulary flashcards.
//!
//! The core is [`flashcards::algorithm`], a pure SM-2 state transition over
//! [`flashcards::Flashcard`] values. Around it sit deck and progress
//! persistence over an injected [`storage::KeyValueStore`].

pub mod config;
pub mod flashcards;
pub mod progress;
pub mod storage;
