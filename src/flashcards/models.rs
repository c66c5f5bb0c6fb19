//! Data models for the flashcard system

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Starting ease factor for a new card
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Opaque card identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generate a fresh id.
    ///
    /// UUID v7 carries a millisecond timestamp followed by random bits, so
    /// cards created within the same millisecond still get distinct ids.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A flashcard with question (front) and answer (back) plus its
/// spaced repetition state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub front: String,
    pub back: String,
    /// Current interval in days
    #[serde(default)]
    pub interval: u32,
    /// Consecutive successful reviews since the last lapse
    #[serde(default)]
    pub repetition: u32,
    /// SM-2 ease factor (default 2.5)
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// When the card is due, in milliseconds since the Unix epoch
    pub next_review_date: i64,
    /// Where the card came from, e.g. "Grammar: Word Order"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

impl Flashcard {
    /// Create a card that is due immediately
    pub fn new(front: String, back: String, source: Option<String>) -> Self {
        Self::new_at(front, back, source, Utc::now().timestamp_millis())
    }

    /// Create a card due at `now_millis`
    pub fn new_at(front: String, back: String, source: Option<String>, now_millis: i64) -> Self {
        Self {
            id: CardId::generate(),
            front,
            back,
            interval: 0,
            repetition: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_date: now_millis,
            source,
        }
    }

    /// Check if the card is due at the given time
    pub fn is_due_at(&self, now_millis: i64) -> bool {
        self.next_review_date <= now_millis
    }

    /// Check if the card is due for review now
    pub fn is_due(&self) -> bool {
        self.is_due_at(Utc::now().timestamp_millis())
    }

    /// A card that has never been reviewed
    pub fn is_new(&self) -> bool {
        self.repetition == 0 && self.interval == 0
    }

    /// Due date as a calendar timestamp, if representable
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.next_review_date)
    }
}

/// The four rating buttons shown after revealing an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewRating {
    Again,
    Hard,
    Good,
    Easy,
}

impl ReviewRating {
    pub const ALL: [ReviewRating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// SM-2 quality (0-5) for this rating.
    ///
    /// Quality 0 and 4 are never produced here but remain valid scheduler inputs.
    pub fn quality(self) -> i32 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 5,
        }
    }

    /// Map a 1-4 button index to a rating
    pub fn from_ui_rating(rating: i32) -> Option<Self> {
        match rating {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Again => "Again",
            Self::Hard => "Hard",
            Self::Good => "Good",
            Self::Easy => "Easy",
        }
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown rating {0:?} (expected again, hard, good, easy or 1-4)")]
pub struct ParseRatingError(String);

impl FromStr for ReviewRating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i32>() {
            return Self::from_ui_rating(n).ok_or_else(|| ParseRatingError(s.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "again" | "a" => Ok(Self::Again),
            "hard" | "h" => Ok(Self::Hard),
            "good" | "g" => Ok(Self::Good),
            "easy" | "e" => Ok(Self::Easy),
            _ => Err(ParseRatingError(s.to_string())),
        }
    }
}

/// Statistics for a deck
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    /// Never reviewed
    pub new_cards: usize,
    /// Reviewed, but fewer than two consecutive successes
    pub learning_cards: usize,
    /// Two or more consecutive successes
    pub review_cards: usize,
    pub due_cards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_ease: Option<f64>,
}
