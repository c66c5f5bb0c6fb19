use chrono::Local;

use vocab_srs::flashcards::algorithm::format_interval;
use vocab_srs::flashcards::{Flashcard, MS_PER_DAY};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// "due now" or "in 3d" relative to `now_millis`
pub fn due_label(card: &Flashcard, now_millis: i64, use_color: bool) -> String {
    if card.is_due_at(now_millis) {
        return paint("due now", Color::RED, use_color);
    }
    let remaining = card.next_review_date - now_millis;
    // Round up so a card due in 20 hours shows as 1d
    let days = ((remaining + MS_PER_DAY - 1) / MS_PER_DAY).clamp(0, i64::from(u32::MAX)) as u32;
    paint(&format!("in {}", format_interval(days)), Color::GREEN, use_color)
}

/// Local calendar date of the next review
pub fn due_date(card: &Flashcard) -> String {
    card.due_date()
        .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
