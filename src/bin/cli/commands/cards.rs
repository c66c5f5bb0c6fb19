use anyhow::{Context, Result};

use vocab_srs::flashcards::Flashcard;

use crate::app::App;
use crate::render::terminal::{due_date, due_label, paint, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.deck();
    let cards = deck.load_deck().context("Failed to load deck")?;
    print_cards(&cards, deck.now_millis(), "No cards yet.", format, use_color)
}

pub fn run_due(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.deck();
    let cards = deck.due_cards().context("Failed to load deck")?;
    print_cards(&cards, deck.now_millis(), "All caught up!", format, use_color)
}

fn print_cards(
    cards: &[Flashcard],
    now_millis: i64,
    empty_message: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("{}", empty_message);
                return Ok(());
            }

            let front_width = column_width(cards.iter().map(|c| c.front.as_str()), 5);
            let back_width = column_width(cards.iter().map(|c| c.back.as_str()), 6);

            println!(
                "{:<fw$} {:<bw$} {:<16} {}",
                "Front",
                "Back",
                "Due",
                "Next",
                fw = front_width,
                bw = back_width
            );
            println!("{}", "-".repeat(front_width + back_width + 28));

            for card in cards {
                let source = card
                    .source
                    .as_deref()
                    .map(|s| format!("  {}", paint(s, Color::GRAY, use_color)))
                    .unwrap_or_default();
                println!(
                    "{:<fw$} {:<bw$} {:<16} {}{}",
                    truncate(&card.front, front_width),
                    truncate(&card.back, back_width),
                    due_date(card),
                    due_label(card, now_millis, use_color),
                    source,
                    fw = front_width,
                    bw = back_width
                );
            }

            println!("\n{} card(s)", cards.len());
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Widest value in chars, kept between `min` and 30
fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(min).clamp(min, 30)
}
