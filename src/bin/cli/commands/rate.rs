use anyhow::{Context, Result};

use vocab_srs::flashcards::algorithm::format_interval;
use vocab_srs::flashcards::CardId;

use crate::app::App;
use crate::render::terminal::{due_date, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    card_id: &CardId,
    quality: i32,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let card = app
        .deck()
        .submit_review(card_id, quality)
        .with_context(|| format!("Failed to review card {}", card_id))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card)?);
        }
        OutputFormat::Plain => {
            println!("Reviewed \"{}\" (quality {})", card.front, quality);
            println!(
                "  Next review: {} ({})",
                paint(&due_date(&card), Color::BOLD, use_color),
                format_interval(card.interval)
            );
            println!("  Repetition: {}  Ease: {:.2}", card.repetition, card.ease_factor);
        }
    }

    Ok(())
}
