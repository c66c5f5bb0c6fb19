use anyhow::{Context, Result};

use vocab_srs::flashcards::AddCardOutcome;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    front: String,
    back: String,
    source: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let outcome = app
        .deck()
        .add_card(front, back, source)
        .context("Failed to add card")?;

    let (card, added) = match outcome {
        AddCardOutcome::Added(card) => (card, true),
        AddCardOutcome::Duplicate(card) => (card, false),
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "added": added,
                "card": card,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if added {
                println!("Added \"{}\" to flashcards", card.front);
            } else {
                println!("\"{}\" is already in your deck", card.front);
            }
            println!("  ID: {}", paint(card.id.as_str(), Color::BLUE, use_color));
        }
    }

    Ok(())
}
