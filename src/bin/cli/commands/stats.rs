use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.deck().stats().context("Failed to load deck")?;
    let progress = app.progress().summary().context("Failed to load progress")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": stats,
                "progress": progress,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint("Deck", Color::BOLD, use_color));
            println!("  Total:     {}", stats.total_cards);
            println!("  Due now:   {}", paint(&stats.due_cards.to_string(), Color::RED, use_color));
            println!("  New:       {}", stats.new_cards);
            println!("  Learning:  {}", stats.learning_cards);
            println!("  Review:    {}", stats.review_cards);
            if let Some(ease) = stats.average_ease {
                println!("  Avg ease:  {:.2}", ease);
            }

            println!();
            println!("{}", paint("Progress", Color::BOLD, use_color));
            println!("  Completed chapters: {}", progress.completed_chapters.len());
            if let Some(confidence) = progress.average_confidence {
                println!("  Reading confidence: {:.1}/10", confidence);
            }
        }
    }

    Ok(())
}
