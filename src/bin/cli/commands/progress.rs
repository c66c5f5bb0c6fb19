use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run_complete(
    app: &App,
    chapter_id: &str,
    confidence: Option<u32>,
    format: &OutputFormat,
) -> Result<()> {
    let newly_completed = app
        .progress()
        .complete_lesson(chapter_id, confidence)
        .context("Failed to save progress")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "chapterId": chapter_id,
                "newlyCompleted": newly_completed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if newly_completed {
                println!("Lesson completed!");
            } else {
                println!("Lesson updated!");
            }
        }
    }

    Ok(())
}

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    let progress = app.progress();
    let summary = progress.summary().context("Failed to load progress")?;
    let stats = progress.reading_stats().context("Failed to load reading stats")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "summary": summary,
                "readingStats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if summary.completed_chapters.is_empty() {
                println!("No completed chapters.");
                return Ok(());
            }

            for chapter_id in &summary.completed_chapters {
                match stats.get(chapter_id) {
                    Some(stat) => println!("  {} (confidence {}/10)", chapter_id, stat.confidence),
                    None => println!("  {}", chapter_id),
                }
            }
            if let Some(avg) = summary.average_confidence {
                println!("\nAverage reading confidence: {:.1}/10", avg);
            }
        }
    }

    Ok(())
}

pub fn run_clear(app: &App) -> Result<()> {
    app.progress()
        .clear_progress()
        .context("Failed to clear progress")?;
    println!("Progress cleared.");
    Ok(())
}
