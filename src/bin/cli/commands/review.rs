use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use vocab_srs::flashcards::algorithm::{format_interval, preview_intervals};
use vocab_srs::flashcards::{DeckStorage, ReviewRating};
use vocab_srs::storage::KeyValueStore;

use crate::app::App;
use crate::render::terminal::{paint, Color};

pub fn run(app: &App, limit: Option<usize>, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reviewed = run_session(
        &app.deck(),
        limit,
        &mut stdin.lock(),
        &mut stdout.lock(),
        use_color,
    )?;
    log::info!("Review session finished after {} card(s)", reviewed);
    Ok(())
}

/// Walk through due cards until the deck is done, the limit is hit or the
/// user quits. Returns the number of cards rated.
pub fn run_session<S, R, W>(
    deck: &DeckStorage<S>,
    limit: Option<usize>,
    input: &mut R,
    out: &mut W,
    use_color: bool,
) -> Result<usize>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    let mut due = deck.due_cards().context("Failed to load deck")?;
    if let Some(limit) = limit {
        due.truncate(limit);
    }

    let total = due.len();
    let mut reviewed = 0;

    for (index, card) in due.iter().enumerate() {
        let position = format!("Card {} of {}", index + 1, total);
        writeln!(out, "\n{}", paint(&position, Color::DIM, use_color))?;
        writeln!(out, "  {}", paint(&card.front, Color::BOLD, use_color))?;
        write!(out, "Press Enter to show the answer (q to quit) ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else { break };
        if is_quit(&line) {
            break;
        }

        writeln!(out, "  {}", paint(&card.back, Color::BOLD, use_color))?;
        if let Some(source) = &card.source {
            let source = format!("Source: {}", source);
            writeln!(out, "  {}", paint(&source, Color::GRAY, use_color))?;
        }

        let previews = preview_intervals(card);
        let options: Vec<String> = ReviewRating::ALL
            .iter()
            .zip(previews)
            .enumerate()
            .map(|(i, (rating, days))| {
                let label = paint(rating.label(), Color::YELLOW, use_color);
                format!("{} {} ({})", i + 1, label, format_interval(days))
            })
            .collect();

        let rating = loop {
            write!(out, "{}: ", options.join("  "))?;
            out.flush()?;

            let Some(line) = read_line(input)? else { return Ok(reviewed) };
            if is_quit(&line) {
                return Ok(reviewed);
            }
            match line.parse::<ReviewRating>() {
                Ok(rating) => break rating,
                Err(e) => writeln!(out, "{}", e)?,
            }
        };

        deck.submit_rating(&card.id, rating)
            .with_context(|| format!("Failed to review card {}", card.id))?;
        reviewed += 1;
    }

    // Cards past the session limit are still due
    let remaining = deck.due_cards().context("Failed to load deck")?;
    if remaining.is_empty() {
        writeln!(out, "\nAll caught up! You have reviewed all your vocabulary for now.")?;
    }

    Ok(reviewed)
}

/// Read one trimmed line, `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit")
}
