mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use vocab_srs::flashcards::{CardId, ReviewRating};

#[derive(Parser)]
#[command(name = "vocab-srs", about = "Vocabulary flashcards with spaced repetition", version)]
struct Cli {
    /// Config file (default: ~/.config/vocab-srs/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a card to the deck
    Add {
        /// Prompt side, e.g. "de vergadering"
        front: String,
        /// Answer side, e.g. "the meeting"
        back: String,
        /// Where the word came from
        #[arg(long)]
        source: Option<String>,
    },

    /// List every card with its due date
    List,

    /// List cards that are due now
    Due,

    /// Review due cards interactively
    Review {
        /// Maximum cards this session (overrides the config file)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Record a single review without the interactive session
    Rate {
        /// Card id
        card_id: String,
        /// again, hard, good, easy or 1-4
        #[arg(required_unless_present = "quality", conflicts_with = "quality")]
        rating: Option<ReviewRating>,
        /// Raw SM-2 quality (0-5) instead of a rating button
        #[arg(long, allow_negative_numbers = true)]
        quality: Option<i32>,
    },

    /// Show deck and progress statistics
    Stats,

    /// Lesson progress tracking
    #[command(subcommand)]
    Progress(ProgressCommand),
}

#[derive(Subcommand)]
enum ProgressCommand {
    /// Mark a chapter's lesson as completed
    Complete {
        /// Chapter id, e.g. p1-grammar-1
        chapter_id: String,
        /// Reading confidence (1-10)
        #[arg(long)]
        confidence: Option<u32>,
    },

    /// Show completed chapters
    Show,

    /// Forget completed chapters and reading statistics
    Clear,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Add { front, back, source } => {
            commands::add::run(&app, front, back, source, &cli.format, use_color)?;
        }
        Command::List => {
            commands::cards::run_list(&app, &cli.format, use_color)?;
        }
        Command::Due => {
            commands::cards::run_due(&app, &cli.format, use_color)?;
        }
        Command::Review { limit } => {
            let limit = limit.or(app.config.session_limit);
            commands::review::run(&app, limit, use_color)?;
        }
        Command::Rate { card_id, rating, quality } => {
            let quality = match (rating, quality) {
                (_, Some(q)) => q,
                (Some(r), None) => r.quality(),
                (None, None) => anyhow::bail!("Either a rating or --quality is required"),
            };
            commands::rate::run(&app, &CardId::from(card_id), quality, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Progress(subcmd) => match subcmd {
            ProgressCommand::Complete { chapter_id, confidence } => {
                commands::progress::run_complete(&app, &chapter_id, confidence, &cli.format)?;
            }
            ProgressCommand::Show => {
                commands::progress::run_show(&app, &cli.format)?;
            }
            ProgressCommand::Clear => {
                commands::progress::run_clear(&app)?;
            }
        },
    }

    Ok(())
}
