use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use vocab_srs::config::Config;
use vocab_srs::flashcards::DeckStorage;
use vocab_srs::progress::ProgressStorage;
use vocab_srs::storage::FileStore;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub store: FileStore,
}

impl App {
    /// Initialize from the config file and data directory
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => match Config::default_path() {
                Some(path) => Config::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => Config::default(),
            },
        };

        let data_dir = match data_dir.or_else(|| config.data_dir.clone()) {
            Some(dir) => dir,
            None => FileStore::default_data_dir().context("Failed to get data directory")?,
        };
        log::debug!("Using data directory {:?}", data_dir);

        let store = FileStore::new(data_dir);
        store.init().context("Failed to initialize data directory")?;

        Ok(Self { config, store })
    }

    pub fn deck(&self) -> DeckStorage<&FileStore> {
        DeckStorage::new(&self.store).with_deck_key(self.config.deck_key.clone())
    }

    pub fn progress(&self) -> ProgressStorage<&FileStore> {
        ProgressStorage::new(&self.store)
    }
}
