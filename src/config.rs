//! User configuration
//!
//! Read from `config.toml` in the user config directory
//! (e.g. ~/.config/vocab-srs/config.toml). Every field is optional:
//!
//! ```toml
//! data_dir = "/home/me/vocab"
//! deck_key = "zn_flashcards_deck"
//! session_limit = 50
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::DECK_KEY;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the key-value blobs live (default: platform data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Key the deck is stored under
    pub deck_key: String,
    /// Maximum cards per interactive review session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            deck_key: DECK_KEY.to_string(),
            session_limit: None,
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vocab-srs").join("config.toml"))
    }

    /// Load config from a file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}
