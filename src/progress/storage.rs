//! Progress storage implementation
//!
//! Keys:
//! - `zn_progress`: JSON array of completed chapter ids
//! - `zn_reading_stats`: map of chapter id to [`ReadingStat`]
//! - `zn_active_lesson_{chapter-id}`: opaque lesson snapshot

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::models::*;
use crate::flashcards::{Clock, SystemClock};
use crate::storage::{KeyValueStore, StorageError};

type Result<T> = std::result::Result<T, StorageError>;

pub const PROGRESS_KEY: &str = "zn_progress";
pub const READING_STATS_KEY: &str = "zn_reading_stats";
pub const ACTIVE_LESSON_KEY_PREFIX: &str = "zn_active_lesson_";

/// Storage for completed chapters, reading statistics and lesson snapshots
pub struct ProgressStorage<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: KeyValueStore> ProgressStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Read a JSON blob, falling back to the default when it is missing or unreadable
    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(T::default());
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Failed to parse {:?}, using empty value: {}", key, e);
                Ok(T::default())
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    // ===== Completed chapters =====

    pub fn completed_chapters(&self) -> Result<Vec<String>> {
        self.read_json(PROGRESS_KEY)
    }

    pub fn save_completed_chapters(&self, chapter_ids: &[String]) -> Result<()> {
        self.write_json(PROGRESS_KEY, chapter_ids)
    }

    /// Mark a lesson complete, optionally recording reading confidence
    ///
    /// Returns `true` if the chapter was not completed before.
    pub fn complete_lesson(
        &self,
        chapter_id: &str,
        reading_confidence: Option<u32>,
    ) -> Result<bool> {
        let mut completed = self.completed_chapters()?;
        let newly_completed = !completed.iter().any(|id| id == chapter_id);

        if newly_completed {
            completed.push(chapter_id.to_string());
            self.save_completed_chapters(&completed)?;
            log::info!("Completed chapter {}", chapter_id);
        }

        if let Some(confidence) = reading_confidence {
            self.save_reading_stat(chapter_id, confidence)?;
        }

        Ok(newly_completed)
    }

    // ===== Reading statistics =====

    pub fn reading_stats(&self) -> Result<BTreeMap<String, ReadingStat>> {
        self.read_json(READING_STATS_KEY)
    }

    /// Record confidence for a chapter, replacing any earlier entry
    pub fn save_reading_stat(&self, chapter_id: &str, confidence: u32) -> Result<()> {
        let mut stats = self.reading_stats()?;
        stats.insert(
            chapter_id.to_string(),
            ReadingStat {
                confidence,
                timestamp: self.clock.now_millis(),
            },
        );
        self.write_json(READING_STATS_KEY, &stats)
    }

    /// Mean confidence over all chapters, `None` if nothing is recorded
    pub fn average_confidence(&self) -> Result<Option<f64>> {
        let stats = self.reading_stats()?;
        if stats.is_empty() {
            return Ok(None);
        }
        let total: f64 = stats.values().map(|s| f64::from(s.confidence)).sum();
        Ok(Some(total / stats.len() as f64))
    }

    pub fn summary(&self) -> Result<ProgressSummary> {
        Ok(ProgressSummary {
            completed_chapters: self.completed_chapters()?,
            average_confidence: self.average_confidence()?,
        })
    }

    /// Forget completed chapters and reading statistics.
    /// Active lesson snapshots are kept.
    pub fn clear_progress(&self) -> Result<()> {
        self.store.remove(PROGRESS_KEY)?;
        self.store.remove(READING_STATS_KEY)?;
        Ok(())
    }

    // ===== Active lessons =====

    fn active_lesson_key(chapter_id: &str) -> String {
        format!("{}{}", ACTIVE_LESSON_KEY_PREFIX, chapter_id)
    }

    pub fn save_active_lesson(&self, chapter_id: &str, lesson: &Value) -> Result<()> {
        self.write_json(&Self::active_lesson_key(chapter_id), lesson)
    }

    /// Load a lesson snapshot; unreadable snapshots read as `None`
    pub fn load_active_lesson(&self, chapter_id: &str) -> Result<Option<Value>> {
        let Some(bytes) = self.store.get(&Self::active_lesson_key(chapter_id))? else {
            return Ok(None);
        };
        Ok(serde_json::from_slice(&bytes).ok())
    }
}
