//! Learner progress data models

use serde::{Deserialize, Serialize};

/// Self-reported reading confidence for a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingStat {
    /// Confidence on the 1-10 slider
    pub confidence: u32,
    /// When it was recorded, in milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Overview of completed work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub completed_chapters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_confidence: Option<f64>,
}
