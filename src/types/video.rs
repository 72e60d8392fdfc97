//! Video clip suggestion types.

use serde::{Deserialize, Serialize};

/// Parameters of a clip suggestion call; cached under `"videoProcessing"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoClipRequest {
    pub video_description: String,
    /// Seconds.
    pub video_duration: f64,
    pub target_platform: String,
}

/// A clip cut from the source video. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoClipSuggestion {
    pub title: String,
    pub description: String,
    pub start_time: f64,
    pub end_time: f64,
    pub viral_score: f64,
    pub reasoning: String,
}
