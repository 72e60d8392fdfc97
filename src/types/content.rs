//! Title and thumbnail analysis types.

use serde::{Deserialize, Serialize};

/// Parameters of a content analysis call; cached under `"content"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_description: Option<String>,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roast_mode: Option<bool>,
}

impl ContentAnalysisRequest {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            title: None,
            description: None,
            thumbnail_url: None,
            thumbnail_description: None,
            platform: platform.into(),
            roast_mode: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_thumbnail_description(mut self, description: impl Into<String>) -> Self {
        self.thumbnail_description = Some(description.into());
        self
    }

    pub fn with_roast_mode(mut self, roast: bool) -> Self {
        self.roast_mode = Some(roast);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFeedback {
    pub thumbnail: String,
    pub title: String,
    pub overall: String,
}

/// Scores are on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisResult {
    pub clickability_score: f64,
    pub clarity_score: f64,
    pub intrigue_score: f64,
    pub emotion_score: f64,
    pub feedback: ContentFeedback,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
