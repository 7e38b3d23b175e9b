use crate::error::RelayResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single timed chunk of caption text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text; sources may omit it
    #[serde(default)]
    pub text: Option<String>,

    /// Offset into the video, in seconds
    pub timestamp: f64,

    /// How long the caption is shown, in seconds
    #[serde(default)]
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, timestamp: f64, duration: f64) -> Self {
        Self {
            text: Some(text.into()),
            timestamp,
            duration,
        }
    }
}

/// Source of transcripts for a video reference (URL or id)
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, video: &str) -> RelayResult<Vec<TranscriptSegment>>;
}
