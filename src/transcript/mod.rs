//! Transcript retrieval and condensation
//!
//! - `TranscriptFetcher` - source of timed caption segments for a video
//! - `YouTubeTranscriptFetcher` - scrapes caption tracks from YouTube
//! - `TranscriptCondenser` - joins segments into one bounded string

mod condenser;
mod segment;
mod youtube;

pub use condenser::{TranscriptCondenser, DEFAULT_TRANSCRIPT_CAP};
pub use segment::{TranscriptFetcher, TranscriptSegment};
pub use youtube::{extract_video_id, YouTubeTranscriptFetcher};
