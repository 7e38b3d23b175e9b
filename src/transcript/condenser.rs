use super::segment::TranscriptSegment;
use crate::error::{RelayError, RelayResult};

/// Length (in characters) at which condensation stops
pub const DEFAULT_TRANSCRIPT_CAP: usize = 1000;

/// Joins transcript segments into a single bounded string.
///
/// Each segment's text is followed by one space. The cap is checked only
/// after a segment is appended, so the segment that reaches it is kept
/// whole and everything after it is dropped.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptCondenser {
    cap: usize,
}

impl TranscriptCondenser {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn condense(&self, segments: &[TranscriptSegment]) -> RelayResult<String> {
        let mut condensed = String::new();
        let mut length = 0;

        for (index, segment) in segments.iter().enumerate() {
            let text = segment
                .text
                .as_deref()
                .ok_or(RelayError::InvalidSegment { index })?;

            condensed.push_str(text);
            condensed.push(' ');
            length += text.chars().count() + 1;

            if length >= self.cap {
                break;
            }
        }

        Ok(condensed)
    }
}

impl Default for TranscriptCondenser {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSCRIPT_CAP)
    }
}
