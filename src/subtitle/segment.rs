//! Displayable subtitle unit.

use serde::{Deserialize, Serialize};

/// A single displayable subtitle line with its time span.
///
/// Invariants maintained by the producers (segmenter, splitter):
/// `text` is trimmed and non-empty, and `start <= end`. The serializer
/// re-checks the text invariant at the boundary rather than trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Start time in seconds from the beginning of the audio.
    pub start: f64,
    /// End time in seconds from the beginning of the audio.
    pub end: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
