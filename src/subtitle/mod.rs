//! Transcript-to-subtitle core: segmentation, sentence splitting, SRT output.

pub mod segment;
pub mod segmenter;
pub mod splitter;
pub mod srt;

pub use segment::Segment;
pub use segmenter::split_into_lines;
pub use splitter::split_at_sentences;
