//! Speech-to-text: recognizer boundary, whisper backend, chunked adapter.

pub mod adapter;
pub mod recognizer;
pub mod whisper;

pub use adapter::transcribe_wav;
pub use recognizer::{MockRecognizer, RecognitionBatch, Recognizer, Word};
pub use whisper::{WhisperConfig, WhisperRecognizer};
