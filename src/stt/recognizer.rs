//! Recognition engine boundary.
//!
//! The engine is consumed as a capability: fed 16kHz mono PCM audio in
//! chunks, it emits batches of words with start/end timestamps whenever it
//! decides a boundary has been reached (typically at a detected pause), plus
//! one trailing batch at finalization for any buffered partial result.
//!
//! The trait allows swapping implementations (real Whisper vs mock).

use crate::error::{Result, SubgenError};
use serde::{Deserialize, Serialize};

/// One recognized token with its time span in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// One unit of engine output: the words of a decoded utterance in speech
/// order, plus the utterance's aggregate text.
///
/// Batches arrive in chronological order but are not assumed contiguous;
/// silence gaps between them are normal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecognitionBatch {
    pub text: String,
    pub words: Vec<Word>,
}

impl RecognitionBatch {
    /// Build a batch from words, deriving the aggregate text.
    pub fn from_words(words: Vec<Word>) -> Self {
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, words }
    }

    /// True if the batch carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for speech recognition engines.
pub trait Recognizer: Send {
    /// Feed one chunk of 16kHz mono 16-bit PCM samples.
    ///
    /// Returns any batches the engine completed while consuming this chunk.
    /// Engines that only decode at finalization return an empty vec here.
    fn accept_waveform(&mut self, samples: &[i16]) -> Result<Vec<RecognitionBatch>>;

    /// Flush the engine after the last chunk.
    ///
    /// Returns the trailing batches for any buffered partial result. Calling
    /// `accept_waveform` after `finalize` is a contract violation.
    fn finalize(&mut self) -> Result<Vec<RecognitionBatch>>;

    /// Name of the loaded model.
    fn model_name(&self) -> &str;
}

/// Mock recognizer for testing.
///
/// Returns a configured set of batches at finalization and records how many
/// samples it was fed.
#[derive(Debug, Clone, Default)]
pub struct MockRecognizer {
    batches: Vec<RecognitionBatch>,
    model_name: String,
    samples_fed: usize,
    should_fail: bool,
}

impl MockRecognizer {
    pub fn new(model_name: &str) -> Self {
        Self {
            model_name: model_name.to_string(),
            ..Self::default()
        }
    }

    /// Configure the batches returned from `finalize`.
    pub fn with_batches(mut self, batches: Vec<RecognitionBatch>) -> Self {
        self.batches = batches;
        self
    }

    /// Configure the mock to fail on every call.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Total number of samples accepted so far.
    pub fn samples_fed(&self) -> usize {
        self.samples_fed
    }
}

impl Recognizer for MockRecognizer {
    fn accept_waveform(&mut self, samples: &[i16]) -> Result<Vec<RecognitionBatch>> {
        if self.should_fail {
            return Err(SubgenError::Engine {
                message: "mock recognizer failure".to_string(),
            });
        }
        self.samples_fed += samples.len();
        Ok(Vec::new())
    }

    fn finalize(&mut self) -> Result<Vec<RecognitionBatch>> {
        if self.should_fail {
            return Err(SubgenError::Engine {
                message: "mock recognizer failure".to_string(),
            });
        }
        Ok(std::mem::take(&mut self.batches))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
