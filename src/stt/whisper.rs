//! Whisper-based recognizer implementation using whisper-rs.
//!
//! Whisper decodes whole utterances rather than streaming, so this
//! implementation buffers fed chunks and runs inference at finalization,
//! emitting one batch per decoded segment with word-level timestamps
//! recovered from token timing data.
//!
//! # Feature Gate
//!
//! Requires the `whisper` feature (and cmake to build whisper-rs). Without
//! it a stub type with the same surface is compiled that fails on use.

use crate::defaults;
use crate::error::{Result, SubgenError};
use crate::stt::recognizer::{RecognitionBatch, Recognizer, Word};
use std::path::PathBuf;

#[cfg(feature = "whisper")]
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

/// Configuration for the whisper recognizer.
#[derive(Debug, Clone)]
pub struct WhisperConfig {
    /// Path to the ggml model file
    pub model_path: PathBuf,
    /// Language code (e.g., "en", "es"), or "auto" for detection
    pub language: String,
    /// Number of threads for inference (None = library default)
    pub threads: Option<usize>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/ggml-base.en.bin"),
            language: defaults::DEFAULT_LANGUAGE.to_string(),
            threads: None,
        }
    }
}

/// Whisper-backed recognizer.
#[cfg(feature = "whisper")]
pub struct WhisperRecognizer {
    context: WhisperContext,
    config: WhisperConfig,
    model_name: String,
    buffer: Vec<i16>,
}

#[cfg(feature = "whisper")]
impl std::fmt::Debug for WhisperRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperRecognizer")
            .field("config", &self.config)
            .field("model_name", &self.model_name)
            .field("buffered_samples", &self.buffer.len())
            .finish()
    }
}

/// Whisper recognizer placeholder (without the `whisper` feature).
#[cfg(not(feature = "whisper"))]
#[derive(Debug)]
pub struct WhisperRecognizer {
    config: WhisperConfig,
    model_name: String,
}

fn model_name_from_path(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(feature = "whisper")]
impl WhisperRecognizer {
    /// Load the model at `config.model_path`.
    ///
    /// # Errors
    /// `ModelNotFound` if the file does not exist, `Engine` if loading fails.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(SubgenError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }

        let model_name = model_name_from_path(&config.model_path);

        let context = WhisperContext::new_with_params(
            config.model_path.to_str().ok_or_else(|| SubgenError::Engine {
                message: "Invalid UTF-8 in model path".to_string(),
            })?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| SubgenError::Engine {
            message: format!("Failed to load whisper model: {}", e),
        })?;

        Ok(Self {
            context,
            config,
            model_name,
            buffer: Vec::new(),
        })
    }

    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    /// Convert i16 PCM to the f32 [-1.0, 1.0] range whisper expects.
    fn convert_audio(samples: &[i16]) -> Vec<f32> {
        samples
            .iter()
            .map(|&sample| sample as f32 / 32768.0)
            .collect()
    }

    fn run_inference(&mut self) -> Result<Vec<RecognitionBatch>> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }
        let audio = Self::convert_audio(&self.buffer);
        self.buffer.clear();

        let mut state = self.context.create_state().map_err(|e| SubgenError::Engine {
            message: format!("Failed to create whisper state: {}", e),
        })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        if self.config.language == defaults::DEFAULT_LANGUAGE {
            params.set_language(None);
        } else {
            params.set_language(Some(&self.config.language));
        }
        if let Some(threads) = self.config.threads {
            params.set_n_threads(threads as i32);
        }
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        // Needed for per-token t0/t1, which word timestamps are derived from
        params.set_token_timestamps(true);

        state.full(params, &audio).map_err(|e| SubgenError::Engine {
            message: format!("Whisper inference failed: {}", e),
        })?;

        let mut batches = Vec::new();
        let segment_count = state.full_n_segments().map_err(|e| SubgenError::Engine {
            message: format!("Failed to read segment count: {}", e),
        })?;

        for s in 0..segment_count {
            let words = self.extract_words(&state, s)?;
            if words.is_empty() {
                continue;
            }
            batches.push(RecognitionBatch::from_words(words));
        }

        Ok(batches)
    }

    /// Rebuild words from token pieces. A piece with a leading space starts a
    /// new word; special markers like `[_BEG_]` carry no text and are skipped.
    /// Token t0/t1 are in 10ms units.
    fn extract_words(
        &self,
        state: &whisper_rs::WhisperState,
        segment: std::os::raw::c_int,
    ) -> Result<Vec<Word>> {
        let engine = |e: whisper_rs::WhisperError| SubgenError::Engine {
            message: format!("Failed to read token data: {}", e),
        };

        let token_count = state.full_n_tokens(segment).map_err(engine)?;
        let mut words = Vec::new();
        let mut current = String::new();
        let mut start = 0.0f64;
        let mut end = 0.0f64;

        for t in 0..token_count {
            let data = state.full_get_token_data(segment, t).map_err(engine)?;
            let piece = self.context.token_to_str(data.id).map_err(engine)?;
            if piece.starts_with("[_") || piece.starts_with("<|") {
                continue;
            }

            if piece.starts_with(' ') && !current.trim().is_empty() {
                words.push(Word::new(current.trim(), start, end));
                current.clear();
            }
            if current.is_empty() {
                start = data.t0 as f64 * 0.01;
            }
            current.push_str(piece);
            end = data.t1 as f64 * 0.01;
        }

        if !current.trim().is_empty() {
            words.push(Word::new(current.trim(), start, end));
        }

        Ok(words)
    }
}

#[cfg(not(feature = "whisper"))]
impl WhisperRecognizer {
    /// Create the stub recognizer. Construction succeeds when the model file
    /// exists so setup problems surface the same way in both builds; use
    /// fails with an `Engine` error.
    pub fn new(config: WhisperConfig) -> Result<Self> {
        if !config.model_path.exists() {
            return Err(SubgenError::ModelNotFound {
                path: config.model_path.to_string_lossy().to_string(),
            });
        }
        let model_name = model_name_from_path(&config.model_path);
        Ok(Self { config, model_name })
    }

    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    fn feature_missing() -> SubgenError {
        SubgenError::Engine {
            message: "subgen was built without whisper support; \
                      rebuild with `--features whisper`"
                .to_string(),
        }
    }
}

#[cfg(feature = "whisper")]
impl Recognizer for WhisperRecognizer {
    fn accept_waveform(&mut self, samples: &[i16]) -> Result<Vec<RecognitionBatch>> {
        self.buffer.extend_from_slice(samples);
        Ok(Vec::new())
    }

    fn finalize(&mut self) -> Result<Vec<RecognitionBatch>> {
        self.run_inference()
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(not(feature = "whisper"))]
impl Recognizer for WhisperRecognizer {
    fn accept_waveform(&mut self, _samples: &[i16]) -> Result<Vec<RecognitionBatch>> {
        Err(Self::feature_missing())
    }

    fn finalize(&mut self) -> Result<Vec<RecognitionBatch>> {
        Err(Self::feature_missing())
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
