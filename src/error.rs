//! Error types for subgen.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubgenError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    // Audio errors
    #[error("Audio format mismatch: expected {expected}, got {actual}")]
    AudioFormatMismatch { expected: String, actual: String },

    #[error("Failed to read audio: {message}")]
    AudioRead { message: String },

    // Recognition engine errors
    #[error("Recognition model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Recognition engine error: {message}")]
    Engine { message: String },

    // Pipeline errors
    #[error("No speech was detected in the audio track")]
    NoSpeechDetected,

    #[error("No subtitle segments were produced from the transcription")]
    EmptySegmentSet,

    #[error("Failed to write subtitle file {path}: {source}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // External media tool errors
    #[error("External tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// All burn-in strategies exhausted. The orchestrator downgrades this to
    /// a warning; it never surfaces as a run failure.
    #[error("Failed to burn subtitles after {attempts} attempts")]
    BurnInFailed { attempts: usize },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SubgenError>;
