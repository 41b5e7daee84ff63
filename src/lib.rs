//! subgen - Automatic subtitle generation for video files
//!
//! Turns a video's speech track into time-aligned SRT subtitles and
//! optionally burns them back into the video via ffmpeg.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod error;
pub mod media;
pub mod models;
pub mod pipeline;
pub mod stt;
pub mod subtitle;

// Composition root - needs everything
#[cfg(feature = "cli")]
pub mod app;

// Core traits (source → process → sink)
pub use media::{CommandExecutor, SystemCommandExecutor};
pub use stt::recognizer::Recognizer;

// Pipeline
pub use pipeline::{
    ProcessingResult, ProcessorOptions, ProgressObserver, RunState, VideoProcessor,
};

// Error handling
pub use error::{Result, SubgenError};

// Config
pub use config::Config;

// Data model
pub use stt::recognizer::{RecognitionBatch, Word};
pub use subtitle::Segment;
