//! Default configuration constants for subgen.
//!
//! Shared constants used across configuration types and the pipeline,
//! kept in one place to ensure consistency.

/// Audio sample rate in Hz expected by the recognition engine.
///
/// 16kHz mono is the standard input for speech recognition models and is
/// what the ffmpeg extraction step produces.
pub const SAMPLE_RATE: u32 = 16000;

/// Number of audio frames fed to the recognizer per chunk.
///
/// Small enough that progress updates feel continuous, large enough that
/// per-chunk overhead is negligible (250ms of audio at 16kHz).
pub const CHUNK_FRAMES: usize = 4000;

/// Default maximum characters per subtitle line.
///
/// 40 characters fits comfortably on one display row at typical player
/// font sizes without wrapping.
pub const MAX_LINE_LENGTH: usize = 40;

/// Default maximum duration of a single subtitle line in seconds.
pub const MAX_LINE_DURATION: f64 = 3.0;

/// Default recognition model name.
pub const DEFAULT_MODEL: &str = "base.en";

/// Default language code for transcription.
///
/// "auto" lets the engine detect the spoken language.
pub const DEFAULT_LANGUAGE: &str = "auto";

/// Name of the media tool binary used for extraction and burn-in.
pub const FFMPEG: &str = "ffmpeg";

/// Name of the media tool binary used for duration probing.
pub const FFPROBE: &str = "ffprobe";

/// Directory (under the output root) where subtitle files are kept.
pub const SUBTITLE_DIR: &str = "subtitles";

/// Directory (under the output root) where burned videos are written.
pub const VIDEO_DIR: &str = "videos";

/// Suffix appended to the input file stem for the burned output video.
pub const BURNED_SUFFIX: &str = "_with_subs";
