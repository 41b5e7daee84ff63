//! Command-line interface for subgen
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Automatic subtitle generation for video files
#[derive(Parser, Debug)]
#[command(
    name = "subgen",
    version,
    about = "Automatic subtitle generation for video files"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input video file
    #[arg(value_name = "VIDEO")]
    pub video: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: info, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Recognition model (default: base.en). See `subgen models list`
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Language code for transcription (default: auto-detect). Examples: auto, en, de
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Maximum characters per subtitle line
    #[arg(long, value_name = "CHARS")]
    pub max_line_length: Option<usize>,

    /// Maximum time a line stays on screen. Examples: 3, 2.5s, 4s500ms
    #[arg(long, value_name = "DURATION", value_parser = parse_duration_secs)]
    pub max_line_duration: Option<f64>,

    /// Write subtitles only; skip burning them into the video
    #[arg(long)]
    pub no_burn: bool,

    /// Root directory for generated files (default: output)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the processing result as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Parse a duration argument into seconds.
///
/// Supports bare numbers (seconds, fractional allowed) and any format
/// accepted by `humantime` (`3s`, `1m`, `2s500ms`).
fn parse_duration_secs(s: &str) -> Result<f64, String> {
    let s = s.trim();
    let secs = if let Ok(secs) = s.parse::<f64>() {
        secs
    } else {
        humantime::parse_duration(s)
            .map(|d| d.as_secs_f64())
            .map_err(|e| e.to_string())?
    };
    if secs <= 0.0 {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(secs)
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage recognition models
    Models {
        /// Action to perform
        #[command(subcommand)]
        action: ModelsAction,
    },

    /// Check external dependencies (ffmpeg, ffprobe)
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Model management actions
#[derive(Subcommand, Debug)]
pub enum ModelsAction {
    /// List known models and whether they are installed
    List,
}
