//! Subtitle generation entry point.
//!
//! Orchestrates the complete flow for the CLI: check prerequisites, apply
//! overrides, load the recognizer, then run the pipeline on a worker thread
//! while the main thread renders progress.

use crate::config::Config;
use crate::diagnostics::{check_dependencies, CheckResult};
use crate::error::{Result, SubgenError};
use crate::media::SystemCommandExecutor;
use crate::models::catalog::{get_model, model_path};
use crate::pipeline::{
    ChannelObserver, ProcessingResult, ProcessorOptions, ProgressEvent, RunState, VideoProcessor,
};
use crate::stt::whisper::{WhisperConfig, WhisperRecognizer};
use crate::stt::Recognizer;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// CLI overrides applied on top of the loaded configuration.
#[derive(Debug, Default)]
pub struct GenerateArgs {
    pub model: Option<String>,
    pub language: Option<String>,
    pub max_line_length: Option<usize>,
    pub max_line_duration: Option<f64>,
    pub no_burn: bool,
    pub output_dir: Option<PathBuf>,
    pub quiet: bool,
    pub json: bool,
}

/// Run the generate command: extract → transcribe → segment → serialize →
/// burn, with progress rendered to stderr.
pub fn run_generate_command(mut config: Config, video: PathBuf, args: GenerateArgs) -> Result<()> {
    check_prerequisites()?;

    // Apply CLI overrides
    if let Some(m) = args.model {
        config.stt.model = m;
    }
    if let Some(l) = args.language {
        config.stt.language = l;
    }
    if let Some(n) = args.max_line_length {
        config.subtitles.max_line_length = n;
    }
    if let Some(d) = args.max_line_duration {
        config.subtitles.max_line_duration = d;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }
    if args.no_burn {
        config.output.burn = false;
    }

    if get_model(&config.stt.model).is_none() && !args.quiet {
        eprintln!(
            "{} '{}' is not in the model catalog; trying it anyway",
            "warning:".yellow(),
            config.stt.model
        );
    }

    let recognizer = build_recognizer(&config)?;
    let processor = VideoProcessor::new(
        SystemCommandExecutor::new(),
        ProcessorOptions {
            max_line_length: config.subtitles.max_line_length,
            max_line_duration: config.subtitles.max_line_duration,
            burn: config.output.burn,
            output_dir: config.output.dir.clone(),
            ..ProcessorOptions::default()
        },
    );

    let result = run_with_progress(processor, recognizer, video, args.quiet)?;
    report(&result, args.quiet, args.json)
}

fn build_recognizer(config: &Config) -> Result<WhisperRecognizer> {
    let path = model_path(&config.stt.model_dir, &config.stt.model);
    WhisperRecognizer::new(WhisperConfig {
        model_path: path.clone(),
        language: config.stt.language.clone(),
        threads: None,
    })
    .map_err(|e| match e {
        SubgenError::ModelNotFound { .. } => SubgenError::ModelNotFound {
            path: format!(
                "{} (download a ggml model and place it there, see `subgen models list`)",
                path.display()
            ),
        },
        other => other,
    })
}

/// Run the pipeline on a worker thread, rendering progress events on this
/// one until the run finishes.
fn run_with_progress(
    processor: VideoProcessor<SystemCommandExecutor>,
    mut recognizer: WhisperRecognizer,
    video: PathBuf,
    quiet: bool,
) -> Result<ProcessingResult> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let observer = ChannelObserver::new(tx);

    let handle = std::thread::spawn(move || {
        let rec: &mut dyn Recognizer = &mut recognizer;
        processor.run(&video, rec, &observer)
    });

    let mut bar: Option<ProgressBar> = None;
    for event in rx {
        match event {
            ProgressEvent::State(state) => {
                if let Some(b) = bar.take() {
                    b.finish_and_clear();
                }
                match state {
                    RunState::Idle | RunState::Done | RunState::Failed => {}
                    RunState::Transcribing => {
                        if !quiet {
                            bar = Some(transcription_bar());
                        }
                    }
                    other => {
                        if !quiet {
                            eprintln!("{} {}...", "→".blue(), other);
                        }
                    }
                }
            }
            ProgressEvent::Transcription(fraction) => {
                if let Some(b) = &bar {
                    b.set_position((fraction * 100.0).round() as u64);
                }
            }
        }
    }

    handle
        .join()
        .map_err(|_| SubgenError::Other("processing thread panicked".to_string()))?
}

fn transcription_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} transcribing [{bar:40.cyan/blue}] {pos}%")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

fn report(result: &ProcessingResult, quiet: bool, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(result)
            .map_err(|e| SubgenError::Other(format!("failed to render result as JSON: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    eprintln!(
        "{} {} segment(s) written to {}",
        "✓".green(),
        result.segments.len(),
        result.srt_path.display()
    );
    if result.duration > 0.0 {
        eprintln!("  input duration: {:.1}s", result.duration);
    }
    if result.burned {
        eprintln!(
            "{} subtitles burned into {}",
            "✓".green(),
            result.output_video.display()
        );
    } else {
        eprintln!(
            "{} video left unchanged at {} (use the .srt alongside it)",
            "!".yellow(),
            result.output_video.display()
        );
    }
    Ok(())
}

/// Fail fast when the media tools are missing.
fn check_prerequisites() -> Result<()> {
    for (tool, result) in check_dependencies() {
        if result == CheckResult::NotFound {
            return Err(SubgenError::ToolNotFound {
                tool: format!("{} (install FFmpeg and ensure it is in PATH)", tool),
            });
        }
    }
    Ok(())
}
