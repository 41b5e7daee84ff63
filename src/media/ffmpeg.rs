//! The three fixed ffmpeg/ffprobe invocation contracts: audio extraction,
//! duration probing, and subtitle burn-in.
//!
//! Burn-in is an ordered list of strategies tried in sequence with a typed
//! outcome per attempt, short-circuiting on the first success. Individual
//! attempt failures are logged, never raised; only exhausting the whole list
//! produces an error, and the orchestrator downgrades even that.

use crate::defaults::{FFMPEG, FFPROBE, SAMPLE_RATE};
use crate::error::{Result, SubgenError};
use crate::media::executor::CommandExecutor;
use log::{debug, info, warn};
use std::path::Path;

/// Media tool facade over a command executor.
#[derive(Debug, Clone)]
pub struct MediaTools<E: CommandExecutor> {
    executor: E,
}

/// One burn-in strategy: a display name plus its argument template.
struct BurnStrategy {
    name: &'static str,
    args: Vec<String>,
}

impl<E: CommandExecutor> MediaTools<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Extract the audio track as mono 16kHz WAV at `output`.
    ///
    /// Fatal on failure: without audio there is nothing to transcribe.
    pub fn extract_audio(&self, video: &Path, output: &Path) -> Result<()> {
        let video = video.to_string_lossy();
        let output_str = output.to_string_lossy();
        let rate = SAMPLE_RATE.to_string();
        let args = [
            "-i",
            video.as_ref(),
            "-ar",
            &rate,
            "-ac",
            "1",
            "-f",
            "wav",
            output_str.as_ref(),
            "-y",
        ];

        self.executor.execute(FFMPEG, &args)?;

        if !file_is_non_empty(output) {
            return Err(SubgenError::ExternalTool {
                tool: FFMPEG.to_string(),
                message: format!("produced no audio output at {}", output.display()),
            });
        }
        Ok(())
    }

    /// Probe the video's duration in seconds.
    ///
    /// Fails soft: a probe that runs but produces unparseable output (or
    /// fails outright) yields 0.0. Only a missing ffprobe binary errors,
    /// since that is a setup problem worth surfacing.
    pub fn probe_duration(&self, video: &Path) -> Result<f64> {
        let video = video.to_string_lossy();
        let args = [
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
            video.as_ref(),
        ];

        match self.executor.execute(FFPROBE, &args) {
            Ok(stdout) => Ok(stdout.trim().parse::<f64>().unwrap_or(0.0)),
            Err(SubgenError::ToolNotFound { tool }) => Err(SubgenError::ToolNotFound { tool }),
            Err(e) => {
                debug!("duration probe failed, reporting 0: {}", e);
                Ok(0.0)
            }
        }
    }

    /// Burn `srt` into `video`, writing the muxed result to `output`.
    ///
    /// Tries, in order: the subtitles video filter, a container re-mux with
    /// soft mov_text subtitles, and the subtitles filter with forced inline
    /// styling. Returns `BurnInFailed` only when every strategy failed.
    pub fn burn_subtitles(&self, video: &Path, srt: &Path, output: &Path) -> Result<()> {
        let strategies = burn_strategies(video, srt, output);
        let attempts = strategies.len();

        for strategy in strategies {
            info!("burn-in attempt: {}", strategy.name);
            let args: Vec<&str> = strategy.args.iter().map(String::as_str).collect();
            match self.executor.execute(FFMPEG, &args) {
                Ok(_) if file_is_non_empty(output) => {
                    info!("burn-in succeeded via {}", strategy.name);
                    return Ok(());
                }
                Ok(_) => {
                    warn!(
                        "burn-in attempt '{}' ran but produced no output at {}",
                        strategy.name,
                        output.display()
                    );
                }
                Err(e) => {
                    warn!(
                        "burn-in attempt '{}' failed (ffmpeg {}): {}",
                        strategy.name,
                        strategy.args.join(" "),
                        e
                    );
                }
            }
        }

        Err(SubgenError::BurnInFailed { attempts })
    }
}

fn burn_strategies(video: &Path, srt: &Path, output: &Path) -> Vec<BurnStrategy> {
    let video = video.to_string_lossy().to_string();
    let srt = srt.to_string_lossy().to_string();
    let output = output.to_string_lossy().to_string();

    vec![
        BurnStrategy {
            name: "subtitle filter",
            args: vec![
                "-i".into(),
                video.clone(),
                "-vf".into(),
                format!("subtitles='{}'", srt),
                "-c:a".into(),
                "copy".into(),
                output.clone(),
                "-y".into(),
            ],
        },
        BurnStrategy {
            name: "soft subtitles (mov_text)",
            args: vec![
                "-i".into(),
                video.clone(),
                "-f".into(),
                "srt".into(),
                "-i".into(),
                srt.clone(),
                "-map".into(),
                "0:v".into(),
                "-map".into(),
                "0:a".into(),
                "-map".into(),
                "1".into(),
                "-c:v".into(),
                "copy".into(),
                "-c:a".into(),
                "copy".into(),
                "-c:s".into(),
                "mov_text".into(),
                output.clone(),
                "-y".into(),
            ],
        },
        BurnStrategy {
            name: "subtitle filter with forced style",
            args: vec![
                "-i".into(),
                video,
                "-vf".into(),
                format!(
                    "subtitles={}:force_style='FontSize=24,PrimaryColour=&H00FFFFFF,\
                     OutlineColour=&H00000000,BackColour=&H80000000,BorderStyle=4'",
                    srt
                ),
                "-c:a".into(),
                "copy".into(),
                output,
                "-y".into(),
            ],
        },
    ]
}

fn file_is_non_empty(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}
