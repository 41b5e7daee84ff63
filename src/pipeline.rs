//! Pipeline orchestrator: one video in, subtitles (and optionally a burned
//! video) out.
//!
//! A run moves through `ExtractingAudio → Transcribing → Segmenting →
//! Serializing → BurningSubtitles → Done`, with any failure before burn-in
//! ending the run in `Failed`. Burn-in is the one non-fatal stage: if all
//! strategies fail the run still completes, the result just points back at
//! the original video with `burned = false`.
//!
//! Each run owns an isolated scratch directory, so runs for different videos
//! may execute concurrently as long as their output filenames differ.

use crate::defaults::{BURNED_SUFFIX, CHUNK_FRAMES, SUBTITLE_DIR, VIDEO_DIR};
use crate::error::{Result, SubgenError};
use crate::media::{CommandExecutor, MediaTools};
use crate::stt::adapter::transcribe_wav;
use crate::stt::recognizer::Recognizer;
use crate::subtitle::{split_at_sentences, split_into_lines, srt, Segment};
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// States a processing run moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    ExtractingAudio,
    Transcribing,
    Segmenting,
    Serializing,
    BurningSubtitles,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Idle => "idle",
            RunState::ExtractingAudio => "extracting audio",
            RunState::Transcribing => "transcribing",
            RunState::Segmenting => "segmenting",
            RunState::Serializing => "writing subtitles",
            RunState::BurningSubtitles => "burning subtitles",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Progress reporting port.
///
/// Purely observational: a run behaves identically with no observer
/// attached. Callbacks fire on the run's own thread.
pub trait ProgressObserver: Send + Sync {
    fn state_changed(&self, _state: RunState) {}
    /// Fraction of audio frames consumed during transcription (0.0..=1.0).
    fn transcription_progress(&self, _fraction: f64) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ProgressObserver for NullObserver {}

/// Progress notification carried over a channel to a rendering thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    State(RunState),
    Transcription(f64),
}

/// Observer that forwards events over a crossbeam channel.
///
/// Send failures are ignored: a dropped receiver must not affect the run.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: crossbeam_channel::Sender<ProgressEvent>,
}

impl ChannelObserver {
    pub fn new(sender: crossbeam_channel::Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn state_changed(&self, state: RunState) {
        let _ = self.sender.send(ProgressEvent::State(state));
    }

    fn transcription_progress(&self, fraction: f64) {
        let _ = self.sender.send(ProgressEvent::Transcription(fraction));
    }
}

/// Aggregate record returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingResult {
    /// The burned video on success, the original input otherwise.
    pub output_video: PathBuf,
    /// Primary subtitle file under the output root.
    pub srt_path: PathBuf,
    /// The same subtitle file relative to the output root.
    pub project_srt_path: PathBuf,
    /// Final ordered segment sequence, sorted by start time.
    pub segments: Vec<Segment>,
    /// Whether burn-in succeeded.
    pub burned: bool,
    /// Probed input duration in seconds (0.0 when the probe fails).
    pub duration: f64,
}

/// Tunables for one processing run.
#[derive(Debug, Clone)]
pub struct ProcessorOptions {
    pub max_line_length: usize,
    pub max_line_duration: f64,
    pub chunk_frames: usize,
    pub burn: bool,
    /// Root directory for subtitle files and burned videos.
    pub output_dir: PathBuf,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            max_line_length: crate::defaults::MAX_LINE_LENGTH,
            max_line_duration: crate::defaults::MAX_LINE_DURATION,
            chunk_frames: CHUNK_FRAMES,
            burn: true,
            output_dir: PathBuf::from("output"),
        }
    }
}

/// The orchestrator. Holds the media tool facade and run options; the
/// recognizer is passed per run since engines are stateful across chunks.
pub struct VideoProcessor<E: CommandExecutor> {
    tools: MediaTools<E>,
    options: ProcessorOptions,
}

impl<E: CommandExecutor> VideoProcessor<E> {
    pub fn new(executor: E, options: ProcessorOptions) -> Self {
        Self {
            tools: MediaTools::new(executor),
            options,
        }
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Process one video end to end.
    ///
    /// Fatal errors (extraction, transcription, segmentation, serialization)
    /// abort the run after notifying `Failed`. Burn-in failure degrades the
    /// result instead of failing the run.
    pub fn run(
        &self,
        video: &Path,
        recognizer: &mut dyn Recognizer,
        observer: &dyn ProgressObserver,
    ) -> Result<ProcessingResult> {
        observer.state_changed(RunState::Idle);
        match self.run_inner(video, recognizer, observer) {
            Ok(result) => {
                observer.state_changed(RunState::Done);
                Ok(result)
            }
            Err(e) => {
                observer.state_changed(RunState::Failed);
                Err(e)
            }
        }
    }

    fn run_inner(
        &self,
        video: &Path,
        recognizer: &mut dyn Recognizer,
        observer: &dyn ProgressObserver,
    ) -> Result<ProcessingResult> {
        if !video.exists() {
            return Err(SubgenError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("input video not found: {}", video.display()),
            )));
        }

        let stem = video
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("video")
            .to_string();

        // Scratch space for this run only; removed on drop
        let scratch = tempfile::tempdir()?;
        let audio_path = scratch.path().join(format!("{}_audio.wav", stem));

        observer.state_changed(RunState::ExtractingAudio);
        self.tools.extract_audio(video, &audio_path)?;

        let duration = match self.tools.probe_duration(video) {
            Ok(d) => d,
            Err(e) => {
                warn!("duration probe unavailable: {}", e);
                0.0
            }
        };

        observer.state_changed(RunState::Transcribing);
        let report = |fraction: f64| observer.transcription_progress(fraction);
        let batches = transcribe_wav(
            &audio_path,
            recognizer,
            self.options.chunk_frames,
            Some(&report),
        )?;
        if batches.iter().all(|b| b.is_blank()) {
            return Err(SubgenError::NoSpeechDetected);
        }
        info!(
            "transcription produced {} batch(es) with model {}",
            batches.len(),
            recognizer.model_name()
        );

        observer.state_changed(RunState::Segmenting);
        let lines = split_into_lines(
            &batches,
            self.options.max_line_length,
            self.options.max_line_duration,
        );
        let segments = split_at_sentences(lines);
        if segments.is_empty() {
            return Err(SubgenError::EmptySegmentSet);
        }

        observer.state_changed(RunState::Serializing);
        let srt_name = format!("{}.srt", stem);
        let project_srt_path = PathBuf::from(SUBTITLE_DIR).join(&srt_name);
        let srt_path = self.options.output_dir.join(&project_srt_path);
        srt::write_file(&segments, &srt_path)?;
        info!("subtitle file written to {}", srt_path.display());

        let (output_video, burned) = if self.options.burn {
            observer.state_changed(RunState::BurningSubtitles);
            let burned_path = self
                .options
                .output_dir
                .join(VIDEO_DIR)
                .join(format!("{}{}.mp4", stem, BURNED_SUFFIX));
            if let Some(parent) = burned_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            match self.tools.burn_subtitles(video, &srt_path, &burned_path) {
                Ok(()) => (burned_path, true),
                Err(e) => {
                    warn!("burn-in failed, keeping original video: {}", e);
                    (video.to_path_buf(), false)
                }
            }
        } else {
            (video.to_path_buf(), false)
        };

        Ok(ProcessingResult {
            output_video,
            srt_path,
            project_srt_path,
            segments,
            burned,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SAMPLE_RATE;
    use crate::stt::recognizer::{MockRecognizer, RecognitionBatch, Word};
    use std::sync::Mutex;

    /// Executor that simulates ffmpeg/ffprobe by inspecting the arguments.
    struct FakeMedia {
        /// When false, burn-in invocations fail with a non-zero exit.
        burn_works: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeMedia {
        fn new(burn_works: bool) -> Self {
            Self {
                burn_works,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn write_silence_wav(path: &Path) {
            let spec = hound::WavSpec {
                channels: 1,
                sample_rate: SAMPLE_RATE,
                bits_per_sample: 16,
                sample_format: hound::SampleFormat::Int,
            };
            let mut writer = hound::WavWriter::create(path, spec).unwrap();
            for _ in 0..8000 {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
    }

    impl CommandExecutor for &FakeMedia {
        fn execute(&self, command: &str, args: &[&str]) -> crate::error::Result<String> {
            self.calls.lock().unwrap().push(command.to_string());
            if command == "ffprobe" {
                return Ok("42.5\n".to_string());
            }
            // ffmpeg: audio extraction writes a WAV, burn-in writes the video
            if args.contains(&"wav") {
                let output = args[args.len() - 2];
                FakeMedia::write_silence_wav(Path::new(output));
                return Ok(String::new());
            }
            if self.burn_works {
                let output = args[args.len() - 2];
                std::fs::write(output, b"burned video").unwrap();
                Ok(String::new())
            } else {
                Err(SubgenError::ExternalTool {
                    tool: "ffmpeg".to_string(),
                    message: "exited with Some(1): no such filter".to_string(),
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        states: Mutex<Vec<RunState>>,
        fractions: Mutex<Vec<f64>>,
    }

    impl ProgressObserver for RecordingObserver {
        fn state_changed(&self, state: RunState) {
            self.states.lock().unwrap().push(state);
        }
        fn transcription_progress(&self, fraction: f64) {
            self.fractions.lock().unwrap().push(fraction);
        }
    }

    fn three_word_batch() -> RecognitionBatch {
        RecognitionBatch::from_words(vec![
            Word::new("hi", 0.0, 0.5),
            Word::new("there", 0.6, 1.0),
            Word::new("friend", 1.1, 1.6),
        ])
    }

    fn processor<'a>(media: &'a FakeMedia, output_dir: &Path) -> VideoProcessor<&'a FakeMedia> {
        VideoProcessor::new(
            media,
            ProcessorOptions {
                max_line_length: 8,
                max_line_duration: 3.0,
                output_dir: output_dir.to_path_buf(),
                ..ProcessorOptions::default()
            },
        )
    }

    fn touch_video(dir: &Path) -> PathBuf {
        let video = dir.join("clip.mp4");
        std::fs::write(&video, b"not really a video").unwrap();
        video
    }

    #[test]
    fn happy_path_produces_burned_result() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        let observer = RecordingObserver::default();
        let mut rec = MockRecognizer::new("mock").with_batches(vec![three_word_batch()]);

        let result = processor(&media, dir.path())
            .run(&video, &mut rec, &observer)
            .expect("run should succeed");

        assert!(result.burned);
        assert_eq!(result.duration, 42.5);
        assert_eq!(
            result.output_video,
            dir.path().join("videos").join("clip_with_subs.mp4")
        );
        assert_eq!(
            result.srt_path,
            dir.path().join("subtitles").join("clip.srt")
        );
        assert_eq!(result.project_srt_path, Path::new("subtitles/clip.srt"));
        // max_line_length 8: "hi there" fits exactly, "friend" overflows
        assert_eq!(result.segments.len(), 2);
        assert_eq!(result.segments[0].text, "hi there");
        assert_eq!(result.segments[1].text, "friend");
        assert!(result.srt_path.exists());
        assert!(result.output_video.exists());

        let states = observer.states.lock().unwrap().clone();
        assert_eq!(
            states,
            vec![
                RunState::Idle,
                RunState::ExtractingAudio,
                RunState::Transcribing,
                RunState::Segmenting,
                RunState::Serializing,
                RunState::BurningSubtitles,
                RunState::Done,
            ]
        );
        assert!(!observer.fractions.lock().unwrap().is_empty());
    }

    #[test]
    fn no_speech_is_fatal_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        let observer = RecordingObserver::default();
        let mut rec = MockRecognizer::new("mock"); // no batches

        let result = processor(&media, dir.path()).run(&video, &mut rec, &observer);
        assert!(matches!(result, Err(SubgenError::NoSpeechDetected)));
        assert!(!dir.path().join("subtitles").join("clip.srt").exists());
        assert_eq!(
            observer.states.lock().unwrap().last(),
            Some(&RunState::Failed)
        );
    }

    #[test]
    fn blank_batches_count_as_no_speech() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        let mut rec = MockRecognizer::new("mock").with_batches(vec![RecognitionBatch::default()]);

        let result = processor(&media, dir.path()).run(&video, &mut rec, &NullObserver);
        assert!(matches!(result, Err(SubgenError::NoSpeechDetected)));
    }

    #[test]
    fn wordless_batches_yield_empty_segment_set() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        // Aggregate text without word timings: survives the speech check but
        // the segmenter has nothing to place
        let batch = RecognitionBatch {
            text: "untimed text".to_string(),
            words: Vec::new(),
        };
        let mut rec = MockRecognizer::new("mock").with_batches(vec![batch]);

        let result = processor(&media, dir.path()).run(&video, &mut rec, &NullObserver);
        assert!(matches!(result, Err(SubgenError::EmptySegmentSet)));
    }

    #[test]
    fn burn_failure_degrades_instead_of_failing() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(false);
        let observer = RecordingObserver::default();
        let mut rec = MockRecognizer::new("mock").with_batches(vec![three_word_batch()]);

        let result = processor(&media, dir.path())
            .run(&video, &mut rec, &observer)
            .expect("burn failure must not fail the run");

        assert!(!result.burned);
        assert_eq!(result.output_video, video);
        assert!(result.srt_path.exists(), "subtitles must still be written");
        let contents = std::fs::read_to_string(&result.srt_path).unwrap();
        assert!(contents.contains("hi there"));
        assert_eq!(
            observer.states.lock().unwrap().last(),
            Some(&RunState::Done)
        );
    }

    #[test]
    fn missing_input_video_fails_before_any_tool_runs() {
        let dir = tempfile::tempdir().unwrap();
        let media = FakeMedia::new(true);
        let mut rec = MockRecognizer::new("mock");

        let result = processor(&media, dir.path()).run(
            Path::new("/nonexistent/clip.mp4"),
            &mut rec,
            &NullObserver,
        );
        assert!(result.is_err());
        assert!(media.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn no_burn_option_skips_burn_stage() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        let observer = RecordingObserver::default();
        let mut rec = MockRecognizer::new("mock").with_batches(vec![three_word_batch()]);

        let mut options = ProcessorOptions {
            max_line_length: 8,
            output_dir: dir.path().to_path_buf(),
            ..ProcessorOptions::default()
        };
        options.burn = false;

        let result = VideoProcessor::new(&media, options)
            .run(&video, &mut rec, &observer)
            .unwrap();
        assert!(!result.burned);
        assert_eq!(result.output_video, video);
        assert!(!observer
            .states
            .lock()
            .unwrap()
            .contains(&RunState::BurningSubtitles));
    }

    #[test]
    fn channel_observer_forwards_events() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let observer = ChannelObserver::new(tx);
        observer.state_changed(RunState::Transcribing);
        observer.transcription_progress(0.5);
        assert_eq!(
            rx.try_recv().unwrap(),
            ProgressEvent::State(RunState::Transcribing)
        );
        assert_eq!(rx.try_recv().unwrap(), ProgressEvent::Transcription(0.5));
    }

    #[test]
    fn channel_observer_survives_dropped_receiver() {
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let observer = ChannelObserver::new(tx);
        observer.state_changed(RunState::Done); // must not panic
    }

    #[test]
    fn segments_are_sorted_by_start() {
        let dir = tempfile::tempdir().unwrap();
        let video = touch_video(dir.path());
        let media = FakeMedia::new(true);
        let batch = RecognitionBatch::from_words(vec![
            Word::new("one.", 0.0, 0.8),
            Word::new("two", 1.0, 1.8),
            Word::new("three.", 2.0, 2.8),
            Word::new("four!", 5.0, 5.8),
        ]);
        let mut rec = MockRecognizer::new("mock").with_batches(vec![batch]);

        let result = processor(&media, dir.path())
            .run(&video, &mut rec, &NullObserver)
            .unwrap();
        for pair in result.segments.windows(2) {
            assert!(pair[0].start <= pair[1].start);
            assert!(pair[0].start <= pair[0].end);
        }
    }
}
