//! Recognition adapter: feeds WAV audio to a recognizer in fixed-size chunks.
//!
//! Validates that the input is mono 16-bit PCM (what the extraction step
//! produces and the engine expects), then walks the samples chunk by chunk,
//! collecting whatever batches the engine emits along the way plus the
//! trailing batch from finalization.

use crate::defaults::SAMPLE_RATE;
use crate::error::{Result, SubgenError};
use crate::stt::recognizer::{RecognitionBatch, Recognizer};
use log::warn;
use std::path::Path;

/// Progress hook invoked after each chunk with the fraction of frames
/// consumed so far (0.0..=1.0).
///
/// Purely observational: transcription output is identical with or without
/// one attached.
pub type ProgressFn<'a> = &'a dyn Fn(f64);

/// Transcribe a WAV file through `recognizer`, consuming `chunk_frames`
/// samples per engine call.
pub fn transcribe_wav(
    path: &Path,
    recognizer: &mut dyn Recognizer,
    chunk_frames: usize,
    progress: Option<ProgressFn<'_>>,
) -> Result<Vec<RecognitionBatch>> {
    if chunk_frames == 0 {
        return Err(SubgenError::ConfigInvalidValue {
            key: "chunk_frames".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    let mut reader = hound::WavReader::open(path).map_err(|e| SubgenError::AudioRead {
        message: format!("failed to open {}: {}", path.display(), e),
    })?;

    let spec = reader.spec();
    if spec.channels != 1
        || spec.bits_per_sample != 16
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(SubgenError::AudioFormatMismatch {
            expected: "mono 16-bit PCM".to_string(),
            actual: format!(
                "{} channel(s), {}-bit {:?}",
                spec.channels, spec.bits_per_sample, spec.sample_format
            ),
        });
    }
    if spec.sample_rate != SAMPLE_RATE {
        warn!(
            "audio sample rate is {} Hz, expected {} Hz; recognition quality may suffer",
            spec.sample_rate, SAMPLE_RATE
        );
    }

    let samples: Vec<i16> = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| SubgenError::AudioRead {
            message: format!("failed to read samples from {}: {}", path.display(), e),
        })?;

    transcribe_samples(&samples, recognizer, chunk_frames, progress)
}

/// Chunked feed over in-memory samples. Split out so tests can drive the
/// adapter without touching the filesystem.
pub fn transcribe_samples(
    samples: &[i16],
    recognizer: &mut dyn Recognizer,
    chunk_frames: usize,
    progress: Option<ProgressFn<'_>>,
) -> Result<Vec<RecognitionBatch>> {
    let total = samples.len();
    let mut batches = Vec::new();
    let mut consumed = 0usize;

    for chunk in samples.chunks(chunk_frames) {
        batches.extend(recognizer.accept_waveform(chunk)?);
        consumed += chunk.len();
        if let Some(report) = progress {
            report(consumed as f64 / total as f64);
        }
    }

    batches.extend(recognizer.finalize()?);
    Ok(batches)
}
