//! SRT rendering and file output.
//!
//! The wire format is the numbered-block layout players and the burn-in step
//! depend on: index line, `HH:MM:SS,mmm --> HH:MM:SS,mmm` timestamp line,
//! text line, blank separator. Timestamps are truncated, never rounded, so
//! output is stable for golden-file comparison.

use crate::error::{Result, SubgenError};
use crate::subtitle::segment::Segment;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Format a non-negative time in seconds as `HH:MM:SS,mmm`.
///
/// Hours are zero-padded to two digits and grow beyond that only when the
/// duration requires it. Milliseconds are truncated toward zero.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0).floor() as u64;
    let rem = total % 3600.0;
    let minutes = (rem / 60.0).floor() as u64;
    let rem = rem % 60.0;
    let secs = rem.floor() as u64;
    let millis = ((rem - rem.floor()) * 1000.0).floor() as u64;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Render segments to SRT text.
///
/// Segments are numbered 1..N in input order. A segment whose trimmed text is
/// empty is skipped without renumbering around it; such segments should never
/// be produced upstream, but the boundary defends anyway.
pub fn render(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (index, segment) in segments.iter().enumerate() {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            format_timestamp(segment.start),
            format_timestamp(segment.end),
            text,
        ));
    }
    out
}

/// Write segments to an SRT file at `path`.
///
/// The write is atomic with respect to the caller: the content is rendered in
/// memory, written to a temporary file in the target directory, and renamed
/// into place. Either the complete non-empty file exists afterwards or the
/// call fails with `Serialization` and no partial file is left behind.
pub fn write_file(segments: &[Segment], path: &Path) -> Result<()> {
    let contents = render(segments);
    if contents.is_empty() {
        return Err(SubgenError::Serialization {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "no non-empty segments to serialize",
            ),
        });
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| SubgenError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| SubgenError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| SubgenError::Serialization {
            path: path.to_path_buf(),
            source: e,
        })?;
    file.persist(path).map_err(|e| SubgenError::Serialization {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}
