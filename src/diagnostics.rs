//! External dependency checking.
//!
//! Verifies that the media tools the pipeline shells out to are installed
//! before any heavy work starts.

use crate::defaults::{FFMPEG, FFPROBE};
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool is installed and working
    Ok,
    /// Tool is not found
    NotFound,
    /// Tool is found but behaved unexpectedly
    Warning(String),
}

/// Check if a command exists and is executable.
fn check_command(command: &str) -> CheckResult {
    match Command::new(command).arg("-version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but -version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Check every external tool the pipeline depends on.
///
/// Returns (tool name, result) pairs in a stable order.
pub fn check_dependencies() -> Vec<(&'static str, CheckResult)> {
    vec![(FFMPEG, check_command(FFMPEG)), (FFPROBE, check_command(FFPROBE))]
}

/// True when every required tool is present.
pub fn all_present() -> bool {
    check_dependencies()
        .iter()
        .all(|(_, result)| !matches!(result, CheckResult::NotFound))
}
