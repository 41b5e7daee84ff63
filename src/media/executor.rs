//! Testable execution of external media tools.
//!
//! The `CommandExecutor` trait enables full testability of the ffmpeg
//! boundary without ffmpeg installed: production code goes through
//! `SystemCommandExecutor`, tests substitute a mock.

use crate::error::{Result, SubgenError};
use std::process::Command;

/// Trait for executing system commands.
///
/// Object-safe, Send + Sync for use in concurrent contexts.
pub trait CommandExecutor: Send + Sync {
    /// Execute a command with arguments.
    ///
    /// Returns the stdout of the command on success.
    /// Returns an error if the command fails or is not found.
    fn execute(&self, command: &str, args: &[&str]) -> Result<String>;
}

/// Production command executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn execute(&self, command: &str, args: &[&str]) -> Result<String> {
        let output = Command::new(command).args(args).output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SubgenError::ToolNotFound {
                    tool: command.to_string(),
                }
            } else {
                SubgenError::ExternalTool {
                    tool: command.to_string(),
                    message: format!("failed to execute: {}", e),
                }
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubgenError::ExternalTool {
                tool: command.to_string(),
                message: format!("exited with {:?}: {}", output.status.code(), stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
