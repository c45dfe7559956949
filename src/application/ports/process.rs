//! Process runner port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Process runner errors
#[derive(Debug, Clone, Error)]
pub enum ProcessError {
    #[error("Required tool not found: {0}")]
    NotFound(String),

    #[error("Failed to start {program}: {message}")]
    SpawnFailed { program: String, message: String },

    #[error("{program} did not finish within {secs}s")]
    TimedOut { program: String, secs: u64 },
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Diagnostic text for error reports: stderr, or stdout when stderr is empty
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        match self.exit_code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Port for running an external tool to completion
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, wait for it to exit and capture its output.
    ///
    /// # Arguments
    /// * `program` - Executable to run
    /// * `args` - Command-line arguments
    /// * `cwd` - Working directory, or the gateway's own when `None`
    ///
    /// # Returns
    /// The captured output. A non-zero exit is not an error at this level.
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput, ProcessError>;
}
