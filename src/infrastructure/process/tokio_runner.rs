//! Tokio-based process runner adapter

use std::io;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ProcessError, ProcessOutput, ProcessRunner};

/// Runs external tools as tokio child processes.
///
/// Without a timeout the runner waits for as long as the tool takes.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    timeout: Option<Duration>,
}

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the tool and fail if it runs longer than `timeout`
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn map_spawn_error(program: &Path, e: io::Error) -> ProcessError {
        if e.kind() == io::ErrorKind::NotFound {
            ProcessError::NotFound(program.display().to_string())
        } else {
            ProcessError::SpawnFailed {
                program: program.display().to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<ProcessOutput, ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        tracing::debug!(program = %program.display(), ?args, "Spawning external tool");

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| ProcessError::TimedOut {
                    program: program.display().to_string(),
                    secs: limit.as_secs(),
                })?,
            None => command.output().await,
        }
        .map_err(|e| Self::map_spawn_error(program, e))?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
