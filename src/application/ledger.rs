//! Transient file ledger
//!
//! Tracks every non-cache file a pipeline run creates and removes them when
//! the run ends. `release()` is the normal exit; if the ledger is dropped
//! without being released (a panic unwinding through the run, or the run's
//! future being dropped) the same cleanup happens synchronously in `Drop`.

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use tokio::fs;

/// Outcome of a ledger release
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Paths that were removed
    pub removed: Vec<PathBuf>,
    /// Paths kept because they are persisted cache artifacts
    pub retained: Vec<PathBuf>,
    /// Paths whose removal failed
    pub failed: Vec<PathBuf>,
}

/// Ledger of transient files owned by one pipeline run
#[derive(Debug, Default)]
pub struct TempFileLedger {
    tracked: Vec<PathBuf>,
    protected: HashSet<PathBuf>,
    released: bool,
}

impl TempFileLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a path for removal at the end of the run.
    /// Tracking a path twice is a no-op.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.tracked.contains(&path) {
            self.tracked.push(path);
        }
    }

    /// Mark a path as a persisted cache artifact. It will never be removed,
    /// even if it was tracked earlier in the run.
    pub fn protect(&mut self, path: impl Into<PathBuf>) {
        let _ = self.protected.insert(path.into());
    }

    /// Remove every tracked path still on disk, except protected ones.
    ///
    /// Individual failures are logged and collected; they never stop the
    /// remaining removals.
    pub async fn release(mut self) -> ReleaseReport {
        self.released = true;
        let mut report = ReleaseReport::default();

        for path in &self.tracked {
            if self.protected.contains(path) {
                report.retained.push(path.clone());
                continue;
            }

            match fs::remove_file(path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Cleaned up temp file");
                    report.removed.push(path.clone());
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to clean up temp file");
                    report.failed.push(path.clone());
                }
            }
        }

        report
    }
}

impl Drop for TempFileLedger {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        for path in self.tracked.iter().filter(|p| !self.protected.contains(*p)) {
            match std::fs::remove_file(path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Cleaned up temp file on abort");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to clean up temp file on abort");
                }
            }
        }
    }
}
