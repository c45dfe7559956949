//! Application layer - Use cases and port interfaces
//!
//! Contains the transcription pipeline, the transient file ledger it
//! relies on, and trait definitions for external system interactions.

pub mod ledger;
pub mod pipeline;
pub mod ports;

// Re-export use cases
pub use ledger::{ReleaseReport, TempFileLedger};
pub use pipeline::{PipelineError, TranscriptionOutcome, TranscriptionPipeline};
