//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod cache;
pub mod config;
pub mod normalizer;
pub mod process;
pub mod transcriber;

// Re-export common types
pub use cache::{CacheError, CacheStore};
pub use config::ConfigStore;
pub use normalizer::{AudioNormalizer, NormalizeError};
pub use process::{ProcessError, ProcessOutput, ProcessRunner};
pub use transcriber::{TranscriptionEngine, TranscriptionError};
