//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod artifact;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod transcription;

// Re-export common types
pub use artifact::ArtifactKind;
pub use config::AppConfig;
pub use error::*;
pub use fingerprint::Fingerprint;
pub use transcription::{Caption, Upload, NO_SPEECH_DETECTED};
