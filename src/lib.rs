//! whisper-gateway - caching transcription gateway
//!
//! This crate accepts uploaded audio or video, normalizes it with FFmpeg and
//! transcribes it with whisper.cpp. Both the normalized audio and the caption
//! are cached under the SHA-256 fingerprint of the uploaded bytes, so
//! repeated uploads skip the expensive stages.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Fingerprints, artifacts, captions, config and errors
//! - **Application**: The transcription pipeline, temp-file ledger and port traits
//! - **Infrastructure**: Adapter implementations (filesystem cache, FFmpeg, whisper-cli)
//! - **Server**: axum HTTP surface
//! - **CLI**: Command-line interface, argument parsing and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod server;
