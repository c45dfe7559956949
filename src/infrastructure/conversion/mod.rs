//! Audio conversion infrastructure module
//!
//! Normalizes uploaded media to the 16 kHz mono PCM WAV whisper.cpp expects.

mod ffmpeg;

pub use ffmpeg::{FfmpegNormalizer, TARGET_SAMPLE_RATE};
