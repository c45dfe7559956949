//! Transcription domain module

mod caption;
mod upload;

pub use caption::{Caption, NO_SPEECH_DETECTED};
pub use upload::Upload;
