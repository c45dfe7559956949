//! Caption value object

use std::fmt;

/// Caption used when the engine produced no text. Cached like any other caption.
pub const NO_SPEECH_DETECTED: &str = "[No speech detected]";

/// Final transcription text, trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    /// Normalize raw engine output: trim surrounding whitespace and map an
    /// empty result to [`NO_SPEECH_DETECTED`].
    pub fn from_engine_output(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            Self(NO_SPEECH_DETECTED.to_string())
        } else {
            Self(text.to_string())
        }
    }

    /// Caption read back from the cache. Trimmed, but otherwise served as stored.
    pub fn from_cached(stored: &str) -> Self {
        Self(stored.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
