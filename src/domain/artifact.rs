//! Cache artifact kinds

use std::fmt;

use super::fingerprint::Fingerprint;

/// Kind of durable artifact cached per fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// 16 kHz mono 16-bit PCM WAV produced by the converter
    NormalizedAudio,
    /// Final caption text
    Transcription,
}

impl ArtifactKind {
    /// File extension that encodes the kind
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::NormalizedAudio => "wav",
            Self::Transcription => "txt",
        }
    }

    /// Cache file name for this kind: `{fingerprint}.{ext}`
    pub fn file_name(&self, fingerprint: &Fingerprint) -> String {
        format!("{}.{}", fingerprint, self.extension())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NormalizedAudio => f.write_str("normalized audio"),
            Self::Transcription => f.write_str("transcription"),
        }
    }
}
