//! Upload value object

use crate::domain::error::InvalidUploadError;
use crate::domain::fingerprint::Fingerprint;

/// Value object representing one uploaded media file.
/// Holds the raw bytes and a filename that is safe to use as a path component.
#[derive(Debug, Clone)]
pub struct Upload {
    filename: String,
    data: Vec<u8>,
}

impl Upload {
    /// Create an Upload, rejecting a missing or unusable filename.
    ///
    /// Only the final path component of `filename` is kept, so a client
    /// supplied name can never point outside the temp directory.
    pub fn new(filename: &str, data: Vec<u8>) -> Result<Self, InvalidUploadError> {
        let name = filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();

        if name.is_empty() || name.chars().all(|c| c == '.') || name.contains('\0') {
            return Err(InvalidUploadError {
                filename: filename.to_string(),
            });
        }

        Ok(Self {
            filename: name.to_string(),
            data,
        })
    }

    /// Sanitized filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Raw upload bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Content fingerprint of the upload bytes
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.data)
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}
