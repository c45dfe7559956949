//! Content fingerprint value object

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of a fingerprint in hex characters (SHA-256)
pub const FINGERPRINT_LEN: usize = 64;

/// Content-derived identity of an upload.
///
/// A lowercase hex SHA-256 digest of the exact upload bytes. Safe to use as a
/// filename component: fixed width, `[0-9a-f]` only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a byte sequence. Total: empty input is fine.
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    /// The hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_bytes_same_fingerprint() {
        assert_eq!(Fingerprint::of(b"hello"), Fingerprint::of(b"hello"));
    }

    #[test]
    fn one_byte_difference_changes_fingerprint() {
        assert_ne!(Fingerprint::of(b"hello"), Fingerprint::of(b"hellp"));
        assert_ne!(Fingerprint::of(b"hello"), Fingerprint::of(b"hello\0"));
    }

    #[test]
    fn empty_input_is_known_digest() {
        assert_eq!(
            Fingerprint::of(b"").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn fingerprint_is_fixed_width_hex() {
        let fp = Fingerprint::of(&[0xff; 4096]);
        assert_eq!(fp.as_str().len(), FINGERPRINT_LEN);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn short_is_prefix() {
        let fp = Fingerprint::of(b"abc");
        assert!(fp.as_str().starts_with(fp.short()));
        assert_eq!(fp.short().len(), 12);
    }
}
