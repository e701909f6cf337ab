//! SHA-256 integrity checks for toolchain archives.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{CatalogError, Result};

/// A content hash (SHA-256 hex digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute the SHA-256 hash of the given data.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex_encode(&hasher.finalize()))
    }

    /// Hash a file by streaming it through the digest.
    pub fn compute_file(path: &Path) -> Result<Self> {
        let mut file = std::fs::File::open(path)?;
        let mut hasher = Sha256::new();
        std::io::copy(&mut file, &mut hasher)?;
        Ok(ContentHash(hex_encode(&hasher.finalize())))
    }

    /// Get the hex string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `s` looks like a SHA-256 hex digest.
    pub fn is_valid_hex(s: &str) -> bool {
        s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Check `path` against this hash.
    pub fn verify_file(&self, path: &Path) -> Result<()> {
        let actual = Self::compute_file(path)?;
        if actual.0.eq_ignore_ascii_case(&self.0) {
            Ok(())
        } else {
            Err(CatalogError::IntegrityFailure {
                path: path.to_path_buf(),
                expected: self.0.clone(),
                actual: actual.0,
            })
        }
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode bytes as lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        let h = ContentHash::compute(b"hello");
        assert_eq!(
            h.as_str(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(ContentHash::is_valid_hex(h.as_str()));
    }

    #[test]
    fn hex_validation() {
        assert!(!ContentHash::is_valid_hex("abc"));
        assert!(!ContentHash::is_valid_hex(&"g".repeat(64)));
        assert!(ContentHash::is_valid_hex(&"A".repeat(64)));
    }

    #[test]
    fn verify_file_matches_and_mismatches() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toolchain.tar.xz");
        std::fs::write(&path, b"archive bytes").unwrap();

        let good = ContentHash::compute(b"archive bytes");
        assert_eq!(ContentHash::compute_file(&path).unwrap(), good);
        good.verify_file(&path).unwrap();

        let bad = ContentHash::compute(b"other bytes");
        let err = bad.verify_file(&path).unwrap_err();
        assert!(matches!(err, CatalogError::IntegrityFailure { .. }));
    }
}
