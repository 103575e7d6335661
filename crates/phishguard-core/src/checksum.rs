//! Model artifact integrity: SHA-256 of a file, compared against config.
//!
//! Runs once per artifact at startup, never on the prediction path.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::LoadError;

const BUF_SIZE: usize = 64 * 1024;

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Compute SHA-256 of a file and return the digest as lowercase hex.
pub fn sha256_path(path: &Path) -> Result<String, LoadError> {
    let mut f = File::open(path).map_err(|e| io_error(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f.read(&mut buf).map_err(|e| io_error(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Fails with `ChecksumMismatch` unless the file's digest equals `expected`
/// (case-insensitive hex, surrounding whitespace ignored).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<(), LoadError> {
    let actual = sha256_path(path)?;
    let expected = expected.trim().to_ascii_lowercase();
    if actual != expected {
        return Err(LoadError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    tracing::debug!(path = %path.display(), "model checksum verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HELLO_SHA256: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    #[test]
    fn sha256_path_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let digest = sha256_path(f.path()).unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verify_accepts_matching_digest() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello\n").unwrap();
        f.flush().unwrap();
        verify_sha256(f.path(), HELLO_SHA256).unwrap();
        verify_sha256(f.path(), &format!("  {}\n", HELLO_SHA256.to_uppercase())).unwrap();
    }

    #[test]
    fn verify_rejects_other_digest() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"tampered\n").unwrap();
        f.flush().unwrap();
        let err = verify_sha256(f.path(), HELLO_SHA256).unwrap_err();
        assert!(matches!(err, LoadError::ChecksumMismatch { .. }));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = sha256_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
