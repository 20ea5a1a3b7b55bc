//! Digest value and convenience hashing helpers

use crate::core::sha256::{Sha256, DIGEST_LEN};
use crate::error::{CscriptError, Result};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read buffer size used when streaming files through the hasher
const READ_CHUNK: usize = 8 * 1024;

/// A 32-byte SHA-256 digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Wrap raw digest bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    #[cfg(test)]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Canonical 64-character lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hex digest of the UTF-8 bytes of a string
pub fn digest_of_string(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().to_hex()
}

/// Hex digest of a file's contents, streamed in chunks
///
/// Every chunk hashed is also written to `copy`, so a caller that needs the
/// bytes gets exactly the content the digest was taken from. Pass
/// [`io::sink`] when only the digest matters.
///
/// # Arguments
/// * `path` - The file to hash
/// * `copy` - Receives the bytes as they are hashed
///
/// # Returns
/// The lowercase hex digest, or an I/O error if the file cannot be opened or read
pub fn digest_of_file_contents<W: Write>(path: &Path, mut copy: W) -> Result<String> {
    let mut file = File::open(path).map_err(|e| CscriptError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; READ_CHUNK];

    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CscriptError::io(path, e)),
        };
        hasher.update(&buf[..n]);
        copy.write_all(&buf[..n]).map_err(|e| CscriptError::io(path, e))?;
    }

    Ok(hasher.finalize().to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_digest_of_string_known_vector() {
        assert_eq!(
            digest_of_string("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_is_lowercase_and_64_chars() {
        let hex = digest_of_string("/home/alice/scripts/hello.c");
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_display_matches_to_hex() {
        let mut hasher = Sha256::new();
        hasher.update(b"abc");
        let digest = hasher.finalize();
        assert_eq!(digest.to_string(), digest.to_hex());
        assert_eq!(digest.as_bytes()[0], 0xba);
    }

    #[test]
    fn test_file_digest_matches_string_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("script.c");
        // Larger than one read chunk so the streaming path is exercised
        let content = "#!/usr/local/bin/cscript\nint x;\n".repeat(600);
        std::fs::write(&path, &content).unwrap();

        assert_eq!(
            digest_of_file_contents(&path, io::sink()).unwrap(),
            digest_of_string(&content)
        );
    }

    #[test]
    fn test_file_digest_copies_the_hashed_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("script.c");
        let content = "#!/usr/local/bin/cscript\nint y;\n".repeat(700);
        std::fs::write(&path, &content).unwrap();

        let mut copy = Vec::new();
        let digest = digest_of_file_contents(&path, &mut copy).unwrap();

        assert_eq!(copy, content.as_bytes());
        assert_eq!(digest, digest_of_string(&content));
    }

    #[test]
    fn test_empty_file_digest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.c");
        std::fs::write(&path, "").unwrap();

        assert_eq!(
            digest_of_file_contents(&path, io::sink()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = digest_of_file_contents(&temp.path().join("missing.c"), io::sink());
        assert!(matches!(result, Err(CscriptError::Io { .. })));
    }
}
