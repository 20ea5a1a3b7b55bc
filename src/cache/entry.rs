//! Cache entry addressing

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the file holding the digest of the last successful build
pub const DIGEST_FILE: &str = "hash";

/// Suffix appended to the script's file name for the compiled artifact
pub const ARTIFACT_SUFFIX: &str = ".bin";

/// Location of one script's cached state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEntry {
    /// Hex SHA-256 of the canonical script path
    key: String,
    /// `<cache root>/<key>`
    entry_dir: PathBuf,
    /// `<entry_dir>/<script file name>.bin`
    artifact_path: PathBuf,
}

impl CacheEntry {
    pub(crate) fn new(root: &Path, key: String, canonical_path: &str) -> Self {
        let entry_dir = root.join(&key);
        let file_name = Path::new(canonical_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("script");
        let artifact_path = entry_dir.join(format!("{}{}", file_name, ARTIFACT_SUFFIX));

        Self {
            key,
            entry_dir,
            artifact_path,
        }
    }

    /// Entry key (hex digest of the canonical path)
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Directory holding this entry's state
    #[inline]
    pub fn entry_dir(&self) -> &Path {
        &self.entry_dir
    }

    /// Where the compiler writes the executable
    #[inline]
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Path of the persisted digest file
    pub fn digest_file(&self) -> PathBuf {
        self.entry_dir.join(DIGEST_FILE)
    }
}
