//! Cache storage implementation

use crate::cache::entry::CacheEntry;
use crate::config::CacheConfig;
use crate::core::digest_of_string;
use crate::error::{CscriptError, Result};
use std::fs::{self, DirBuilder, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build cache rooted at a single directory
#[derive(Debug)]
pub struct ContentCache {
    /// Directory holding one subdirectory per script
    root: PathBuf,
    /// Mode for directories created by the cache
    dir_mode: u32,
}

impl ContentCache {
    /// Open the cache described by `config`, creating its root if needed
    ///
    /// # Returns
    /// A ContentCache instance, or a filesystem error if the root cannot be created
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let cache = Self {
            root: config.root.clone(),
            dir_mode: config.dir_mode,
        };
        cache.ensure_root()?;
        debug!(root = %cache.root.display(), "cache initialized");
        Ok(cache)
    }

    /// Cache root directory
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root and any missing ancestors. Succeeds if it already exists.
    pub fn ensure_root(&self) -> Result<()> {
        self.create_dir_all(&self.root)
    }

    /// Map a canonical script path to its cache entry. Touches nothing on disk.
    pub fn resolve_entry(&self, canonical_path: &str) -> CacheEntry {
        let key = digest_of_string(canonical_path);
        let entry = CacheEntry::new(&self.root, key, canonical_path);
        debug!(path = canonical_path, key = entry.key(), "resolved cache entry");
        entry
    }

    /// Whether the entry holds a build of exactly `current_digest`
    ///
    /// A missing entry directory is created (empty) and reported as stale.
    /// A missing or unreadable digest file is stale as well; only a failure
    /// to create the entry directory is an error.
    pub fn check_fresh(&self, entry: &CacheEntry, current_digest: &str) -> Result<bool> {
        if !entry.entry_dir().is_dir() {
            self.create_dir_all(entry.entry_dir())?;
            debug!(entry = %entry.entry_dir().display(), "new cache entry");
            return Ok(false);
        }

        let Some(stored) = read_first_line(&entry.digest_file()) else {
            debug!(entry = %entry.entry_dir().display(), "no stored digest");
            return Ok(false);
        };

        let fresh = stored == current_digest.as_bytes();
        debug!(
            stored = %String::from_utf8_lossy(&stored),
            current = current_digest,
            fresh,
            "compared digests"
        );
        Ok(fresh)
    }

    /// Persist `digest` as the content the entry's artifact was built from
    ///
    /// The digest file is truncated and rewritten.
    pub fn record_built(&self, entry: &CacheEntry, digest: &str) -> Result<()> {
        self.create_dir_all(entry.entry_dir())?;

        let digest_file = entry.digest_file();
        fs::write(&digest_file, digest).map_err(|e| CscriptError::io(&digest_file, e))?;
        debug!(file = %digest_file.display(), "wrote digest file");
        Ok(())
    }

    /// Stored digest of the entry, if any. Read-only.
    pub fn stored_digest(&self, entry: &CacheEntry) -> Option<String> {
        read_first_line(&entry.digest_file()).and_then(|line| String::from_utf8(line).ok())
    }

    /// Remove one entry and everything in it
    pub fn clear_entry(&self, entry: &CacheEntry) -> Result<()> {
        remove_tree(entry.entry_dir())
    }

    /// Remove the whole cache root
    pub fn clear_all(&self) -> Result<()> {
        remove_tree(&self.root)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.dir_mode);
        }
        builder
            .create(path)
            .map_err(|e| CscriptError::filesystem(path, e))
    }
}

/// First line of a file including its `\n`, or None if absent, empty or unreadable
fn read_first_line(path: &Path) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut line = Vec::new();
    match reader.read_until(b'\n', &mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Recursively delete `path`; an absent path is not an error
fn remove_tree(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed cache tree");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CscriptError::filesystem(path, e)),
    }
}
