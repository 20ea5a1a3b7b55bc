//! Configuration types for cscript

use crate::error::{CscriptError, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Owner read/write/execute only
pub const DEFAULT_DIR_MODE: u32 = 0o700;

/// Compiler used when `CSCRIPT_CC` is not set
pub const DEFAULT_COMPILER: &str = "gcc";

/// Location and permissions of the build cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Directory holding one subdirectory per cached script
    pub root: PathBuf,

    /// Mode applied to directories the cache creates (unix only)
    pub dir_mode: u32,
}

impl CacheConfig {
    /// Cache rooted at an explicit directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dir_mode: DEFAULT_DIR_MODE,
        }
    }

    /// The per-user cache at `<home>/.cscript/cache/`
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(".cscript").join("cache"))
    }

    /// Resolve the per-user cache from the `HOME` environment variable
    pub fn from_home() -> Result<Self> {
        env::var_os("HOME")
            .filter(|value| !value.is_empty())
            .map(|home| Self::for_home(Path::new(&home)))
            .ok_or(CscriptError::HomeNotSet)
    }
}

/// Configuration options for cscript
#[derive(Debug, Clone)]
pub struct Config {
    /// Build cache settings
    pub cache: CacheConfig,

    /// Program invoked to compile scripts (default: gcc)
    pub compiler: String,
}

impl Config {
    /// Build the process configuration from the environment.
    ///
    /// `HOME` locates the cache, `CSCRIPT_CC` optionally replaces the compiler.
    pub fn from_env() -> Result<Self> {
        let compiler = env::var("CSCRIPT_CC")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string());

        Ok(Self {
            cache: CacheConfig::from_home()?,
            compiler,
        })
    }
}
