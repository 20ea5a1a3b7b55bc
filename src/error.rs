//! Error types for cscript

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cscript operations
pub type Result<T> = std::result::Result<T, CscriptError>;

/// Error types for cscript operations
#[derive(Error, Debug)]
pub enum CscriptError {
    /// A required file could not be opened, read or written
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required directory could not be created or removed
    #[error("Filesystem error at '{}': {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The cache root cannot be derived without a home directory
    #[error("Cannot locate the cache directory: HOME is not set")]
    HomeNotSet,

    /// Cache keys are derived from the textual path
    #[error("Path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path { path: PathBuf },

    /// The first line of a script is not a shebang line
    #[error("Wrong format in line 1 of '{}': {line}", path.display())]
    ScriptFormat { path: PathBuf, line: String },

    /// The compiler could not be started or rejected the script
    #[error("Failed compiling '{script}': {reason}")]
    Compile { script: String, reason: String },

    /// The compiled script could not be started
    #[error("Failed executing '{}': {source}", path.display())]
    Execute {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Nothing to run
    #[error("cscript called without any argument")]
    MissingScript,
}

impl CscriptError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_error_display() {
        let err = CscriptError::io("/tmp/x/hash", Error::new(ErrorKind::NotFound, "gone"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("/tmp/x/hash"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_filesystem_error_display() {
        let err = CscriptError::filesystem(
            "/root/.cscript/cache",
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("Filesystem error at '/root/.cscript/cache'"));
    }

    #[test]
    fn test_script_format_display() {
        let err = CscriptError::ScriptFormat {
            path: PathBuf::from("hello.c"),
            line: "int main() {".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 1"));
        assert!(msg.contains("int main() {"));
    }
}
