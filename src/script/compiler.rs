//! External compiler invocation

use crate::cache::CacheEntry;
use crate::error::{CscriptError, Result};
use crate::script::ScriptFile;
use std::io::Write;
use std::process::Command;
use tracing::{debug, info};

/// Compiles scripts into their cache entry
#[derive(Debug, Clone)]
pub struct Compiler {
    program: String,
}

impl Compiler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the script's executable at the entry's artifact path
    ///
    /// The C body is written to a temporary `.c` file which is removed
    /// afterwards, whether or not compilation succeeds.
    pub fn compile(&self, script: &ScriptFile, entry: &CacheEntry) -> Result<()> {
        let compile_error = |reason: String| CscriptError::Compile {
            script: script.file_name().to_string(),
            reason,
        };

        let mut source = tempfile::Builder::new()
            .prefix(script.file_name())
            .suffix(".c")
            .tempfile()
            .map_err(|e| compile_error(format!("cannot create temporary source: {}", e)))?;
        let written = script
            .extract_source(&mut source)
            .and_then(|_| source.flush());
        written.map_err(|e| CscriptError::io(source.path(), e))?;

        let mut command = Command::new(&self.program);
        command
            .args(script.compiler_args())
            .arg("-o")
            .arg(entry.artifact_path())
            .arg(source.path());
        debug!(?command, "invoking compiler");

        let status = command
            .status()
            .map_err(|e| compile_error(format!("cannot run '{}': {}", self.program, e)))?;

        if !status.success() {
            return Err(compile_error(format!("{} exited with {}", self.program, status)));
        }

        info!(script = script.file_path(), artifact = %entry.artifact_path().display(), "compiled");
        Ok(())
    }
}
