//! Execution of compiled scripts

use crate::cache::CacheEntry;
use crate::error::{CscriptError, Result};
use std::ffi::OsString;
use std::process::Command;
use tracing::debug;

/// Exit code reported when the script was terminated by a signal
const SIGNALED_EXIT_CODE: i32 = 1;

/// Run the entry's artifact with `args` and wait for it
///
/// Arguments are passed through verbatim, without a shell. Returns the
/// script's exit code.
pub fn run(entry: &CacheEntry, args: &[OsString]) -> Result<i32> {
    let artifact = entry.artifact_path();
    debug!(artifact = %artifact.display(), ?args, "executing script");

    let status = Command::new(artifact)
        .args(args)
        .status()
        .map_err(|e| CscriptError::Execute {
            path: artifact.to_path_buf(),
            source: e,
        })?;

    let code = status.code().unwrap_or(SIGNALED_EXIT_CODE);
    debug!(code, "script finished");
    Ok(code)
}
