//! cscript - run C source files like scripts
//!
//! A script is compiled on first use and cached under `~/.cscript/cache/`,
//! keyed by its canonical path. Later runs reuse the binary for as long as
//! the SHA-256 of the script's content is unchanged.

mod cache;
mod cli;
mod config;
mod core;
mod error;
mod script;

use cache::{CacheEntry, ContentCache};
use cli::{Action, Cli};
use config::Config;
use error::Result;
use script::{runner, Compiler, ScriptFile};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Exit code for errors raised by cscript itself
const ERROR_EXIT_CODE: u8 = 2;

/// Snapshot printed by `--cscriptinfo`
#[derive(Serialize)]
struct ScriptInfo<'a> {
    script: &'a ScriptFile,
    cache_root: &'a Path,
    entry: &'a CacheEntry,
    stored_digest: Option<String>,
    fresh: bool,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr so the script owns stdout
    let filter = EnvFilter::try_from_env("CSCRIPT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Cli::parse_action().and_then(execute);

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(ERROR_EXIT_CODE)
        }
    }
}

/// Carry out one invocation and return the process exit code
fn execute(action: Action) -> Result<u8> {
    let config = Config::from_env()?;
    let cache = ContentCache::new(&config.cache)?;

    match action {
        Action::ClearAll => {
            eprintln!("Clearing complete cscript cache: {}", cache.root().display());
            cache.clear_all()?;
            Ok(0)
        }
        Action::ClearScript(path) => {
            let script = ScriptFile::open(&path)?;
            let entry = cache.resolve_entry(script.file_path());
            eprintln!(
                "Clearing cscript cache for '{}': {}",
                script.file_name(),
                entry.entry_dir().display()
            );
            cache.clear_entry(&entry)?;
            Ok(0)
        }
        Action::Info(path) => {
            let script = ScriptFile::open(&path)?;
            let entry = cache.resolve_entry(script.file_path());
            let stored_digest = cache.stored_digest(&entry);
            let info = ScriptInfo {
                fresh: stored_digest.as_deref() == Some(script.digest()),
                script: &script,
                cache_root: cache.root(),
                entry: &entry,
                stored_digest,
            };
            let json = serde_json::to_string_pretty(&info)
                .map_err(|e| error::CscriptError::io(&path, e.into()))?;
            println!("{}", json);
            Ok(0)
        }
        Action::Run { script, args } => {
            let script = ScriptFile::open(&script)?;
            let entry = cache.resolve_entry(script.file_path());

            if !cache.check_fresh(&entry, script.digest())? {
                if let Err(e) = Compiler::new(&config.compiler).compile(&script, &entry) {
                    // The failed build may have replaced the previous artifact
                    if let Err(clear_err) = cache.clear_entry(&entry) {
                        warn!("could not clear cache entry after failed build: {}", clear_err);
                    }
                    return Err(e);
                }
                cache.record_built(&entry, script.digest())?;
            }

            let code = runner::run(&entry, &args)?;
            Ok(u8::try_from(code).unwrap_or(1))
        }
    }
}
