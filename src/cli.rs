//! CLI argument parsing using clap
//!
//! Only the arguments up to the script path belong to cscript. Everything
//! after it is handed to the script unchanged, except a `--cscriptclear` or
//! `--cscriptinfo` directly following the path.

use crate::error::{CscriptError, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::warn;

const CLEAR_FLAG: &str = "--cscriptclear";
const INFO_FLAG: &str = "--cscriptinfo";

/// Run C source files like scripts
#[derive(Parser, Debug)]
#[command(name = "cscript")]
#[command(version)]
#[command(
    about = "Run C source files like scripts, compiling them once into a cache",
    long_about = "Run C source files like scripts.\n\n\
        Start a C file with a shebang line pointing at cscript and, optionally, a \
        second line `#gcc <flags>` with extra compiler flags. The script is compiled \
        on first use and whenever its content changes; otherwise the cached binary \
        under ~/.cscript/cache/ is run directly.\n\n\
        Set CSCRIPT_LOG (e.g. `debug`) for diagnostics and CSCRIPT_CC to use another compiler.",
    override_usage = "cscript [OPTIONS] <SCRIPT> [ARGS]...\n       cscript --cscriptclear",
    after_help = "Arguments after SCRIPT are passed to the script unchanged."
)]
pub struct Cli {
    /// Clear the whole cache when given first, one script's entry when given after it
    #[arg(long = "cscriptclear")]
    pub clear: bool,

    /// Print the script's cache information as JSON instead of running it
    #[arg(long = "cscriptinfo", requires = "script")]
    pub info: bool,

    /// Script file to run
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove the whole cache
    ClearAll,
    /// Remove one script's cache entry
    ClearScript(PathBuf),
    /// Dump script and cache state
    Info(PathBuf),
    /// Build if needed, then run
    Run {
        script: PathBuf,
        args: Vec<OsString>,
    },
}

/// Command line split at the script path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitArgs {
    /// Program name, cscript's own options, the script path and a trailing cscript flag
    pub own: Vec<OsString>,
    /// Arguments belonging to the script
    pub script_args: Vec<OsString>,
}

/// Separate cscript's arguments from the script's
///
/// Options before the first positional argument are cscript's. The first
/// positional is the script. A leading `--cscriptclear` ends cscript's part
/// at once, so whatever follows it is ignored.
pub fn split_args<I, T>(argv: I) -> SplitArgs
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut argv = argv.into_iter().map(Into::into);
    let mut own: Vec<OsString> = argv.next().into_iter().collect();

    for arg in argv.by_ref() {
        let (is_option, is_clear) = match arg.to_str() {
            Some(s) => (s.starts_with('-') && s != "-", s == CLEAR_FLAG),
            None => (false, false),
        };
        let leading_clear = is_clear && own.len() == 1;
        own.push(arg);
        if leading_clear || !is_option {
            break;
        }
    }

    let mut script_args: Vec<OsString> = argv.collect();
    let trailing_flag = script_args
        .first()
        .and_then(|a| a.to_str())
        .map_or(false, |a| a == CLEAR_FLAG || a == INFO_FLAG);
    if trailing_flag && !own.iter().skip(1).any(|a| a == CLEAR_FLAG) {
        own.push(script_args.remove(0));
    }

    SplitArgs { own, script_args }
}

impl Cli {
    /// Parse the process arguments into an action
    ///
    /// Help, version and usage errors for cscript's own part exit the process
    /// the way clap always does.
    pub fn parse_action() -> Result<Action> {
        Self::action_from(std::env::args_os())
    }

    /// Same as [`Cli::parse_action`] for an explicit argument list
    pub fn action_from<I, T>(argv: I) -> Result<Action>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let split = split_args(argv);
        Self::parse_from(split.own).into_action(split.script_args)
    }

    /// Interpret the parsed arguments together with the script's own
    pub fn into_action(self, script_args: Vec<OsString>) -> Result<Action> {
        let action = match (self.script, self.clear, self.info) {
            (None, true, _) => return Ok(Action::ClearAll),
            (None, false, _) => return Err(CscriptError::MissingScript),
            (Some(script), true, _) => Action::ClearScript(script),
            (Some(script), false, true) => Action::Info(script),
            (Some(script), false, false) => {
                return Ok(Action::Run {
                    script,
                    args: script_args,
                })
            }
        };

        if !script_args.is_empty() {
            warn!(ignored = ?script_args, "arguments after a cscript flag are ignored");
        }
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn action(args: &[&str]) -> Result<Action> {
        Cli::action_from(args)
    }

    fn run(script: &str, args: &[&str]) -> Action {
        Action::Run {
            script: PathBuf::from(script),
            args: args.iter().map(OsString::from).collect(),
        }
    }

    #[test]
    fn test_cli_clear_all() {
        assert_eq!(action(&["cscript", "--cscriptclear"]).unwrap(), Action::ClearAll);
    }

    #[test]
    fn test_cli_leading_clear_ignores_the_rest() {
        assert_eq!(
            action(&["cscript", "--cscriptclear", "hello.c", "x"]).unwrap(),
            Action::ClearAll
        );
    }

    #[test]
    fn test_cli_clear_single_script() {
        assert_eq!(
            action(&["cscript", "hello.c", "--cscriptclear"]).unwrap(),
            Action::ClearScript(PathBuf::from("hello.c"))
        );
    }

    #[test]
    fn test_cli_info() {
        assert_eq!(
            action(&["cscript", "hello.c", "--cscriptinfo"]).unwrap(),
            Action::Info(PathBuf::from("hello.c"))
        );
        assert_eq!(
            action(&["cscript", "--cscriptinfo", "hello.c"]).unwrap(),
            Action::Info(PathBuf::from("hello.c"))
        );
    }

    #[test]
    fn test_cli_run_without_args() {
        assert_eq!(
            action(&["cscript", "/usr/local/scripts/hello.c"]).unwrap(),
            run("/usr/local/scripts/hello.c", &[])
        );
    }

    #[test]
    fn test_cli_run_forwards_trailing_args() {
        assert_eq!(
            action(&["cscript", "hello.c", "alpha", "-x", "--verbose", "beta"]).unwrap(),
            run("hello.c", &["alpha", "-x", "--verbose", "beta"])
        );
    }

    #[test]
    fn test_cli_help_and_version_after_script_belong_to_script() {
        for flag in ["--help", "-h", "--version", "-V"] {
            assert_eq!(
                action(&["cscript", "hello.c", flag]).unwrap(),
                run("hello.c", &[flag])
            );
        }
    }

    #[test]
    fn test_cli_double_dash_is_kept_for_script() {
        assert_eq!(
            action(&["cscript", "hello.c", "--", "x"]).unwrap(),
            run("hello.c", &["--", "x"])
        );
    }

    #[test]
    fn test_cli_cscript_flags_later_on_belong_to_script() {
        assert_eq!(
            action(&["cscript", "hello.c", "a", "--cscriptclear", "--cscriptinfo"]).unwrap(),
            run("hello.c", &["a", "--cscriptclear", "--cscriptinfo"])
        );
    }

    #[test]
    fn test_split_args() {
        let split = split_args(["cscript", "hello.c", "--cscriptinfo", "x"]);
        assert_eq!(split.own, vec!["cscript", "hello.c", "--cscriptinfo"]);
        assert_eq!(split.script_args, vec!["x"]);

        let split = split_args(["cscript", "--help"]);
        assert_eq!(split.own, vec!["cscript", "--help"]);
        assert!(split.script_args.is_empty());
    }

    #[test]
    fn test_cli_missing_script() {
        assert!(matches!(
            action(&["cscript"]),
            Err(CscriptError::MissingScript)
        ));
    }
}
