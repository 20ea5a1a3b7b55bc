//! CLI integration tests for cscript

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cscript"))
}

fn cscript(home: &std::path::Path) -> Command {
    let mut command = Command::new(binary_path());
    command.env("HOME", home).env_remove("CSCRIPT_LOG");
    command
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    let output = cscript(temp.path())
        .arg("--help")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--cscriptclear"));
    assert!(stdout.contains("--cscriptinfo"));
    assert!(stdout.contains("SCRIPT"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    let output = cscript(temp.path())
        .arg("--version")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cscript"));
}

#[test]
fn test_no_arguments_is_an_error() {
    let temp = TempDir::new().unwrap();
    let output = cscript(temp.path()).output().expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("without any argument"), "stderr: {}", stderr);
}

#[test]
fn test_missing_script_file() {
    let temp = TempDir::new().unwrap();
    let output = cscript(temp.path())
        .arg(temp.path().join("missing.c"))
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.c"), "stderr: {}", stderr);
}

#[test]
fn test_clear_all_on_empty_home() {
    let temp = TempDir::new().unwrap();

    for _ in 0..2 {
        let output = cscript(temp.path())
            .arg("--cscriptclear")
            .output()
            .expect("Failed to run binary");
        assert!(output.status.success());
    }

    assert!(!temp.path().join(".cscript/cache").exists());
}

#[test]
fn test_unset_home_is_an_error() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("s.c");
    std::fs::write(&script, "#!/usr/local/bin/cscript\n").unwrap();

    let output = Command::new(binary_path())
        .env_remove("HOME")
        .arg(&script)
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("HOME is not set"));
}
