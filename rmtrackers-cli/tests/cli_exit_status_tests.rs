//! Runs the `rmtrackers` binary and checks exit status and output streams.

use std::fs;
use std::process::{Command, Output};

use rmtrackers_core::torrent::test_fixtures;

fn run_rmtrackers(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rmtrackers"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_input_exits_with_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("missing.torrent");
    let output_dir = temp_dir.path().join("out");

    let output = run_rmtrackers(&[input.as_os_str(), output_dir.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("file does not exist"));
    assert!(output.stdout.is_empty());
    assert!(!output_dir.exists());
}

#[test]
fn test_directory_input_exits_with_failure() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output_dir = temp_dir.path().join("out");

    let output = run_rmtrackers(&[temp_dir.path().as_os_str(), output_dir.as_os_str()]);

    assert!(!output.status.success());
    assert!(!output_dir.exists());
}

#[test]
fn test_successful_edit_exits_cleanly() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("a.torrent");
    fs::write(&input, test_fixtures::single_file_torrent()).unwrap();
    let output_dir = temp_dir.path().join("out");

    let output = run_rmtrackers(&[input.as_os_str(), output_dir.as_os_str()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Name: example.iso"));
    assert!(stdout.contains("Total size: 1048576 bytes"));
    assert!(stdout.contains("Saved modified torrent to:"));
    assert!(output_dir.join("a.torrent").is_file());
}
