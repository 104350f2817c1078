// ABOUTME: End-to-end tests for the mica binary's script mode and flags

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Get the path to the mica binary
fn mica_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mica"))
}

/// Write a script to a temp file that lives for the duration of the test
fn script_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp script");
    file.write_all(source.as_bytes())
        .expect("Failed to write temp script");
    file
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::new(mica_bin());
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("mica"));
}

#[test]
fn test_clean_script_runs_silently() {
    let script = script_file("let a = [1, 2, 3]; let b = append(a, 4); len(b);");

    let mut cmd = Command::new(mica_bin());
    cmd.arg(script.path());

    cmd.assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_runtime_error_is_printed() {
    let script = script_file("let a = 1; a + missing;");

    let mut cmd = Command::new(mica_bin());
    cmd.arg(script.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Error: identifier not found: missing"));
}

#[test]
fn test_parser_errors_print_one_per_line() {
    let script = script_file("let x 5; let y 6;");

    let mut cmd = Command::new(mica_bin());
    cmd.arg(script.path());

    cmd.assert().success().stdout(
        predicate::str::contains("expected next token to be ASSIGN, got INT instead.")
            .and(predicate::str::contains("\n")),
    );
}

#[test]
fn test_parser_errors_suppress_evaluation() {
    // the undefined identifier would raise at runtime; the parse error
    // must stop the script before evaluation
    let script = script_file("let x 5; missing;");

    let mut cmd = Command::new(mica_bin());
    cmd.arg(script.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("identifier not found").not());
}

#[test]
fn test_missing_file_reports_and_fails() {
    let mut cmd = Command::new(mica_bin());
    cmd.arg("no_such_script.mica");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Could not open file: no_such_script.mica"));
}
