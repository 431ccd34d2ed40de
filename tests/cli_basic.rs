//! Integration tests for basic CLI behavior.
//!
//! Tests that the binary exists, accepts standard flags, and each subcommand
//! handles good and bad input with the right exit status.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::*;

/// Helper: get a Command for the `tablift` binary.
fn tablift() -> Command {
    let mut cmd = Command::cargo_bin("tablift").expect("binary 'tablift' should be built");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─── Top-level flags ─────────────────────────────────────────────────────────

#[test]
fn help_flag_shows_usage() {
    tablift()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: tablift"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn version_flag_shows_semver() {
    tablift()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^tablift \d+\.\d+\.\d+\n$").unwrap());
}

#[test]
fn no_args_shows_error_and_usage() {
    tablift()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn extract_help_lists_format() {
    tablift()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--tolerance"));
}

// ─── Subcommands ─────────────────────────────────────────────────────────────

#[test]
fn show_prints_markdown_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_layout(dir.path(), "grid.json", &document(vec![bordered_page()]));
    tablift()
        .args(["show", path.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Table_1_Page_1"))
        .stdout(predicate::str::contains("| Name | Qty | Price |"))
        .stdout(predicate::str::contains("| Banana | 7 | 0.25 |"));
}

#[test]
fn extract_writes_artifact() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let path = write_layout(input.path(), "mixed.json", &document(vec![mixed_page()]));
    tablift()
        .arg("extract")
        .arg(&path)
        .arg(output.path())
        .args(["--format", "markdown", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mixed_tables.md"));
    assert!(output.path().join("mixed_tables.md").exists());
}

#[test]
fn extract_without_tables_succeeds() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let path = write_layout(input.path(), "prose.json", &document(vec![prose_page()]));
    tablift()
        .arg("extract")
        .arg(&path)
        .arg(output.path())
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::contains("No tables found"));
    assert!(!output.path().join("prose_tables.json").exists());
}

#[test]
fn extract_missing_file_fails() {
    let output = tempfile::tempdir().unwrap();
    tablift()
        .args(["extract", "/nonexistent/report.json"])
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("report.json"));
}

#[test]
fn unknown_format_is_rejected() {
    tablift()
        .args(["extract", "in.json", "out", "--format", "xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xlsx"));
}

#[test]
fn invalid_tolerance_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_layout(dir.path(), "grid.json", &document(vec![bordered_page()]));
    tablift()
        .args(["show", path.to_str().unwrap(), "--tolerance=-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance"));
}

#[test]
fn batch_reports_each_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_layout(input.path(), "grid.json", &document(vec![bordered_page()]));
    std::fs::write(input.path().join("broken.json"), b"not json").unwrap();
    tablift()
        .arg("batch")
        .arg(input.path())
        .arg(output.path())
        .args(["--workers", "2", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("broken.json"))
        .stdout(predicate::str::contains("grid.json"))
        .stderr(predicate::str::contains("1/2 succeeded"));
}

#[test]
fn batch_on_missing_dir_fails() {
    let output = tempfile::tempdir().unwrap();
    tablift()
        .args(["batch", "/nonexistent/dir"])
        .arg(output.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
