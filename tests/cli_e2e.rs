//! End-to-end CLI tests for the bibmerge binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge bibliographic reference exports"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bibmerge"));
}

/// Test that invoking without a subcommand fails with usage output.
#[test]
fn test_binary_without_subcommand_fails() {
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// Test that a missing source file exits non-zero and names the file.
#[test]
fn test_standardize_missing_source_reports_path() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.arg("standardize")
        .arg(temp.path().join("absent.bib"))
        .arg("-o")
        .arg(temp.path().join("out.bib"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.bib"));
}

/// Test that dedupe refuses to run without --against.
#[test]
fn test_dedupe_requires_against_flag() {
    let mut cmd = Command::cargo_bin("bibmerge").unwrap();
    cmd.args(["dedupe", "x.bib", "-o", "out.bib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--against"));
}

/// Drive the full pipeline through the binary: standardize two database
/// exports, dedupe one against the other, export the survivor to CSV.
#[test]
fn test_pipeline_through_binary() {
    let temp = TempDir::new().unwrap();
    let a_raw = temp.path().join("a.bib");
    let b_raw = temp.path().join("b.bib");
    fs::write(
        &a_raw,
        "@article{a_dup, title={Dup}, doi={10.1234/shared}}\n@article{a_unique, title={Unique}, doi={10.1234/only-a}}\n",
    )
    .unwrap();
    fs::write(
        &b_raw,
        "@article{b1, title={Other}, doi={https://doi.org/10.1234/SHARED}}\n",
    )
    .unwrap();

    let a_std = temp.path().join("standardized/a.bib");
    let b_std = temp.path().join("standardized/b.bib");
    for (raw, std_path) in [(&a_raw, &a_std), (&b_raw, &b_std)] {
        Command::cargo_bin("bibmerge")
            .unwrap()
            .arg("-q")
            .arg("standardize")
            .arg(raw)
            .arg("-o")
            .arg(std_path)
            .assert()
            .success();
    }

    let filtered = temp.path().join("processed/a_unique.bib");
    Command::cargo_bin("bibmerge")
        .unwrap()
        .arg("-q")
        .arg("dedupe")
        .arg(&a_std)
        .arg("--against")
        .arg(&b_std)
        .arg("-o")
        .arg(&filtered)
        .assert()
        .success();

    let filtered_text = fs::read_to_string(&filtered).unwrap();
    assert!(!filtered_text.contains("a_dup"), "shared DOI should be removed");
    assert!(filtered_text.contains("a_unique"));

    let csv_path = temp.path().join("csv/a_unique.csv");
    Command::cargo_bin("bibmerge")
        .unwrap()
        .arg("-q")
        .arg("export")
        .arg(&filtered)
        .arg("-o")
        .arg(&csv_path)
        .assert()
        .success();

    let csv_text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = csv_text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"type title\""));
    assert!(lines[1].contains("\"10.1234/only-a\""));
}
