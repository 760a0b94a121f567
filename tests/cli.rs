use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, TempDir};

fn setup_test_directory() -> TempDir {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::create_dir_all(dir.path().join("node_modules")).unwrap();
    fs::write(
        dir.path().join("node_modules/x.js"),
        "module.exports = 1;",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main").unwrap();
    fs::write(dir.path().join("img.png"), "not really a png").unwrap();

    dir
}

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("code_archive").unwrap();
    // Keep any real ~/.config/code_archive/presets.toml out of the test
    cmd.env("HOME", std::env::temp_dir());
    cmd
}

#[test]
fn test_archives_tree_and_reports_counts() {
    let dir = setup_test_directory();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("project.zip");

    cmd()
        .arg("archive")
        .arg(dir.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive written to"))
        .stdout(predicate::str::contains("files included:  1"))
        .stdout(predicate::str::contains("entries skipped: 3"));

    assert!(out.exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = setup_test_directory();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("never.zip");

    cmd()
        .arg("archive")
        .arg(dir.path())
        .arg("--output")
        .arg(&out)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: no archive written."));

    assert!(!out.exists());
}

#[test]
fn test_verbose_lists_skip_reasons() {
    let dir = setup_test_directory();
    let out_dir = tempdir().unwrap();

    cmd()
        .arg("archive")
        .arg(dir.path())
        .arg("--output")
        .arg(out_dir.path().join("v.zip"))
        .arg("--dry-run")
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped entries:"))
        .stdout(predicate::str::contains("(hidden)"))
        .stdout(predicate::str::contains("(binary)"));
}

#[test]
fn test_invalid_pattern_is_fatal() {
    let dir = setup_test_directory();

    cmd()
        .arg("archive")
        .arg(dir.path())
        .arg("--dry-run")
        .arg("-e")
        .arg("(unclosed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("pattern 0"));
}

#[test]
fn test_missing_source_is_fatal() {
    cmd()
        .arg("archive")
        .arg("/no/such/directory")
        .arg("--dry-run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot access source path"));
}

#[test]
fn test_missing_override_file_is_fatal() {
    let dir = setup_test_directory();

    cmd()
        .arg("archive")
        .arg(dir.path())
        .arg("--dry-run")
        .arg("--rules")
        .arg("/no/such/rules.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("override file"));
}
