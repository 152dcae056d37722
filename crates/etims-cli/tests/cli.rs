//! CLI smoke tests.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("etims")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("text"));
}

#[test]
fn process_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("etims")
        .unwrap()
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure();
}
