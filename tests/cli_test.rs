//! Integration tests for CLI argument parsing.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("pystrap").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bootstrap a pinned Python runtime"));
}

#[test]
fn cli_shows_version() {
    let mut cmd = Command::cargo_bin("pystrap").unwrap();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_rejects_unknown_flags() {
    let mut cmd = Command::cargo_bin("pystrap").unwrap();
    cmd.arg("--frobnicate");
    cmd.assert().failure();
}

#[test]
fn cli_rejects_conflicting_verbosity_flags() {
    let mut cmd = Command::cargo_bin("pystrap").unwrap();
    cmd.args(["--verbose", "--quiet"]);
    cmd.assert().failure();
}
