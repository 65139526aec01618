use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    Command::cargo_bin("check-sourcemaps")
        .expect("Failed to find binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--nobuild"))
        .stdout(predicate::str::contains("--keep-going"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("check-sourcemaps")
        .expect("Failed to find binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_for_bash() {
    Command::cargo_bin("check-sourcemaps")
        .expect("Failed to find binary")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("check-sourcemaps"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    Command::cargo_bin("check-sourcemaps")
        .expect("Failed to find binary")
        .args(["--nobuild", "--verbose", "--quiet"])
        .assert()
        .failure();
}
