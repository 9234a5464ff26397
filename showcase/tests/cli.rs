//! End-to-end runs of the `showcase` binary with piped (unstyled) output.

use assert_cmd::Command;
use predicates::prelude::predicate;

#[test]
fn create_prints_plain_greeting_when_piped() {
    Command::cargo_bin("showcase")
        .expect("binary")
        .args(["create", "Ada"])
        .assert()
        .success()
        .stdout("Hello, Ada!\n");
}

#[test]
fn show_table_prints_rows() {
    Command::cargo_bin("showcase")
        .expect("binary")
        .arg("show-table")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Table"))
        .stdout(predicate::str::contains("│     Bob │ 30  │ San Francisco │"));
}

#[test]
fn create_requires_name() {
    Command::cargo_bin("showcase")
        .expect("binary")
        .arg("create")
        .assert()
        .failure();
}
