use predicates::prelude::*;

use crate::common::TestEnvironment;

#[test]
fn test_help_lists_commands() {
    let env = TestEnvironment::new();

    env.grab_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_version_flag() {
    let env = TestEnvironment::new();

    env.grab_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_install_requires_owner_and_repo() {
    let env = TestEnvironment::new();

    env.grab_command()
        .args(["install", "acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<REPO>"));
}

#[test]
fn test_remove_rejects_version_argument() {
    let env = TestEnvironment::new();

    env.grab_command().args(["remove", "acme", "tool", "v1.0.0"]).assert().failure();
}
