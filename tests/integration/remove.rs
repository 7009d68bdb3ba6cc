use predicates::prelude::*;
use std::fs;

use crate::common::TestEnvironment;

#[test]
fn test_remove_not_installed_succeeds() {
    let env = TestEnvironment::new();

    env.grab_command()
        .args(["remove", "acme", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/tool is not installed"));

    assert_eq!(fs::read_to_string(env.state_file()).unwrap(), "{}");
}

#[test]
fn test_remove_keeps_siblings() {
    let env = TestEnvironment::new();
    let tool = env.install_fake("acme", "tool", "v1.0.0");
    let other = env.install_fake("acme", "other", "v2.0.0");
    let zap = env.install_fake("globex", "zap", "v0.1.0");

    env.grab_command()
        .args(["remove", "acme", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed acme/tool v1.0.0"));

    assert!(!tool.exists());
    assert!(other.exists());
    assert!(zap.exists());

    let state = env.read_state().unwrap();
    assert!(state["acme"].get("tool").is_none());
    assert_eq!(state["acme"]["other"]["version"], "v2.0.0");
    assert_eq!(state["globex"]["zap"]["version"], "v0.1.0");
}

#[test]
fn test_remove_last_package_of_owner() {
    let env = TestEnvironment::new();
    env.install_fake("acme", "tool", "v1.0.0");

    env.grab_command().args(["remove", "acme", "tool"]).assert().success();

    assert_eq!(env.read_state().unwrap(), serde_json::json!({}));
}

#[test]
fn test_remove_quiet_prints_nothing() {
    let env = TestEnvironment::new();
    env.install_fake("acme", "tool", "v1.0.0");

    env.grab_command()
        .args(["--quiet", "remove", "acme", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_failed_delete_keeps_state() {
    let env = TestEnvironment::new();
    let tool = env.install_fake("acme", "tool", "v1.0.0");
    // Replace the binary with a non-empty directory so the delete fails
    fs::remove_file(&tool).unwrap();
    fs::create_dir_all(tool.join("nested")).unwrap();

    env.grab_command()
        .args(["remove", "acme", "tool"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to delete"));

    let state = env.read_state().unwrap();
    assert_eq!(state["acme"]["tool"]["version"], "v1.0.0");
}
