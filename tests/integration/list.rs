use predicates::prelude::*;

use crate::common::TestEnvironment;

#[test]
fn test_list_empty() {
    let env = TestEnvironment::new();

    env.grab_command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages installed"));
}

#[test]
fn test_list_installed_packages() {
    let env = TestEnvironment::new();
    env.install_fake("globex", "zap", "v0.1.0");
    env.install_fake("acme", "tool", "v1.0.0");

    let output = env.grab_command().arg("list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("acme/tool"));
    assert!(lines[0].contains("v1.0.0"));
    assert!(lines[1].starts_with("globex/zap"));
}

#[test]
fn test_list_json_format() {
    let env = TestEnvironment::new();
    env.install_fake("acme", "tool", "v1.0.0");

    let output = env.grab_command().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["acme"]["tool"]["version"], "v1.0.0");
}

#[test]
fn test_list_rejects_unknown_format() {
    let env = TestEnvironment::new();

    env.grab_command()
        .args(["list", "--format", "table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
