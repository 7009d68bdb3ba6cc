use predicates::prelude::*;
use std::fs;

use crate::common::TestEnvironment;

/// First run creates the base directory, bin/ and an empty state document
#[test]
fn test_first_run_bootstraps_layout() {
    let env = TestEnvironment::new();
    assert!(!env.base_dir().exists());

    env.grab_command().arg("list").assert().success();

    assert!(env.bin_dir().is_dir());
    assert_eq!(fs::read_to_string(env.state_file()).unwrap(), "{}");
}

#[test]
fn test_grab_home_selects_base_dir() {
    let env = TestEnvironment::new();
    let home = env.base_dir().with_file_name("from-env");

    let mut cmd = assert_cmd::Command::cargo_bin("grab").unwrap();
    cmd.env("GRAB_HOME", &home).env_remove("RUST_LOG").arg("list").assert().success();

    assert!(home.join("grab_state.json").is_file());
}

#[test]
fn test_malformed_settings_file_fails() {
    let env = TestEnvironment::new();
    env.write_settings("releases_per_page = \"lots\"\n");

    env.grab_command()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"))
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_unknown_settings_key_fails() {
    let env = TestEnvironment::new();
    env.write_settings("per_page = 10\n");

    env.grab_command().arg("list").assert().failure();
}

#[test]
fn test_corrupt_state_file_fails() {
    let env = TestEnvironment::new();
    fs::create_dir_all(env.base_dir()).unwrap();
    fs::write(env.state_file(), "[1, 2").unwrap();

    env.grab_command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("is invalid"));
}
