use predicates::prelude::*;

use crate::common::TestEnvironment;

#[test]
fn test_update_not_installed_hints_install() {
    let env = TestEnvironment::new();

    env.grab_command()
        .args(["update", "acme", "tool"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/tool is not installed"))
        .stdout(predicate::str::contains("grab install acme tool"));
}

#[test]
fn test_update_to_installed_version_is_noop() {
    let env = TestEnvironment::new();
    let tool = env.install_fake("acme", "tool", "v1.0.0");
    let before = env.read_state().unwrap();

    env.grab_command()
        .args(["update", "acme", "tool", "v1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/tool v1.0.0 already installed"));

    assert!(tool.exists());
    assert_eq!(env.read_state().unwrap(), before);
}
