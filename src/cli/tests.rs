//! Argument parsing and configuration building tests for the CLI.

use super::*;
use clap::Parser;

#[test]
fn test_cli_parsing() {
    let cli = Cli::try_parse_from(["grab", "--help"]);
    assert!(cli.is_err()); // --help causes a special error

    let cli = Cli::try_parse_from(["grab", "list"]);
    assert!(cli.is_ok());
}

#[test]
fn test_install_arity() {
    assert!(Cli::try_parse_from(["grab", "install", "acme"]).is_err());
    assert!(Cli::try_parse_from(["grab", "install", "acme", "tool"]).is_ok());
    assert!(Cli::try_parse_from(["grab", "install", "acme", "tool", "v1.0.0"]).is_ok());
    assert!(Cli::try_parse_from(["grab", "install", "acme", "tool", "v1.0.0", "extra"]).is_err());
}

#[test]
fn test_update_arity() {
    assert!(Cli::try_parse_from(["grab", "update", "acme"]).is_err());
    assert!(Cli::try_parse_from(["grab", "update", "acme", "tool", "v2"]).is_ok());
    assert!(Cli::try_parse_from(["grab", "update", "acme", "tool", "v2", "v3"]).is_err());
}

#[test]
fn test_remove_arity() {
    assert!(Cli::try_parse_from(["grab", "remove", "acme"]).is_err());
    assert!(Cli::try_parse_from(["grab", "remove", "acme", "tool"]).is_ok());
    assert!(Cli::try_parse_from(["grab", "remove", "acme", "tool", "v1.0.0"]).is_err());
}

#[test]
fn test_verbose_and_quiet_conflict() {
    assert!(Cli::try_parse_from(["grab", "--verbose", "--quiet", "list"]).is_err());
}

#[test]
fn test_build_config_log_levels() {
    let cli = Cli::try_parse_from(["grab", "--verbose", "list"]).unwrap();
    assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));

    let cli = Cli::try_parse_from(["grab", "list", "--quiet"]).unwrap();
    let config = cli.build_config();
    assert_eq!(config.log_level.as_deref(), Some("error"));
    assert!(config.quiet);

    let cli = Cli::try_parse_from(["grab", "list"]).unwrap();
    assert_eq!(cli.build_config().log_level.as_deref(), Some("warn"));
}

#[test]
fn test_build_config_carries_overrides() {
    let cli = Cli::try_parse_from([
        "grab",
        "--dir",
        "/tmp/grab-test",
        "--platform",
        "darwin",
        "--token",
        "ghp_x",
        "remove",
        "acme",
        "tool",
    ])
    .unwrap();

    let config = cli.build_config();
    assert_eq!(config.base_dir.as_deref(), Some("/tmp/grab-test"));
    assert_eq!(config.platform.as_deref(), Some("darwin"));
    assert_eq!(config.token.as_deref(), Some("ghp_x"));
}

#[test]
fn test_list_format_values() {
    let cli = Cli::try_parse_from(["grab", "list", "--format", "json"]);
    assert!(cli.is_ok());

    let cli = Cli::try_parse_from(["grab", "list", "--format", "yaml"]);
    assert!(cli.is_err());
}

#[test]
fn test_grab_config_applies_platform() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = CliConfig {
        base_dir: temp.path().to_str().map(str::to_string),
        platform: Some("windows".to_string()),
        ..CliConfig::new()
    };

    let grab = config.grab_config().unwrap();
    assert_eq!(grab.platform, "windows");
    assert_eq!(grab.base_dir, temp.path());
}
