//! Command-line interface for grab.
//!
//! # Available Commands
//!
//! - `install <owner> <repo> [version]` - download a release asset into the
//!   binary directory and record it
//! - `update <owner> <repo> [version]` - replace an installed release
//! - `remove <owner> <repo>` - delete an installed binary and forget it
//! - `list` - show installed packages
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - log level (`RUST_LOG` takes precedence)
//! - `--dir <path>` - base directory, also read from `GRAB_HOME`
//! - `--platform <id>` - asset suffix to install, e.g. `darwin`
//! - `--token <token>` - GitHub API token, also read from `GITHUB_TOKEN`
//!
//! # Example
//!
//! ```bash
//! grab install junegunn fzf
//! grab --dir ~/.grab update junegunn fzf v0.56.0
//! grab list --format json
//! grab remove junegunn fzf
//! ```
//!
//! Exit status is 0 for success and for "nothing to do" results such as an
//! already-installed package or an unknown version, and 1 for failures.

pub mod common;
mod install;
mod list;
mod remove;
mod update;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::GrabConfig;
use crate::github::ReqwestTransport;

pub use install::InstallCommand;
pub use list::{ListCommand, ListFormat};
pub use remove::RemoveCommand;
pub use update::UpdateCommand;

/// Runtime configuration for CLI execution.
///
/// Built from the parsed flags by [`Cli::build_config`]; tests construct it
/// directly to run commands against a temporary directory.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: Option<String>,

    /// Suppress result lines on stdout.
    pub quiet: bool,

    /// Base directory override (`--dir` / `GRAB_HOME`).
    pub base_dir: Option<String>,

    /// Platform override (`--platform`).
    pub platform: Option<String>,

    /// GitHub API token (`--token` / `GITHUB_TOKEN`).
    pub token: Option<String>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over `log_level`. Does nothing if a subscriber is
    /// already installed.
    pub fn init_logging(&self) {
        let default_level = self.log_level.as_deref().unwrap_or("warn");
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Build the [`GrabConfig`] for this invocation.
    pub fn grab_config(&self) -> Result<GrabConfig> {
        let mut config = GrabConfig::load(self.base_dir.as_deref())?.with_token(self.token.clone());
        if let Some(platform) = &self.platform {
            config = config.with_platform(platform.clone());
        }
        Ok(config)
    }
}

/// Install pre-built binaries from GitHub releases.
#[derive(Parser)]
#[command(
    name = "grab",
    about = "Install pre-built binaries from GitHub releases",
    version,
    long_about = "grab downloads release assets built for the current platform into a local \
                  bin directory and keeps track of which version of each owner/repo is installed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base directory holding the state file and bin/ [default: ./grab]
    #[arg(long, global = true, env = "GRAB_HOME", value_name = "PATH")]
    dir: Option<String>,

    /// Install assets built for this platform instead of the running one
    #[arg(long, global = true, value_name = "ID")]
    platform: Option<String>,

    /// GitHub API token, lifts the anonymous rate limit
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a release (latest unless a version is given)
    Install(InstallCommand),

    /// Update an installed release (latest unless a version is given)
    Update(UpdateCommand),

    /// Remove an installed release
    Remove(RemoveCommand),

    /// List installed releases
    List(ListCommand),
}

impl Cli {
    /// Execute the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            quiet: self.quiet,
            base_dir: self.dir.clone(),
            platform: self.platform.clone(),
            token: self.token.clone(),
        }
    }

    /// Execute with an explicit configuration.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let grab = config.grab_config()?;
        grab.ensure_layout()?;
        debug!("State file {}, platform {}", grab.state_file.display(), grab.platform);

        match self.command {
            Commands::List(cmd) => cmd.execute(&grab),
            Commands::Remove(cmd) => cmd.execute(&grab, &config),
            Commands::Install(cmd) => {
                let transport = ReqwestTransport::new(&grab)?;
                cmd.execute(&grab, &transport, &config).await
            }
            Commands::Update(cmd) => {
                let transport = ReqwestTransport::new(&grab)?;
                cmd.execute(&grab, &transport, &config).await
            }
        }
    }
}
