//! Install a release.
//!
//! Resolves the release (latest, or the exact tag given), downloads the asset
//! for the current platform into the binary directory and records it.
//!
//! ```bash
//! grab install junegunn fzf            # latest
//! grab install junegunn fzf v0.56.0    # exact tag
//! ```
//!
//! A file already at the target path is never overwritten; use `update`.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::report_outcome;
use crate::config::GrabConfig;
use crate::github::HttpTransport;
use crate::installer::Installer;

/// Arguments of `grab install`.
#[derive(Args, Debug)]
pub struct InstallCommand {
    /// Repository owner
    owner: String,

    /// Repository name
    repo: String,

    /// Release tag to install [default: latest]
    version: Option<String>,
}

impl InstallCommand {
    pub async fn execute<T: HttpTransport>(
        self,
        config: &GrabConfig,
        transport: &T,
        cli: &CliConfig,
    ) -> Result<()> {
        let installer = Installer::new(config, transport);
        let outcome = installer.install(&self.owner, &self.repo, self.version.as_deref()).await?;
        report_outcome(&outcome, None, cli.quiet);
        Ok(())
    }
}
