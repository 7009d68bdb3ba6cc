//! Update an installed release.
//!
//! ```bash
//! grab update junegunn fzf            # move to the latest release
//! grab update junegunn fzf v0.55.0    # move to an exact tag
//! ```
//!
//! Only packages already recorded in the state file can be updated. Asking
//! for the installed version is a no-op that makes no network request.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::report_outcome;
use crate::config::GrabConfig;
use crate::github::HttpTransport;
use crate::installer::{Installer, Outcome};

/// Arguments of `grab update`.
#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Repository owner
    owner: String,

    /// Repository name
    repo: String,

    /// Release tag to move to [default: latest]
    version: Option<String>,
}

impl UpdateCommand {
    pub async fn execute<T: HttpTransport>(
        self,
        config: &GrabConfig,
        transport: &T,
        cli: &CliConfig,
    ) -> Result<()> {
        let installer = Installer::new(config, transport);
        let outcome = installer.update(&self.owner, &self.repo, self.version.as_deref()).await?;

        let hint = match &outcome {
            Outcome::NotInstalled { owner, repo } => Some(format!("use `grab install {owner} {repo}`")),
            _ => None,
        };
        report_outcome(&outcome, hint.as_deref(), cli.quiet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeTransport, test_config};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_update_command_not_installed_succeeds() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path());
        let transport = FakeTransport::new();
        let cmd = UpdateCommand {
            owner: "acme".to_string(),
            repo: "tool".to_string(),
            version: None,
        };

        cmd.execute(&config, &transport, &CliConfig::new()).await.unwrap();

        assert!(transport.requests().is_empty());
    }
}
