//! Remove an installed release.
//!
//! Deletes the binary, then drops its entry from the state file. If the
//! binary cannot be deleted the entry is kept, so the command can be retried.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::report_outcome;
use crate::config::GrabConfig;
use crate::installer::remove_package;
use crate::state::StateStore;

/// Arguments of `grab remove`.
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Repository owner
    owner: String,

    /// Repository name
    repo: String,
}

impl RemoveCommand {
    /// Removal is local only; no request is made.
    pub fn execute(self, config: &GrabConfig, cli: &CliConfig) -> Result<()> {
        let store = StateStore::new(&config.state_file);
        let outcome = remove_package(&store, &self.owner, &self.repo)?;
        report_outcome(&outcome, None, cli.quiet);
        Ok(())
    }
}
