//! Persistent record of installed packages.
//!
//! The state document is a JSON object keyed by owner, then by repository:
//!
//! ```json
//! {
//!   "acme": {
//!     "tool": {
//!       "owner": "acme",
//!       "repo": "tool",
//!       "version": "v1.0.0",
//!       "url": "https://github.com/acme/tool/releases/download/v1.0.0/tool_linux",
//!       "installed_path": "grab/bin/tool_linux"
//!     }
//!   }
//! }
//! ```
//!
//! Every operation loads the whole document, changes it in memory and writes
//! it back through an atomic rename. There is no locking; one grab process
//! is expected to run at a time.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::GrabError;
use crate::models::Release;
use crate::utils::fs::write_json_file;

/// Releases of one owner, keyed by repository name.
pub type Repos = BTreeMap<String, Release>;

/// The whole state document, keyed by owner.
pub type Owners = BTreeMap<String, Repos>;

/// JSON-file backed store of installed releases.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every installed release, sorted by owner then repository.
    pub fn list(&self) -> Result<Owners, GrabError> {
        self.load()
    }

    /// The installed release for `owner/repo`.
    ///
    /// A missing owner and a missing repository are both
    /// [`GrabError::NotFound`], with different messages.
    pub fn get(&self, owner: &str, repo: &str) -> Result<Release, GrabError> {
        let mut owners = self.load()?;

        let mut repos = owners
            .remove(owner)
            .ok_or_else(|| GrabError::not_found(format!("no packages for owner {owner}")))?;

        repos
            .remove(repo)
            .ok_or_else(|| GrabError::not_found(format!("no packages for repo {owner}/{repo}")))
    }

    /// Record `release`, replacing any previous entry for its owner/repo.
    pub fn put(&self, release: &Release) -> Result<(), GrabError> {
        let mut owners = self.load()?;

        owners
            .entry(release.owner.clone())
            .or_default()
            .insert(release.repo.clone(), release.clone());

        self.save(&owners)?;
        debug!("Recorded {} {} in {}", release.slug(), release.version, self.path.display());
        Ok(())
    }

    /// Delete the installed file of `release`, then forget the release.
    ///
    /// The state document is only rewritten once the file is gone. Any
    /// delete failure, including a file that is already missing, leaves the
    /// entry in place. An owner left without repositories is dropped from the
    /// document.
    pub fn remove(&self, release: &Release) -> Result<(), GrabError> {
        fs::remove_file(&release.installed_path)
            .map_err(|e| GrabError::io("delete", &release.installed_path, e))?;
        info!("Deleted {}", release.installed_path.display());

        let mut owners = self.load()?;
        if let Some(repos) = owners.get_mut(&release.owner) {
            repos.remove(&release.repo);
            if repos.is_empty() {
                owners.remove(&release.owner);
            }
        }
        self.save(&owners)
    }

    fn load(&self) -> Result<Owners, GrabError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Owners::new()),
            Err(e) => return Err(GrabError::io("read state file", &self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Owners::new());
        }

        serde_json::from_str(&content).map_err(|e| GrabError::StateFile {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn save(&self, owners: &Owners) -> Result<(), GrabError> {
        write_json_file(&self.path, owners)
    }
}
