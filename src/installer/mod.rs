//! Install, update and remove orchestration.
//!
//! [`Installer`] ties the [`ReleaseResolver`], the [`StateStore`] and the
//! download side effect together. Each operation returns an [`Outcome`]:
//! "nothing to do" results (already installed, not installed, unknown
//! version) are outcomes, not errors, and never change anything on disk.
//! Every [`GrabError`] that comes back is a hard failure.
//!
//! # Ordering
//!
//! A release is written to the state store only after its file has been
//! downloaded and made executable, so a state entry always points at a file
//! that existed when the entry was written. Removal runs the other way
//! round: the file goes first and the entry second.

mod download;

pub use download::download_release;

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

use crate::config::GrabConfig;
use crate::core::GrabError;
use crate::github::{HttpTransport, ReleaseResolver};
use crate::models::Release;
use crate::state::StateStore;
use crate::utils::fs::path_occupied;

/// Result of an install, update or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A release was downloaded and recorded.
    Installed(Release),
    /// An installed release was replaced.
    Updated {
        previous: Release,
        current: Release,
    },
    /// A release's file and state entry were deleted.
    Removed(Release),
    /// Install found a file already at the target path.
    FileExists { path: PathBuf },
    /// Update was asked for the version that is already installed.
    AlreadyInstalled(Release),
    /// Update or remove of a package with no state entry.
    NotInstalled { owner: String, repo: String },
    /// The requested version does not exist upstream.
    VersionNotFound { message: String },
}

impl Outcome {
    /// Whether anything on disk changed.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Installed(_) | Self::Updated { .. } | Self::Removed(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed(release) => write!(
                f,
                "{} {} {} to {}",
                "Installed".green().bold(),
                release.slug(),
                release.version,
                release.installed_path.display()
            ),
            Self::Updated { previous, current } => write!(
                f,
                "{} {} {} -> {}",
                "Updated".green().bold(),
                current.slug(),
                previous.version,
                current.version
            ),
            Self::Removed(release) => write!(
                f,
                "{} {} {}",
                "Removed".green().bold(),
                release.slug(),
                release.version
            ),
            Self::FileExists { path } => write!(
                f,
                "{} already installed, use {} instead",
                path.display(),
                "update".bold()
            ),
            Self::AlreadyInstalled(release) => {
                write!(f, "{} {} already installed", release.slug(), release.version)
            }
            Self::NotInstalled { owner, repo } => write!(f, "{owner}/{repo} is not installed"),
            Self::VersionNotFound { message } => write!(f, "{message}"),
        }
    }
}

/// Runs install, update and remove against one configuration.
pub struct Installer<'a, T> {
    config: &'a GrabConfig,
    transport: &'a T,
    store: StateStore,
}

impl<'a, T: HttpTransport> Installer<'a, T> {
    pub fn new(config: &'a GrabConfig, transport: &'a T) -> Self {
        Self {
            config,
            transport,
            store: StateStore::new(&config.state_file),
        }
    }

    /// The state store this installer writes to.
    #[must_use]
    pub const fn store(&self) -> &StateStore {
        &self.store
    }

    /// Install `owner/repo` at `version`, or the latest release.
    ///
    /// Never overwrites: if the target file already exists the result is
    /// [`Outcome::FileExists`] and nothing is downloaded.
    pub async fn install(
        &self,
        owner: &str,
        repo: &str,
        version: Option<&str>,
    ) -> Result<Outcome, GrabError> {
        let release = match self.resolve(owner, repo, version).await? {
            Ok(release) => release,
            Err(outcome) => return Ok(outcome),
        };

        if path_occupied(&release.installed_path)? {
            debug!("{} exists, not installing", release.installed_path.display());
            return Ok(Outcome::FileExists {
                path: release.installed_path,
            });
        }

        download_release(self.transport, &release).await?;
        self.store.put(&release)?;
        Ok(Outcome::Installed(release))
    }

    /// Replace the installed release of `owner/repo` with `version`, or with
    /// the latest release.
    ///
    /// Never installs from scratch. The download overwrites whatever is at
    /// the new target path. A previous file with a different name is left in
    /// place.
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        version: Option<&str>,
    ) -> Result<Outcome, GrabError> {
        let previous = match self.store.get(owner, repo) {
            Ok(release) => release,
            Err(e) if e.is_not_found() => {
                debug!("{}", e);
                return Ok(Outcome::NotInstalled {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let version = version.filter(|v| !v.is_empty());
        if version == Some(previous.version.as_str()) {
            return Ok(Outcome::AlreadyInstalled(previous));
        }

        let current = match self.resolve(owner, repo, version).await? {
            Ok(release) => release,
            Err(outcome) => return Ok(outcome),
        };

        if current.installed_path != previous.installed_path {
            debug!(
                "{} moves from {} to {}",
                current.slug(),
                previous.installed_path.display(),
                current.installed_path.display()
            );
        }

        download_release(self.transport, &current).await?;
        self.store.put(&current)?;
        Ok(Outcome::Updated { previous, current })
    }

    /// Delete the installed file of `owner/repo` and forget it.
    pub fn remove(&self, owner: &str, repo: &str) -> Result<Outcome, GrabError> {
        remove_package(&self.store, owner, repo)
    }

    /// Resolve and fill in owner, repo and installed path.
    ///
    /// The inner `Err` is the soft outcome for a version missing upstream.
    async fn resolve(
        &self,
        owner: &str,
        repo: &str,
        version: Option<&str>,
    ) -> Result<Result<Release, Outcome>, GrabError> {
        let version = version.filter(|v| !v.is_empty());
        let resolver = ReleaseResolver::new(self.transport, self.config);

        let mut release = match resolver.resolve(owner, repo, version).await {
            Ok(release) => release,
            Err(e) if e.is_not_found() => {
                debug!("{}/{}: {}", owner, repo, e);
                return Ok(Err(Outcome::VersionNotFound {
                    message: e.to_string(),
                }));
            }
            Err(e) => return Err(e),
        };

        release.owner = owner.to_string();
        release.repo = repo.to_string();
        release.installed_path = self.config.bin_dir.join(release.file_name());
        Ok(Ok(release))
    }
}

/// Delete the installed file of `owner/repo` and drop its state entry.
///
/// Removal never touches the network, so it needs no transport.
pub fn remove_package(store: &StateStore, owner: &str, repo: &str) -> Result<Outcome, GrabError> {
    let release = match store.get(owner, repo) {
        Ok(release) => release,
        Err(e) if e.is_not_found() => {
            debug!("{}", e);
            return Ok(Outcome::NotInstalled {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    store.remove(&release)?;
    Ok(Outcome::Removed(release))
}
