//! Data models for releases.
//!
//! Two families of types live here:
//!
//! - [`GitRelease`] / [`GitAsset`]: the raw shape of one entry of the GitHub
//!   `GET /repos/{owner}/{repo}/releases` listing. They are decoded, inspected
//!   and thrown away; nothing persists them.
//! - [`Release`]: grab's own record of an installable artifact. It is filled
//!   in step by step (version and URL by the resolver, owner, repo and
//!   installed path by the installer) and is what the state file stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// grab's record of one installable (or installed) artifact.
///
/// Serialized into the state file as
/// `{ "owner", "repo", "version", "url", "installed_path" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Repository owner, e.g. `acme`.
    pub owner: String,
    /// Repository name, e.g. `tool`.
    pub repo: String,
    /// Upstream tag of the release, e.g. `v1.0.0`.
    pub version: String,
    /// Browser download URL of the selected asset.
    pub url: String,
    /// Where the asset is (or will be) written on disk.
    pub installed_path: PathBuf,
}

impl Release {
    /// Last path segment of the download URL, used as the on-disk file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or(&self.url)
    }

    /// `owner/repo` label used in messages.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// One release as returned by the GitHub releases listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRelease {
    /// Git tag the release was cut from.
    pub tag_name: String,
    /// Display name; GitHub sends `null` for untitled releases.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// `null` for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<GitAsset>,
}

impl GitRelease {
    /// First asset, in listing order, whose download URL ends in `_<platform>`.
    ///
    /// The match is an exact suffix match. `tool_linux.tar.gz` does not
    /// satisfy `linux`, and neither does `tool-linux`.
    #[must_use]
    pub fn asset_for_platform(&self, platform: &str) -> Option<&GitAsset> {
        let suffix = format!("_{platform}");
        self.assets.iter().find(|asset| asset.browser_download_url.ends_with(&suffix))
    }
}

/// One downloadable file attached to a [`GitRelease`].
#[derive(Debug, Clone, Deserialize)]
pub struct GitAsset {
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Public URL the asset can be fetched from.
    pub browser_download_url: String,
}
