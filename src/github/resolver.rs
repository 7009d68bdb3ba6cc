//! Release resolution against the GitHub releases listing.
//!
//! Given an owner, a repository and optionally a version tag, the resolver
//! finds the release to install and the asset within it that was built for
//! the current platform.
//!
//! # Resolution Rules
//!
//! - **Latest**: one page holding one release, the most recent. An empty
//!   listing is [`GrabError::NoReleases`].
//! - **Specific version**: pages are walked from page 1 until a release with
//!   exactly the requested tag turns up. The walk stops at that release; no
//!   further releases or pages are inspected. An empty page ends the walk
//!   with [`GrabError::NotFound`], so a repository without releases and a
//!   version that is simply absent are indistinguishable to the caller.
//! - **Asset**: the first asset, in listing order, whose download URL ends
//!   in `_<platform>`. A matched release without one is
//!   [`GrabError::PlatformUnavailable`].
//!
//! # Failed Responses
//!
//! A non-2xx response carrying a parseable `X-RateLimit-Reset` header becomes
//! [`GrabError::RateLimited`]; any other non-2xx response is
//! [`GrabError::UnexpectedStatus`]. Headers on 2xx responses are ignored.

use chrono::Utc;
use tracing::debug;

use super::rate_limit::reset_wait;
use super::transport::HttpTransport;
use crate::config::GrabConfig;
use crate::core::GrabError;
use crate::models::{GitRelease, Release};

/// Resolves owner/repo/version triples to downloadable releases.
pub struct ReleaseResolver<'a, T> {
    transport: &'a T,
    api_url: &'a str,
    platform: &'a str,
    page_size: u32,
}

impl<'a, T: HttpTransport> ReleaseResolver<'a, T> {
    /// Resolver using the API root, platform and page size from `config`.
    pub fn new(transport: &'a T, config: &'a GrabConfig) -> Self {
        Self {
            transport,
            api_url: &config.api_url,
            platform: &config.platform,
            page_size: config.releases_per_page,
        }
    }

    /// URL of one page of the releases listing.
    #[must_use]
    pub fn releases_url(&self, owner: &str, repo: &str, page: u32, per_page: u32) -> String {
        format!(
            "{}/repos/{}/{}/releases?per_page={}&page={}",
            self.api_url, owner, repo, per_page, page
        )
    }

    /// Resolve `version`, or the latest release when `version` is `None`.
    pub async fn resolve(
        &self,
        owner: &str,
        repo: &str,
        version: Option<&str>,
    ) -> Result<Release, GrabError> {
        match version {
            Some(version) => self.resolve_version(owner, repo, version, self.page_size).await,
            None => self.resolve_latest(owner, repo).await,
        }
    }

    /// Resolve the most recent release.
    pub async fn resolve_latest(&self, owner: &str, repo: &str) -> Result<Release, GrabError> {
        let releases = self.fetch_page(owner, repo, 1, 1).await?;

        let Some(latest) = releases.first() else {
            return Err(GrabError::NoReleases {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        };

        debug!("Latest release of {}/{} is {}", owner, repo, latest.tag_name);
        self.select_asset(latest)
    }

    /// Page through the listing, `page_size` releases at a time, until a
    /// release tagged exactly `version` is found.
    pub async fn resolve_version(
        &self,
        owner: &str,
        repo: &str,
        version: &str,
        page_size: u32,
    ) -> Result<Release, GrabError> {
        let mut page = 1;
        loop {
            let releases = self.fetch_page(owner, repo, page, page_size).await?;

            // Covers both "no releases at all" and "walked past the last page".
            if releases.is_empty() {
                return Err(GrabError::not_found(format!("no releases for version {version}")));
            }

            if let Some(release) = releases.iter().find(|r| r.tag_name == version) {
                debug!("Found {}/{} {} on page {}", owner, repo, version, page);
                return self.select_asset(release);
            }

            page += 1;
        }
    }

    fn select_asset(&self, release: &GitRelease) -> Result<Release, GrabError> {
        let asset = release.asset_for_platform(self.platform).ok_or_else(|| {
            GrabError::PlatformUnavailable {
                platform: self.platform.to_string(),
                version: release.tag_name.clone(),
            }
        })?;

        Ok(Release {
            version: release.tag_name.clone(),
            url: asset.browser_download_url.clone(),
            ..Release::default()
        })
    }

    /// Fetch and decode one page of the listing.
    pub async fn fetch_page(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<GitRelease>, GrabError> {
        let url = self.releases_url(owner, repo, page, per_page);
        let response = self.transport.get(&url).await?;

        if !response.is_success() {
            if let Some(retry_after) = reset_wait(&response, Utc::now()) {
                return Err(GrabError::RateLimited { retry_after });
            }
            return Err(GrabError::UnexpectedStatus {
                url,
                status: response.status(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| GrabError::Decode {
            what: format!("release page {page} of {owner}/{repo}"),
            reason: e.to_string(),
        })
    }
}
