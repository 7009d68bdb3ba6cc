//! Configuration management for grab
//!
//! grab keeps everything under a single base directory:
//!
//! ```text
//! <base>/
//! ├── grab_state.json   # installed packages, owner -> repo -> release
//! ├── config.toml       # optional settings overrides
//! └── bin/              # downloaded binaries, marked executable
//! ```
//!
//! A [`GrabConfig`] is built exactly once, at startup, from the command line
//! and the optional settings file, and is then passed by reference into the
//! resolver, the state store and the installer. Nothing reads ambient global
//! state after that point.
//!
//! # Settings File (`<base>/config.toml`)
//!
//! ```toml
//! # Releases fetched per page when looking for a specific version (1-100)
//! releases_per_page = 50
//!
//! # Connect timeout, and whole-request timeout for API calls, in seconds
//! timeout_secs = 10
//!
//! # GitHub API root, e.g. for GitHub Enterprise
//! api_url = "https://github.example.com/api/v3"
//! ```
//!
//! Every key is optional. A missing file means defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    BIN_DIR_NAME, DEFAULT_API_URL, DEFAULT_BASE_DIR, DEFAULT_HTTP_TIMEOUT,
    DEFAULT_RELEASES_PER_PAGE, MAX_RELEASES_PER_PAGE, SETTINGS_FILE_NAME, STATE_FILE_NAME,
};
use crate::core::GrabError;
use crate::utils::fs::{atomic_write, ensure_dir};
use crate::utils::platform::current_platform;

/// Runtime configuration shared by every grab component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrabConfig {
    /// Base working directory.
    pub base_dir: PathBuf,
    /// Path of the JSON state document.
    pub state_file: PathBuf,
    /// Directory downloaded binaries are written to.
    pub bin_dir: PathBuf,
    /// Page size used while searching for a specific version.
    pub releases_per_page: u32,
    /// Suffix identifier used to pick a release asset.
    pub platform: String,
    /// Connect timeout for every request and overall limit for API requests.
    /// Asset downloads have no overall limit.
    pub timeout: Duration,
    /// GitHub API root without a trailing slash.
    pub api_url: String,
    /// Optional API token sent as a bearer token to `api_url`.
    pub token: Option<String>,
}

/// Overrides read from `<base>/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Settings {
    releases_per_page: Option<u32>,
    timeout_secs: Option<u64>,
    api_url: Option<String>,
}

impl GrabConfig {
    /// Configuration rooted at `base_dir` with every default applied.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            state_file: base_dir.join(STATE_FILE_NAME),
            bin_dir: base_dir.join(BIN_DIR_NAME),
            base_dir,
            releases_per_page: DEFAULT_RELEASES_PER_PAGE,
            platform: current_platform().to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }

    /// Build the configuration for a CLI invocation.
    ///
    /// `base_dir` is the `--dir` / `GRAB_HOME` value, if any; `~` and
    /// environment variables in it are expanded. The settings file inside the
    /// base directory is applied on top of the defaults.
    pub fn load(base_dir: Option<&str>) -> Result<Self, GrabError> {
        let base_dir = match base_dir {
            Some(dir) => shellexpand::full(dir)
                .map_err(|e| GrabError::Config {
                    reason: format!("cannot expand directory '{dir}': {e}"),
                })?
                .into_owned(),
            None => DEFAULT_BASE_DIR.to_string(),
        };

        let mut config = Self::new(base_dir);
        config.apply_settings_file()?;
        debug!("Using grab directory {}", config.base_dir.display());
        Ok(config)
    }

    /// Override the platform identifier used for asset matching.
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set the API token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Path of the optional settings file.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join(SETTINGS_FILE_NAME)
    }

    fn apply_settings_file(&mut self) -> Result<(), GrabError> {
        let path = self.settings_file();
        if !path.exists() {
            return Ok(());
        }

        let settings = read_settings(&path)?;
        if let Some(per_page) = settings.releases_per_page {
            self.releases_per_page = per_page.clamp(1, MAX_RELEASES_PER_PAGE);
        }
        if let Some(secs) = settings.timeout_secs {
            if secs == 0 {
                return Err(GrabError::Config {
                    reason: "timeout_secs must be greater than zero".to_string(),
                });
            }
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(api_url) = settings.api_url {
            self.api_url = api_url.trim_end_matches('/').to_string();
        }
        Ok(())
    }

    /// Create the on-disk layout if it is missing.
    ///
    /// Creates the base and binary directories, and writes an empty `{}`
    /// state document when none exists. An existing state file is never
    /// touched.
    pub fn ensure_layout(&self) -> Result<(), GrabError> {
        ensure_dir(&self.base_dir)?;
        ensure_dir(&self.bin_dir)?;

        if !self.state_file.exists() {
            debug!("Creating state file {}", self.state_file.display());
            atomic_write(&self.state_file, b"{}")?;
        }
        Ok(())
    }
}

fn read_settings(path: &Path) -> Result<Settings, GrabError> {
    let content =
        fs::read_to_string(path).map_err(|e| GrabError::io("read settings file", path, e))?;
    toml::from_str(&content).map_err(|e| GrabError::Config {
        reason: format!("{}: {e}", path.display()),
    })
}
