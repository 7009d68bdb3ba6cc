//! Global constants used throughout the grab codebase.
//!
//! File names, directory names and network defaults live here so the
//! configuration layer and the tests agree on a single set of values.

use std::time::Duration;

/// Base directory used when neither `--dir` nor `GRAB_HOME` is given.
pub const DEFAULT_BASE_DIR: &str = "./grab";

/// Name of the JSON document recording installed packages.
pub const STATE_FILE_NAME: &str = "grab_state.json";

/// Name of the subdirectory that receives downloaded binaries.
pub const BIN_DIR_NAME: &str = "bin";

/// Optional TOML settings file inside the base directory.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Root of the GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Releases requested per page when searching for a specific version.
///
/// GitHub caps `per_page` at 100, so this is also the upper clamp applied to
/// user-supplied values.
pub const DEFAULT_RELEASES_PER_PAGE: u32 = 100;

/// Upper bound accepted by the releases endpoint for `per_page`.
pub const MAX_RELEASES_PER_PAGE: u32 = 100;

/// Client-side timeout applied to every HTTP request (5 seconds).
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Response header carrying the epoch second at which the rate limit resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";
