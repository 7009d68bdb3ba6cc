//! Error handling for grab
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`GrabError`]) so the orchestration layer can
//!    tell a soft "nothing to do" condition from a hard failure.
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and an
//!    actionable suggestion, produced only at the CLI boundary.
//!
//! # Error Categories
//!
//! - **Domain**: [`GrabError::NotFound`] is the only recoverable kind. The
//!   installer turns it into an informational outcome.
//! - **Remote**: [`GrabError::NoReleases`], [`GrabError::RateLimited`],
//!   [`GrabError::Transport`], [`GrabError::UnexpectedStatus`],
//!   [`GrabError::Decode`], [`GrabError::PlatformUnavailable`].
//! - **Local**: [`GrabError::Io`], [`GrabError::StateFile`],
//!   [`GrabError::Config`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use grab_cli::core::{GrabError, user_friendly_error};
//!
//! let error = GrabError::NoReleases {
//!     owner: "acme".to_string(),
//!     repo: "tool".to_string(),
//! };
//! assert!(!error.is_not_found());
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // coloured error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::github::rate_limit::format_wait;

/// The main error type for grab operations.
///
/// Every resolver, state-store and download failure is expressed as one of
/// these variants. Only [`GrabError::NotFound`] is considered recoverable;
/// everything else aborts the current command with a non-zero exit code.
#[derive(Error, Debug)]
pub enum GrabError {
    /// A package is not installed, or a requested version does not exist
    /// upstream.
    #[error("{message}")]
    NotFound {
        /// Human readable description of what was missing
        message: String,
    },

    /// The repository publishes no releases at all.
    ///
    /// Raised when looking up the latest release. Unlike a missing version
    /// there is nothing to fall back to, so this is a hard error.
    #[error("no releases found for {owner}/{repo}")]
    NoReleases {
        /// Repository owner
        owner: String,
        /// Repository name
        repo: String,
    },

    /// The API rejected the request and reported when the limit resets.
    #[error("rate-limit exceeded, try again in {}", format_wait(.retry_after))]
    RateLimited {
        /// Time left until the rate-limit window resets
        retry_after: Duration,
    },

    /// The request never produced a response (connection, TLS, timeout).
    #[error("request to {url} failed: {reason}")]
    Transport {
        /// URL that was being fetched
        url: String,
        /// Underlying transport failure
        reason: String,
    },

    /// A non-success status without rate-limit information.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus {
        /// URL that was being fetched
        url: String,
        /// HTTP status code returned
        status: u16,
    },

    /// A response body could not be decoded.
    #[error("failed to decode {what}: {reason}")]
    Decode {
        /// Description of the payload being decoded
        what: String,
        /// Decoder error message
        reason: String,
    },

    /// The release exists but carries no asset for the running platform.
    #[error("no {platform} installation available for version {version}")]
    PlatformUnavailable {
        /// Platform identifier that was searched for
        platform: String,
        /// Release tag that was matched
        version: String,
    },

    /// The state document could not be parsed or serialized.
    #[error("state file {} is invalid: {reason}", .path.display())]
    StateFile {
        /// Path to the state document
        path: PathBuf,
        /// Parser or serializer message
        reason: String,
    },

    /// A filesystem operation failed.
    #[error("failed to {operation} {}: {source}", .path.display())]
    Io {
        /// Operation being attempted, e.g. "create file"
        operation: String,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file or command-line configuration is invalid.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What was wrong with the configuration
        reason: String,
    },
}

impl GrabError {
    /// Build a [`GrabError::NotFound`] from any message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Build a [`GrabError::Io`] for `operation` on `path`.
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Whether this error belongs to the recoverable "nothing to do" family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Error wrapper carrying optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with colours.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] for CLI display.
///
/// [`GrabError`] values get tailored suggestions. Anything else is shown with
/// its full `Caused by:` chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(grab_error) = error.downcast_ref::<GrabError>() {
        return create_error_context(grab_error);
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(message)
}

fn create_error_context(error: &GrabError) -> ErrorContext {
    let ctx = ErrorContext::new(error.to_string());
    match error {
        GrabError::NotFound { .. } => ctx,
        GrabError::NoReleases { .. } => ctx
            .with_suggestion("Check the owner and repository spelling on GitHub")
            .with_details("The repository has not published any releases yet"),
        GrabError::RateLimited { .. } => ctx
            .with_suggestion("Export GITHUB_TOKEN (or pass --token) to raise the API rate limit")
            .with_details("Anonymous GitHub API requests are limited to 60 per hour"),
        GrabError::Transport { .. } => ctx
            .with_suggestion("Check your network connection and try again"),
        GrabError::UnexpectedStatus { status: 404, .. } => ctx
            .with_suggestion("Check that the repository exists and is public"),
        GrabError::UnexpectedStatus { .. } => ctx.with_suggestion("Retry the command later"),
        GrabError::Decode { .. } => ctx
            .with_details("The server returned a body that is not a GitHub release listing"),
        GrabError::PlatformUnavailable { platform, .. } => ctx
            .with_suggestion("Pick another version, or pass --platform to install a different build")
            .with_details(format!(
                "Assets are matched by a download URL ending in \"_{platform}\""
            )),
        GrabError::StateFile { path, .. } => ctx.with_suggestion(format!(
            "Fix or delete {} (an empty document is `{{}}`)",
            path.display()
        )),
        GrabError::Io { source, .. } => match source.kind() {
            std::io::ErrorKind::PermissionDenied => ctx
                .with_suggestion("Check ownership and permissions of the grab directory"),
            _ => ctx,
        },
        GrabError::Config { .. } => ctx
            .with_suggestion("Check config.toml in the grab directory and the command-line flags"),
    }
}
