//! grab: install pre-built binaries published as GitHub release assets.
//!
//! grab keeps one installed version per `owner/repo`. Installing resolves a
//! release through the GitHub releases API, picks the asset whose download
//! URL ends in `_<platform>`, streams it into a local `bin/` directory, marks
//! it executable and records it in a JSON state file.
//!
//! # Modules
//!
//! - [`cli`]: command-line parsing and command execution
//! - [`config`]: [`config::GrabConfig`], built once per invocation
//! - [`core`]: error types and user-facing error display
//! - [`github`]: HTTP transport, rate-limit handling and release resolution
//! - [`installer`]: install / update / remove orchestration
//! - [`models`]: release and asset types
//! - [`state`]: the JSON state store
//! - [`utils`]: filesystem and platform helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use grab_cli::config::GrabConfig;
//! use grab_cli::github::ReqwestTransport;
//! use grab_cli::installer::Installer;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GrabConfig::load(Some("~/.grab"))?;
//! config.ensure_layout()?;
//! let transport = ReqwestTransport::new(&config)?;
//!
//! let outcome = Installer::new(&config, &transport)
//!     .install("junegunn", "fzf", None)
//!     .await?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod github;
pub mod installer;
pub mod models;
pub mod state;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
