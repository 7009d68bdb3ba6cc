//! Integration test suite for grab
//!
//! Drives the `grab` binary against a temporary `--dir`. Only paths that
//! need no network are covered here; resolution and download are exercised
//! by the unit tests with an in-memory transport.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **common**: temporary grab directory and command builder
//! - **cli**: help, version and argument validation
//! - **config**: base directory bootstrap and settings file handling
//! - **list**: `grab list` in both formats
//! - **remove**: `grab remove` of installed and missing packages
//! - **update**: `grab update` paths that stop before the network

mod cli;
mod common;
mod config;
mod list;
mod remove;
mod update;
