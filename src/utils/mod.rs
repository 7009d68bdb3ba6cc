//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Atomic writes, JSON output, directory creation, executable bits
//! - [`platform`] - Platform identifier used to pick release assets

pub mod fs;
pub mod platform;

pub use fs::{atomic_write, ensure_dir, make_executable, write_json_file};
pub use platform::current_platform;
