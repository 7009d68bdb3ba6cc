//! Platform detection for asset selection.
//!
//! Release assets are matched by a `_<platform>` suffix on their download
//! URL. Projects publishing for grab name their files after Go's `GOOS`
//! values, so macOS is `darwin` rather than Rust's `macos`.

/// Platform identifier for the running operating system.
///
/// # Examples
///
/// ```rust,no_run
/// use grab_cli::utils::platform::current_platform;
///
/// // "linux", "darwin", "windows", or the raw OS name elsewhere
/// println!("{}", current_platform());
/// ```
#[must_use]
pub fn current_platform() -> &'static str {
    platform_for_os(std::env::consts::OS)
}

/// Map a Rust `std::env::consts::OS` value to the asset suffix naming.
#[must_use]
pub fn platform_for_os(os: &'static str) -> &'static str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}
