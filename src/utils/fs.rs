//! File system helpers used by the state store and the downloader.
//!
//! All helpers report failures as [`GrabError::Io`] so callers can keep the
//! failing operation and path in the error without extra context wrapping.
//!
//! # Examples
//!
//! ```rust,no_run
//! use grab_cli::utils::fs::{ensure_dir, write_json_file};
//! use std::collections::BTreeMap;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), grab_cli::core::GrabError> {
//! ensure_dir(Path::new("grab/bin"))?;
//! let empty: BTreeMap<String, String> = BTreeMap::new();
//! write_json_file(Path::new("grab/grab_state.json"), &empty)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::GrabError;

/// Ensures a directory exists, creating it and all parents if necessary.
///
/// Fails if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<(), GrabError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| GrabError::io("create directory", path, e))?;
    } else if !path.is_dir() {
        return Err(GrabError::io(
            "use directory",
            path,
            std::io::Error::other("path exists but is not a directory"),
        ));
    }
    Ok(())
}

/// Atomically replaces `path` with `content`.
///
/// The bytes go to a temporary file in the same directory, are synced, and
/// the temporary file is renamed over the target. Readers see either the old
/// or the new content, never a truncated file.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), GrabError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| GrabError::io("create temp file in", parent, e))?;
    temp.write_all(content).map_err(|e| GrabError::io("write temp file for", path, e))?;
    temp.as_file().sync_all().map_err(|e| GrabError::io("sync temp file for", path, e))?;
    temp.persist(path).map_err(|e| GrabError::io("replace", path, e.error))?;

    Ok(())
}

/// Serializes `data` as JSON pretty-printed with two-space indentation and
/// writes it atomically.
pub fn write_json_file<T>(path: &Path, data: &T) -> Result<(), GrabError>
where
    T: serde::Serialize,
{
    let json = serde_json::to_string_pretty(data).map_err(|e| GrabError::StateFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    atomic_write(path, json.as_bytes())
}

/// Sets the executable bits (`0o755`) on a file.
///
/// Windows has no executable bit, so this is a no-op there.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<(), GrabError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|e| GrabError::io("read metadata of", path, e))?;
    let mut permissions = metadata.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)
        .map_err(|e| GrabError::io("make executable", path, e))
}

/// Sets the executable bits (`0o755`) on a file.
///
/// Windows has no executable bit, so this is a no-op there.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<(), GrabError> {
    Ok(())
}

/// Whether anything (file, directory or dangling symlink) exists at `path`.
///
/// Errors other than "not found" are propagated rather than read as absence.
pub fn path_occupied(path: &Path) -> Result<bool, GrabError> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(GrabError::io("inspect", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file");
        fs::write(&file, "x").unwrap();

        assert!(matches!(ensure_dir(&file), Err(GrabError::Io { .. })));
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("state.json");

        atomic_write(&target, b"first").unwrap();
        atomic_write(&target, b"second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        // No temp files are left behind
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_json_file_uses_two_space_indent() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("doc.json");
        let value = serde_json::json!({"acme": {"tool": 1}});

        write_json_file(&target, &value).unwrap();

        let content = fs::read_to_string(&target).unwrap();
        assert_eq!(content, "{\n  \"acme\": {\n    \"tool\": 1\n  }\n}");
    }

    #[test]
    fn test_path_occupied() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("bin");

        assert!(!path_occupied(&file).unwrap());
        fs::write(&file, "x").unwrap();
        assert!(path_occupied(&file).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_make_executable_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let file = temp.path().join("tool");
        fs::write(&file, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

        make_executable(&file).unwrap();

        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}
