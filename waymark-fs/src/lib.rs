//! Filesystem helpers for landmark persistence, built on `cap-std` and
//! `camino`.
//!
//! All file access in the workspace funnels through these functions so that
//! I/O stays capability-based: callers open an ambient directory once and
//! operate relative to it. [`write_atomic`] is the primitive behind store
//! saves; it guarantees that a failed write never leaves a partial file at
//! the destination.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Write};
use std::path::Component;

/// Suffix appended to the destination name while an atomic write is in
/// flight.
const TEMP_SUFFIX: &str = ".tmp";

/// Resolve an ambient directory for the given path and return the directory
/// with the file name.
///
/// # Errors
/// Fails when `path` has no file-name component or the parent directory
/// cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    // A bare file name has `Some("")` as its parent; treat both that and
    // `None` as the current directory.
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_string();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Read the entire contents of the file at `path`.
///
/// # Errors
/// Propagates the underlying I/O error when the file cannot be opened or
/// read.
pub fn read(path: &Utf8Path) -> io::Result<Vec<u8>> {
    let (dir, file_name) = open_dir_and_file(path)?;
    dir.read(file_name.as_str())
}

/// Write `contents` to `path` atomically.
///
/// The bytes land in a sibling temporary file first, are flushed to disk,
/// and the temporary file is then renamed over the destination. An existing
/// file at `path` is replaced wholesale; on failure it is left untouched.
///
/// # Errors
/// Propagates the underlying I/O error from creating, writing, syncing, or
/// renaming the temporary file.
pub fn write_atomic(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    let (dir, file_name) = open_dir_and_file(path)?;
    let temp_name = format!("{file_name}{TEMP_SUFFIX}");

    {
        let mut file = dir.create(temp_name.as_str())?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    dir.rename(temp_name.as_str(), &dir, file_name.as_str())
}

/// Ensure the parent directory for `path` exists, handling absolute paths
/// safely for cap-std.
///
/// # Errors
/// Propagates the underlying I/O error when the directory chain cannot be
/// created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    if relative.as_os_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)?;
    Ok(())
}

/// Split an absolute or relative parent path into an ambient base directory
/// and a relative suffix.
///
/// # Errors
/// Fails when the base directory cannot be opened or the path is not valid
/// UTF-8 after prefix handling.
pub fn base_dir_and_relative(parent: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = parent.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows absolute path with a drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;

            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        // Unix-style absolute path.
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        // Relative path: resolve from the current directory.
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 parent path"))?;

    Ok((dir, relative))
}
