//! Atomic file writes
//!
//! Content is written to a temporary file in the target directory, fsynced,
//! then renamed over the target, so readers see either the old or the new
//! file and never a truncated one.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::{self, Write};

use tempfile::NamedTempFile;

/// Atomically write content to a file using temp file + fsync + rename.
///
/// Line endings are normalized to LF. Parent directories are created.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<()> {
    staged_temp_file(path, content)?
        .persist(path.as_std_path())
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to atomically write file: {path}"))?;

    Ok(())
}

/// Like [`write_file_atomic`], but never replaces an existing file.
///
/// Returns `Ok(false)` and leaves the existing file untouched when `path`
/// already exists.
pub fn write_new_file_atomic(path: &Utf8Path, content: &str) -> Result<bool> {
    match staged_temp_file(path, content)?.persist_noclobber(path.as_std_path()) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => {
            Err(e.error).with_context(|| format!("Failed to atomically create file: {path}"))
        }
    }
}

/// Write normalized content to a synced temp file next to `path`.
fn staged_temp_file(path: &Utf8Path, content: &str) -> Result<NamedTempFile> {
    let normalized_content = normalize_line_endings(content);

    let temp_dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(temp_dir)
        .with_context(|| format!("Failed to create parent directory: {temp_dir}"))?;

    let mut temp_file = NamedTempFile::new_in(temp_dir)
        .with_context(|| format!("Failed to create temporary file in: {temp_dir}"))?;

    temp_file
        .write_all(normalized_content.as_bytes())
        .context("Failed to write content to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to fsync temporary file")?;

    Ok(temp_file)
}

/// Normalize line endings to LF
fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}
