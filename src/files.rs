//! Collection loading and atomic persistence.
//!
//! Every pipeline stage reads whole files and writes whole files. Writes go
//! to a `.part` sibling first and are renamed into place, so a failed run
//! never leaves a readable partial file at the destination. Destination
//! directories are created on demand.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::bibtex::{Collection, parse_collection, render_collection};
use crate::error::PipelineError;

/// Reads and parses one reference file.
///
/// # Errors
///
/// Returns [`PipelineError::SourceUnreadable`] when the file is missing,
/// unreadable, or fails to parse.
pub fn load_collection(path: &Path) -> Result<Collection, PipelineError> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::unreadable(path, e))?;
    let collection = parse_collection(&text).map_err(|e| PipelineError::unreadable(path, e))?;
    debug!(path = %path.display(), entries = collection.len(), "collection loaded");
    Ok(collection)
}

/// Renders and persists a collection to `path` atomically.
///
/// # Errors
///
/// Returns [`PipelineError::DestinationWrite`] on any I/O failure.
pub fn write_collection_file(path: &Path, collection: &Collection) -> Result<(), PipelineError> {
    atomic_write(path, render_collection(collection).as_bytes())
}

/// Writes `bytes` to `path` via a `.part` sibling plus rename.
///
/// The parent directory is created if absent. On failure the `.part` file is
/// removed and the destination is untouched.
///
/// # Errors
///
/// Returns [`PipelineError::DestinationWrite`] on any I/O failure.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| PipelineError::write_failed(path, e))?;
    }

    let part = part_path(path);
    if let Err(e) = fs::write(&part, bytes) {
        let _ = fs::remove_file(&part);
        return Err(PipelineError::write_failed(path, e));
    }
    if let Err(e) = fs::rename(&part, path) {
        let _ = fs::remove_file(&part);
        return Err(PipelineError::write_failed(path, e));
    }

    debug!(path = %path.display(), bytes = bytes.len(), "destination written");
    Ok(())
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
