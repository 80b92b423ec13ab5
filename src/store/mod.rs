//! Local storage: download directory preparation and the resume-mode scan.
//!
//! The known-titles set is built exactly once, before enumeration, and stays
//! immutable for the whole run: a title downloaded mid-run is not added back,
//! since skip decisions are made at projection time. When resume mode is off
//! the caller uses an empty set and the directory is never listed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors from preparing or inspecting the download directory.
///
/// Both are fatal to the run.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The download directory could not be created.
    #[error("could not create download directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The download directory could not be listed.
    #[error("could not list download directory {path}: {source}")]
    ReadDir {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Creates the download directory (and parents) if absent.
///
/// # Errors
///
/// Returns [`StoreError::CreateDir`] when creation fails.
pub fn ensure_download_dir(dir: &Path) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Scans the download directory and returns the extension-stripped names of
/// the files already present.
///
/// Only direct entries are considered; subdirectories are ignored.
///
/// # Errors
///
/// Returns [`StoreError::ReadDir`] when the directory cannot be listed.
pub fn existing_titles(dir: &Path) -> Result<HashSet<String>, StoreError> {
    let read_dir = std::fs::read_dir(dir).map_err(|source| StoreError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut titles = HashSet::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| StoreError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            titles.insert(stem.to_string());
        }
    }

    debug!(
        count = titles.len(),
        dir = %dir.display(),
        "scanned existing downloads"
    );
    Ok(titles)
}
