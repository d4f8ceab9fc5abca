//! Marker-file directory walker.
//!
//! The installation tree is iterated lazily: directories are visited
//! depth-first and marker files are yielded one at a time, so very large
//! specification trees never get materialized as a full file list. Ordering
//! across sibling directories follows the filesystem and is not guaranteed.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{OnedevxError, Result, SpecError};

/// Walks `root` depth-first, yielding every regular file whose base name
/// equals `marker`.
///
/// Traversal errors (missing root, permission denied) are yielded as `Err`
/// items; consumers propagate them, aborting the run. There is no
/// partial-success mode.
pub fn walk_markers(root: &Path, marker: &str) -> impl Iterator<Item = Result<PathBuf>> + use<> {
    let marker = marker.to_owned();
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                (entry.file_type().is_file() && entry.file_name() == marker.as_str())
                    .then(|| Ok(entry.into_path()))
            }
            Err(e) => Some(Err(OnedevxError::Spec(SpecError::Walk {
                path: e.path().map(Path::to_path_buf),
                message: e.to_string(),
            }))),
        })
}
