//! Snapshot files on disk.

use std::path::{Path, PathBuf};

use alchemist_kernel::graph::RecipeGraph;
use alchemist_kernel::snapshot::{RecipeSnapshot, SnapshotError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read snapshot `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Read and decode a snapshot JSON file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Snapshot`] if it is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<RecipeSnapshot, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = RecipeSnapshot::from_json_slice(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        elements = snapshot.element.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// [`load_snapshot`] followed by graph construction.
///
/// # Errors
///
/// As [`load_snapshot`], plus [`LoadError::Snapshot`] wrapping the graph
/// construction failure.
pub fn load_graph(path: &Path) -> Result<RecipeGraph, LoadError> {
    let snapshot = load_snapshot(path)?;
    snapshot
        .to_graph()
        .map_err(|e| LoadError::Snapshot(SnapshotError::from(e)))
}
