use std::path::Path;

use crate::error::DumpError;

use super::types::WorkQueue;

/// Fails unless `root` is an existing directory.
pub fn preflight(root: &Path) -> Result<(), DumpError> {
    if !root.exists() {
        return Err(DumpError::OutputMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DumpError::OutputNotDirectory(root.to_path_buf()));
    }
    Ok(())
}

/// Creates every directory referenced by the queue below `root`.
///
/// Idempotent: existing directories are left alone. Returns how many were
/// created.
pub fn ensure_directories(root: &Path, queue: &WorkQueue) -> Result<usize, DumpError> {
    let mut created = 0;
    for task in queue.iter() {
        let dir = task.output_dir(root);
        if dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(&dir).map_err(|source| DumpError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(target: "dhubdump.assembly", dir = %dir.display(), "created output directory");
        created += 1;
    }
    Ok(created)
}
