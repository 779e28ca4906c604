//! Prune executor: removes local entries left unmatched after an album's
//! images were all classified.

use std::fs;
use std::path::Path;

use super::error::SyncError;
use super::scan::{LocalEntry, LocalState};

/// Delete every leftover file, then every leftover directory.
///
/// Files go first across the whole set, and directories are removed
/// deepest-first, so `remove_dir` only ever sees directories whose contents
/// are already gone. A failure (e.g. a directory that is unexpectedly
/// non-empty) propagates as an album-level error.
///
/// With deletion disabled this is a silent no-op; under dry-run the
/// intended removals are only logged.
pub fn prune(
    root: &Path,
    leftovers: &LocalState,
    delete_enabled: bool,
    dry_run: bool,
) -> Result<(), SyncError> {
    if leftovers.is_empty() || !delete_enabled {
        return Ok(());
    }

    for (path, entry) in leftovers {
        if *entry == LocalEntry::Directory {
            continue;
        }
        if dry_run {
            tracing::info!("dry run, not removing file {}", path.display());
        } else {
            let full = root.join(path);
            tracing::info!("removing file {}", path.display());
            fs::remove_file(&full)?;
        }
    }

    let mut directories: Vec<&Path> = leftovers
        .iter()
        .filter(|(_, entry)| **entry == LocalEntry::Directory)
        .map(|(path, _)| path.as_path())
        .collect();
    directories.sort_by_key(|path| std::cmp::Reverse(path.components().count()));

    for path in directories {
        if dry_run {
            tracing::info!("dry run, not removing directory {}", path.display());
        } else {
            let full = root.join(path);
            tracing::info!("removing directory {}", path.display());
            fs::remove_dir(&full)?;
        }
    }

    if !dry_run {
        tracing::info!("removed {} files and directories", leftovers.len());
    }
    Ok(())
}
