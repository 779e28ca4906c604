//! Local-state scanner: walks one album's directory and fingerprints every
//! regular file so the engine can diff it against the remote listing.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::SyncError;

/// One observed entry below the sync root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalEntry {
    Directory,
    /// A regular file with its lowercase-hex MD5 fingerprint.
    File { md5: String },
}

/// Path (relative to the sync root) → observed entry. Private to one
/// album's task; entries are removed as the engine matches them and the
/// remainder becomes the deletion candidate set.
pub type LocalState = HashMap<PathBuf, LocalEntry>;

/// Scan `album_dir` (an absolute path under `root`), producing the local
/// state map keyed by paths relative to `root`.
///
/// A missing or non-directory `album_dir` yields an empty map — the album
/// has simply never been synced. Any I/O error while walking or hashing is
/// fatal to the album and propagates.
pub fn scan_local(root: &Path, album_dir: &Path) -> Result<LocalState, SyncError> {
    let mut state = LocalState::new();
    if !album_dir.is_dir() {
        return Ok(state);
    }

    for entry in WalkDir::new(album_dir) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        if entry.file_type().is_dir() {
            state.insert(relative, LocalEntry::Directory);
        } else {
            let md5 = hash_file(entry.path())?;
            state.insert(relative, LocalEntry::File { md5 });
        }
    }

    Ok(state)
}

/// Stream a file through MD5 without loading it whole (videos can be
/// multi-GB), returning the lowercase hex digest.
fn hash_file(path: &Path) -> Result<String, SyncError> {
    let mut file = File::open(path)?;
    let mut context = md5::Context::new();
    std::io::copy(&mut file, &mut context)?;
    Ok(format!("{:x}", context.finalize()))
}
