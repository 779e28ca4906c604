//! Reconciliation engine: pure per-image classification against the local
//! state map. No I/O happens here; the pipeline in `sync::mod` executes the
//! resulting decisions.

use std::path::{Path, PathBuf};

use crate::smugmug::{Album, Image};
use crate::types::MediaKind;

use super::error::SyncError;
use super::scan::{LocalEntry, LocalState};

/// Which media kinds the run is allowed to touch. A filtered-out kind is
/// neither downloaded nor flagged for deletion.
#[derive(Debug, Clone, Copy)]
pub struct MediaFilters {
    pub pictures: bool,
    pub videos: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    New,
    Changed,
}

/// Outcome of classifying one remote image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The image's media kind is disabled by configuration.
    SkipFiltered,
    /// Local fingerprint equals the remote one (pictures).
    SkipUnchanged,
    /// A local file exists at a video's path. Video fingerprints are not
    /// trusted, so any same-named local video is assumed current even if
    /// its content differs.
    SkipExistingVideo,
    /// New or changed; fetch from `url`.
    Download { url: String, change: Change },
}

/// Remove `path` and its whole ancestor directory chain from the local
/// map, marking them as matched to something still present remotely. Only
/// purely orphaned leaves and now-empty ancestors survive to become
/// deletion candidates.
pub fn mark_matched(local: &mut LocalState, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        local.remove(ancestor);
    }
}

/// Classify one remote image, consuming matched entries from `local`.
/// Returns the destination path relative to the sync root together with
/// the decision.
pub fn classify(
    album: &Album,
    image: &Image,
    filters: MediaFilters,
    local: &mut LocalState,
) -> Result<(PathBuf, Decision), SyncError> {
    let path = album.relative_path().join(&image.file_name);

    let excluded = match image.kind {
        MediaKind::Picture => !filters.pictures,
        MediaKind::Video => !filters.videos,
    };
    if excluded {
        mark_matched(local, &path);
        return Ok((path, Decision::SkipFiltered));
    }

    let existing = local.get(&path);

    if image.kind == MediaKind::Picture {
        if let Some(LocalEntry::File { md5 }) = existing {
            if *md5 == image.md5 {
                mark_matched(local, &path);
                return Ok((path, Decision::SkipUnchanged));
            }
        }
    }

    if image.kind == MediaKind::Video && existing.is_some() {
        mark_matched(local, &path);
        return Ok((path, Decision::SkipExistingVideo));
    }

    // New or changed: the slot is accounted for regardless of how the
    // download itself turns out.
    let change = if existing.is_some() {
        Change::Changed
    } else {
        Change::New
    };
    mark_matched(local, &path);

    let url = image
        .download_url()
        .ok_or_else(|| SyncError::NoVideoUrl { path: path.clone() })?
        .to_string();

    Ok((path, Decision::Download { url, change }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn album() -> Album {
        Album {
            id: 1,
            key: "k".into(),
            url: "http://x/album".into(),
            title: "Album".into(),
            category: "Cat".into(),
            subcategory: None,
            last_updated: "2024-05-01 10:30:00".into(),
        }
    }

    fn picture(name: &str, md5: &str, size: u64) -> Image {
        Image {
            file_name: name.into(),
            kind: MediaKind::Picture,
            size,
            md5: md5.into(),
            original_url: format!("http://x/{name}"),
            video_urls: Default::default(),
        }
    }

    fn video(name: &str, tiers: [&str; 5]) -> Image {
        Image {
            file_name: name.into(),
            kind: MediaKind::Video,
            size: 5000,
            md5: "untrusted".into(),
            original_url: String::new(),
            video_urls: tiers.map(String::from),
        }
    }

    fn local_with(entries: &[(&str, LocalEntry)]) -> LocalState {
        entries
            .iter()
            .map(|(p, e)| (PathBuf::from(p), e.clone()))
            .collect()
    }

    fn all_media() -> MediaFilters {
        MediaFilters {
            pictures: true,
            videos: true,
        }
    }

    #[test]
    fn test_new_picture_downloads() {
        let mut local = HashMap::new();
        let (path, decision) =
            classify(&album(), &picture("p.jpg", "h1", 1000), all_media(), &mut local).unwrap();
        assert_eq!(path, PathBuf::from("Cat/Album/p.jpg"));
        assert_eq!(
            decision,
            Decision::Download {
                url: "http://x/p.jpg".into(),
                change: Change::New
            }
        );
    }

    #[test]
    fn test_matching_fingerprint_skips() {
        let mut local = local_with(&[
            ("Cat", LocalEntry::Directory),
            ("Cat/Album", LocalEntry::Directory),
            ("Cat/Album/p.jpg", LocalEntry::File { md5: "h1".into() }),
        ]);
        let (_, decision) =
            classify(&album(), &picture("p.jpg", "h1", 1000), all_media(), &mut local).unwrap();
        assert_eq!(decision, Decision::SkipUnchanged);
        // Matched: path and its whole ancestor chain are consumed.
        assert!(local.is_empty());
    }

    #[test]
    fn test_differing_fingerprint_redownloads() {
        let mut local = local_with(&[
            ("Cat/Album/p.jpg", LocalEntry::File { md5: "old".into() }),
        ]);
        let (_, decision) =
            classify(&album(), &picture("p.jpg", "h1", 1000), all_media(), &mut local).unwrap();
        assert_eq!(
            decision,
            Decision::Download {
                url: "http://x/p.jpg".into(),
                change: Change::Changed
            }
        );
        assert!(local.is_empty());
    }

    #[test]
    fn test_existing_video_skips_regardless_of_content() {
        let mut local = local_with(&[
            ("Cat/Album/v.mp4", LocalEntry::File { md5: "whatever".into() }),
        ]);
        let (_, decision) = classify(
            &album(),
            &video("v.mp4", ["http://x/v1920", "", "", "", ""]),
            all_media(),
            &mut local,
        )
        .unwrap();
        assert_eq!(decision, Decision::SkipExistingVideo);
        assert!(local.is_empty());
    }

    #[test]
    fn test_missing_video_picks_highest_tier() {
        let mut local = HashMap::new();
        let (_, decision) = classify(
            &album(),
            &video("v.mp4", ["", "http://x/v1280", "", "", "http://x/v320"]),
            all_media(),
            &mut local,
        )
        .unwrap();
        assert_eq!(
            decision,
            Decision::Download {
                url: "http://x/v1280".into(),
                change: Change::New
            }
        );
    }

    #[test]
    fn test_video_without_usable_tier_errors() {
        let mut local = HashMap::new();
        let err = classify(
            &album(),
            &video("v.mp4", ["", "", "", "", ""]),
            all_media(),
            &mut local,
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::NoVideoUrl { .. }));
    }

    #[test]
    fn test_filtered_kind_is_matched_not_deleted() {
        let mut local = local_with(&[
            ("Cat/Album", LocalEntry::Directory),
            ("Cat/Album/p.jpg", LocalEntry::File { md5: "old".into() }),
        ]);
        let filters = MediaFilters {
            pictures: false,
            videos: true,
        };
        let (_, decision) =
            classify(&album(), &picture("p.jpg", "h1", 1000), filters, &mut local).unwrap();
        assert_eq!(decision, Decision::SkipFiltered);
        // The local copy is neither downloaded nor left as a prune candidate.
        assert!(local.is_empty());
    }

    #[test]
    fn test_unmatched_entries_survive_as_candidates() {
        let mut local = local_with(&[
            ("Cat/Album", LocalEntry::Directory),
            ("Cat/Album/p.jpg", LocalEntry::File { md5: "h1".into() }),
            ("Cat/Album/orphan.jpg", LocalEntry::File { md5: "zz".into() }),
        ]);
        classify(&album(), &picture("p.jpg", "h1", 1000), all_media(), &mut local).unwrap();
        assert_eq!(local.len(), 1);
        assert!(local.contains_key(Path::new("Cat/Album/orphan.jpg")));
    }

    #[test]
    fn test_directory_entry_at_picture_path_redownloads() {
        // A directory squatting on an image path has no fingerprint, so the
        // image counts as changed; the download itself will surface the
        // filesystem conflict.
        let mut local = local_with(&[("Cat/Album/p.jpg", LocalEntry::Directory)]);
        let (_, decision) =
            classify(&album(), &picture("p.jpg", "h1", 1000), all_media(), &mut local).unwrap();
        assert!(matches!(decision, Decision::Download { change: Change::Changed, .. }));
    }
}
