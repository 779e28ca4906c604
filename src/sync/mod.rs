//! Album reconciliation: the per-album pipeline and the bounded-concurrency
//! scheduler that drives it.
//!
//! Each album task is strictly sequential — fast-path check, local scan,
//! remote listing, per-image classification and download, prune, timestamp
//! stamp. Tasks run concurrently up to the configured job count, and every
//! task's result is collected so one album's failure never aborts its
//! siblings; the run's exit status derives from the aggregate.

pub mod download;
pub mod engine;
pub mod error;
pub mod prune;
pub mod scan;
pub mod summary;

use std::fs::FileTimes;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use futures_util::stream::{self, StreamExt};

use crate::smugmug::{Album, SmugClient};
use crate::types::MediaKind;

use engine::{classify, Change, Decision, MediaFilters};
use error::SyncError;
use summary::RunSummary;

/// Read-only inputs to the reconciliation core.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Absolute sync root directory.
    pub root: PathBuf,
    pub dry_run: bool,
    /// Delete local files no longer present remotely.
    pub delete: bool,
    /// Skip albums whose directory timestamp matches the remote stamp.
    pub fast: bool,
    pub pictures: bool,
    pub videos: bool,
    /// Number of albums reconciled concurrently.
    pub jobs: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AlbumOutcome {
    Synced,
    FastSkipped,
}

/// Aggregate of all per-album results for one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub synced: usize,
    pub fast_skipped: usize,
    /// Album path plus the error that stopped it.
    pub failures: Vec<(String, SyncError)>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reconcile every album, at most `config.jobs` concurrently.
///
/// Failures are logged with album context as they are observed and
/// collected into the report; sibling albums keep running.
pub async fn run(
    client: &SmugClient,
    albums: Vec<Album>,
    config: &SyncConfig,
    summary: &RunSummary,
) -> RunReport {
    let results: Vec<(Album, Result<AlbumOutcome, SyncError>)> = stream::iter(albums)
        .map(|album| async move {
            let outcome = sync_album(client, &album, config, summary).await;
            (album, outcome)
        })
        .buffer_unordered(config.jobs.max(1))
        .collect()
        .await;

    let mut report = RunReport::default();
    for (album, outcome) in results {
        match outcome {
            Ok(AlbumOutcome::Synced) => report.synced += 1,
            Ok(AlbumOutcome::FastSkipped) => report.fast_skipped += 1,
            Err(e) => {
                tracing::error!(
                    "Error processing album {} [{}]: {}",
                    album.relative_path().display(),
                    album.url,
                    e
                );
                report
                    .failures
                    .push((album.relative_path().display().to_string(), e));
            }
        }
    }
    report
}

/// One album's full reconciliation pass.
async fn sync_album(
    client: &SmugClient,
    album: &Album,
    config: &SyncConfig,
    summary: &RunSummary,
) -> Result<AlbumOutcome, SyncError> {
    let relative = album.relative_path();
    let album_dir = config.root.join(&relative);
    let album_label = relative.display().to_string();

    let updated = album.updated_at().ok_or_else(|| SyncError::BadTimestamp {
        album: album_label.clone(),
        value: album.last_updated.clone(),
    })?;
    let updated_sys = SystemTime::from(updated);

    // One stat() instead of a full rescan + relist + diff. Stale only if
    // the directory timestamp was altered externally.
    if config.fast && dir_mtime_matches(&album_dir, updated_sys) {
        tracing::info!(
            "skipping {} [{}], timestamp {} matches",
            relative.display(),
            album.url,
            album.last_updated
        );
        return Ok(AlbumOutcome::FastSkipped);
    }

    tracing::info!(
        "processing {} [{}] (updated {})",
        relative.display(),
        album.url,
        album.last_updated
    );

    let mut local = {
        let root = config.root.clone();
        let dir = album_dir.clone();
        tokio::task::spawn_blocking(move || scan::scan_local(&root, &dir)).await??
    };

    let images = client.images(album).await?;

    let filters = MediaFilters {
        pictures: config.pictures,
        videos: config.videos,
    };

    for image in &images {
        let (path, decision) = classify(album, image, filters, &mut local)
            .map_err(|e| e.for_image(&album_label, &image.file_name))?;
        match decision {
            Decision::SkipFiltered => {
                let kind = match image.kind {
                    MediaKind::Picture => "picture",
                    MediaKind::Video => "video",
                };
                tracing::info!("    skipping {} file {}", kind, path.display());
            }
            Decision::SkipUnchanged => {
                tracing::info!("    skipping unchanged file {}", path.display());
            }
            Decision::SkipExistingVideo => {
                tracing::info!(
                    "    skipping existing video (assuming unchanged) {}",
                    path.display()
                );
            }
            Decision::Download { url, change } => {
                let changed = match change {
                    Change::New => "(new file)",
                    Change::Changed => "(file changed)",
                };
                if config.dry_run {
                    tracing::info!("    {}: dry run, not downloading {}", path.display(), changed);
                    summary.record(image.size);
                } else {
                    let dest = config.root.join(&path);
                    let expected = (image.kind == MediaKind::Picture).then_some(image.size);
                    let written = download::download(client.http(), &url, &dest, expected)
                        .await
                        .map_err(|e| e.for_image(&album_label, &image.file_name))?;
                    tracing::info!(
                        "    {}: downloaded {} {}",
                        path.display(),
                        summary::format_bytes(written),
                        changed
                    );
                    summary.record(written);
                }
            }
        }
    }

    {
        let root = config.root.clone();
        let delete = config.delete;
        let dry_run = config.dry_run;
        tokio::task::spawn_blocking(move || prune::prune(&root, &local, delete, dry_run))
            .await??;
    }

    // The stamp is the persisted state behind the fast path; its absence
    // just forces a full rescan next run.
    if !config.dry_run && album_dir.is_dir() {
        set_dir_mtime(&album_dir, updated_sys)?;
    }

    Ok(AlbumOutcome::Synced)
}

fn dir_mtime_matches(dir: &Path, expected: SystemTime) -> bool {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => meta.modified().is_ok_and(|mtime| mtime == expected),
        _ => false,
    }
}

/// Set a directory's modification (and access) time to the album's
/// last-updated stamp.
fn set_dir_mtime(dir: &Path, time: SystemTime) -> std::io::Result<()> {
    let times = FileTimes::new().set_modified(time).set_accessed(time);
    let handle = std::fs::File::open(dir)?;
    handle.set_times(times)
}
