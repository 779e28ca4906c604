//! Error taxonomy for the reconciliation pipeline.
//!
//! Data errors (bad timestamp, unusable video) and I/O errors (filesystem,
//! network, bad HTTP status, size mismatch) share the same severity: any of
//! them is fatal to the owning album and never retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::smugmug::ApiError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Cannot parse last-updated timestamp {value:?} for album {album}")]
    BadTimestamp { album: String, value: String },

    #[error("No usable video URL for {path}")]
    NoVideoUrl { path: PathBuf },

    #[error("Downloaded {actual} bytes to {path}, expected {expected}")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("HTTP status {status} downloading {url}")]
    HttpStatus { status: u16, url: String },

    /// Wraps any error from processing a single image with album/file
    /// context for diagnostics.
    #[error("Image {file} in album {album}: {source}")]
    Image {
        album: String,
        file: String,
        #[source]
        source: Box<SyncError>,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

impl SyncError {
    /// Attach album/file context to an image-level error.
    pub fn for_image(self, album: &str, file: &str) -> Self {
        SyncError::Image {
            album: album.to_string(),
            file: file.to_string(),
            source: Box::new(self),
        }
    }
}
