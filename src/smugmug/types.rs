//! Wire and domain types for the SmugMug 1.2.2 JSON API.
//!
//! Wire structs mirror the upstream field names (`Key`, `FileName`,
//! `Video1920URL`, ...). Domain types are what the sync engine consumes;
//! converting an image record validates it up front so malformed catalog
//! data fails before any download starts.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;

use super::error::ApiError;
use crate::types::MediaKind;

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInfo {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfo {
    pub id: u64,
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Category")]
    pub category: CategoryInfo,
    #[serde(rename = "SubCategory")]
    pub subcategory: Option<CategoryInfo>,
    #[serde(rename = "LastUpdated", default)]
    pub last_updated: String,
    #[serde(rename = "URL", default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageInfo {
    pub id: u64,
    #[serde(rename = "FileName", default)]
    pub file_name: String,
    #[serde(rename = "Format", default)]
    pub format: String,
    #[serde(rename = "Size", default)]
    pub size: u64,
    #[serde(rename = "MD5Sum", default)]
    pub md5: String,
    #[serde(rename = "OriginalURL", default)]
    pub original_url: String,
    #[serde(rename = "Video1920URL", default)]
    pub video_1920_url: String,
    #[serde(rename = "Video1280URL", default)]
    pub video_1280_url: String,
    #[serde(rename = "Video960URL", default)]
    pub video_960_url: String,
    #[serde(rename = "Video640URL", default)]
    pub video_640_url: String,
    #[serde(rename = "Video320URL", default)]
    pub video_320_url: String,
}

/// A remote album. Immutable for the duration of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct Album {
    pub id: u64,
    pub key: String,
    pub url: String,
    pub title: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub last_updated: String,
}

impl Album {
    pub fn from_wire(wire: AlbumInfo) -> Self {
        Self {
            id: wire.id,
            key: wire.key,
            url: wire.url,
            title: wire.title,
            category: wire.category.name,
            subcategory: wire.subcategory.map(|c| c.name),
            last_updated: wire.last_updated,
        }
    }

    /// Destination path relative to the sync root:
    /// `category[/subcategory]/title`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.category);
        if let Some(sub) = &self.subcategory {
            path.push(sub);
        }
        path.push(&self.title);
        path
    }

    /// Parse the catalog's `YYYY-MM-DD HH:MM:SS` last-updated stamp,
    /// interpreted in local time. `None` for malformed values; the sync
    /// pipeline turns that into a per-album data error.
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        NaiveDateTime::parse_from_str(&self.last_updated, "%Y-%m-%d %H:%M:%S")
            .ok()?
            .and_local_timezone(Local)
            .single()
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}

/// A remote image or video, validated at construction: the filename is
/// present and the format code maps to a known media kind.
#[derive(Debug, Clone)]
pub struct Image {
    pub file_name: String,
    pub kind: MediaKind,
    pub size: u64,
    pub md5: String,
    pub original_url: String,
    /// Tier URLs in descending quality order (1920, 1280, 960, 640, 320);
    /// an empty string means the tier is not offered.
    pub video_urls: [String; 5],
}

impl Image {
    pub fn from_wire(wire: ImageInfo, album: &Album) -> Result<Self, ApiError> {
        if wire.file_name.is_empty() {
            return Err(ApiError::MissingFilename {
                album: album.to_string(),
                image_id: wire.id,
            });
        }
        let kind =
            MediaKind::from_format(&wire.format).ok_or_else(|| ApiError::UnknownFormat {
                album: album.to_string(),
                image_id: wire.id,
                format: wire.format.clone(),
            })?;
        Ok(Self {
            file_name: wire.file_name,
            kind,
            size: wire.size,
            md5: wire.md5,
            original_url: wire.original_url,
            video_urls: [
                wire.video_1920_url,
                wire.video_1280_url,
                wire.video_960_url,
                wire.video_640_url,
                wire.video_320_url,
            ],
        })
    }

    /// Resolve the source URL to download.
    ///
    /// Pictures use the original-resolution URL. Videos pick the highest
    /// quality tier with a non-empty URL; `None` means no tier is usable.
    pub fn download_url(&self) -> Option<&str> {
        match self.kind {
            MediaKind::Picture => Some(self.original_url.as_str()),
            MediaKind::Video => self
                .video_urls
                .iter()
                .find(|url| !url.is_empty())
                .map(String::as_str),
        }
    }
}
