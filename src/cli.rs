use clap::Parser;

use crate::types::LogLevel;

#[derive(Parser, Debug)]
#[command(name = "smugsync", about = "One-way sync of SmugMug albums to a local directory")]
pub struct Cli {
    /// SmugMug API key
    #[arg(long, env = "SMUGMUG_API_KEY")]
    pub api_key: String,

    /// Account email address
    #[arg(short = 'e', long, env = "SMUGMUG_EMAIL")]
    pub email: String,

    /// Account password.
    /// WARNING: passing via --password is visible in process listings.
    /// Prefer the SMUGMUG_PASSWORD environment variable instead.
    #[arg(short = 'p', long, env = "SMUGMUG_PASSWORD")]
    pub password: String,

    /// Local directory to sync into
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: String,

    /// Do not modify the local tree; report what would transfer
    #[arg(long)]
    pub dry_run: bool,

    /// Keep local files that are no longer in any album
    #[arg(long)]
    pub no_delete: bool,

    /// Always rescan albums, even when directory timestamps match
    #[arg(long)]
    pub no_fast: bool,

    /// Don't download videos
    #[arg(long)]
    pub skip_videos: bool,

    /// Don't download photos
    #[arg(long)]
    pub skip_photos: bool,

    /// Number of albums to reconcile concurrently
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
