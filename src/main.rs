//! smugsync — one-way reconciliation of a SmugMug album hierarchy onto a
//! local directory tree.
//!
//! Downloads new or changed media, leaves unchanged media untouched, and
//! (unless disabled) deletes local files no longer present remotely.
//! Albums are reconciled concurrently up to `--jobs`; per-album failures
//! are collected and reported at the end of the run.

#![warn(clippy::all)]

mod cli;
mod config;
mod smugmug;
mod sync;
mod types;

use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smugmug::SmugClient;
use sync::summary::{format_bytes, RunSummary};

fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, mins, secs)
    } else if mins > 0 {
        format!("{}m {:02}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_str())),
        )
        .init();

    let config = config::Config::from_cli(cli)?;
    tracing::info!(
        jobs = config.sync.jobs,
        root = %config.sync.root.display(),
        "Starting smugsync"
    );

    let started = Instant::now();

    let client = SmugClient::login(&config.email, &config.password, &config.api_key).await?;
    tracing::info!("Logged in {}, nickname is {}", config.email, client.nick_name());

    let albums = client.albums().await?;
    tracing::info!("Found {} albums", albums.len());

    let summary = RunSummary::default();
    let report = sync::run(&client, albums, &config.sync, &summary).await;

    tracing::info!(
        "Downloaded {} files ({}) in {}",
        summary.files(),
        format_bytes(summary.bytes()),
        format_duration(started.elapsed())
    );

    if !report.is_success() {
        for (album, error) in &report.failures {
            tracing::error!("Album {} failed: {}", album, error);
        }
        anyhow::bail!(
            "{} of {} albums failed",
            report.failures.len(),
            report.synced + report.fast_skipped + report.failures.len()
        );
    }

    Ok(())
}
