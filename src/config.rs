use std::path::PathBuf;

use crate::cli::Cli;
use crate::sync::SyncConfig;

/// Validated application configuration. Read-only for the rest of the run.
pub struct Config {
    pub api_key: String,
    pub email: String,
    pub password: String,
    pub sync: SyncConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("sync", &self.sync)
            .finish_non_exhaustive()
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let directory = expand_tilde(&cli.directory);
        let root = std::path::absolute(&directory)
            .map_err(|e| anyhow::anyhow!("Cannot resolve {}: {}", directory.display(), e))?;

        Ok(Self {
            api_key: cli.api_key,
            email: cli.email,
            password: cli.password,
            sync: SyncConfig {
                root,
                dry_run: cli.dry_run,
                delete: !cli.no_delete,
                fast: !cli.no_fast,
                pictures: !cli.skip_photos,
                videos: !cli.skip_videos,
                jobs: cli.jobs.max(1) as usize,
            },
        })
    }
}
