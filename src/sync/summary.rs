//! Run-level counters shared by all concurrent album tasks.

use std::sync::atomic::{AtomicU64, Ordering};

/// Files/bytes downloaded (or, in dry-run, that would have been). Updated
/// atomically; every album task holds a reference to the same instance.
#[derive(Debug, Default)]
pub struct RunSummary {
    files: AtomicU64,
    bytes: AtomicU64,
}

impl RunSummary {
    pub fn record(&self, bytes: u64) {
        self.files.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn files(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }
}

/// Humanize a byte count the way the end-of-run log reports it.
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes > MIB {
        format!("{:.1}m", bytes as f64 / MIB as f64)
    } else if bytes > KIB {
        format!("{:.1}k", bytes as f64 / KIB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
