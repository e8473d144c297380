//! On-disk snapshot of the last successful feed response.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A single persisted feed body whose freshness is judged by its
/// modification time.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    ttl: Duration,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff the snapshot exists and `now <= modified + ttl`.
    pub async fn is_valid(&self) -> bool {
        let modified = match tokio::fs::metadata(&self.path)
            .await
            .and_then(|meta| meta.modified())
        {
            Ok(modified) => modified,
            Err(e) => {
                debug!("No usable snapshot at {}: {}", self.path.display(), e);
                return false;
            }
        };

        let fresh = is_fresh(modified, SystemTime::now(), self.ttl);
        debug!(path = %self.path.display(), fresh, "Checked snapshot age");
        fresh
    }

    /// Reads the snapshot body. Any I/O failure is reported as `None`.
    pub async fn read(&self) -> Option<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                debug!("Snapshot HIT: {} bytes", bytes.len());
                Some(bytes)
            }
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Replaces the snapshot with `bytes`. The body is written to a uniquely
    /// named sibling file and renamed over the target so readers never see a
    /// torn file, even with several writers in one process.
    pub async fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        let path = self.path.clone();
        let body = bytes.to_vec();
        tokio::task::spawn_blocking(move || persist(&path, &body))
            .await
            .map_err(std::io::Error::other)??;

        debug!("Snapshot PUT: {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

fn persist(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut staging = NamedTempFile::new_in(parent)?;
    staging.write_all(bytes)?;
    staging.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn is_fresh(modified: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    match modified.checked_add(ttl) {
        Some(expires_at) => now <= expires_at,
        None => true,
    }
}
