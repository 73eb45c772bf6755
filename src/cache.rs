//! File-backed cache of the flattened job list.
//!
//! Anything that stops a read (missing file, unreadable JSON, expired
//! or future timestamp) is a cache miss, never an error; only the
//! write path reports failures.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::CacheError;
use crate::flatten::JobRecord;

/// File name of the cached job list inside the cache directory.
const CACHE_FILE: &str = "jobs.json";

/// Stored cache entry: the records plus the freshness window they were
/// stamped with.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    stored_at: DateTime<Utc>,
    max_age_secs: u64,
    records: Vec<JobRecord>,
}

impl Envelope {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.stored_at).num_seconds();
        age >= 0 && age < self.max_age_secs as i64
    }
}

/// Keeps the flattened job list between runs.
#[async_trait]
pub trait JobCache: Send + Sync {
    /// The cached records, if present and still fresh.
    async fn get(&self) -> Option<Vec<JobRecord>>;

    /// Replace the cached records, stamped with `max_age`.
    async fn set(&self, records: &[JobRecord], max_age: Duration) -> Result<(), CacheError>;
}

/// JSON-file implementation of [`JobCache`].
pub struct FileJobCache {
    path: PathBuf,
}

impl FileJobCache {
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join(CACHE_FILE),
        }
    }
}

#[async_trait]
impl JobCache for FileJobCache {
    async fn get(&self) -> Option<Vec<JobRecord>> {
        let bytes = fs::read(&self.path).await.ok()?;
        let envelope: Envelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "ignoring unreadable cache file"
                );
                return None;
            }
        };

        if !envelope.is_fresh(Utc::now()) {
            tracing::debug!(path = %self.path.display(), "cache entry expired");
            return None;
        }
        Some(envelope.records)
    }

    async fn set(&self, records: &[JobRecord], max_age: Duration) -> Result<(), CacheError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await.map_err(|source| CacheError::Io {
                path: dir.display().to_string(),
                source,
            })?;
        }

        let envelope = Envelope {
            stored_at: Utc::now(),
            max_age_secs: max_age.as_secs(),
            records: records.to_vec(),
        };
        let body = serde_json::to_vec(&envelope).map_err(CacheError::Encode)?;
        fs::write(&self.path, body).await.map_err(|source| CacheError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}
