use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use polyfeed_types::{CachedFetch, FeedError};

use crate::key::CacheKey;

/// Best-effort persistent cache tier.
///
/// Implementations own durability and expiry bookkeeping; the layer bounds
/// every `load` with a short deadline and treats any error as a miss.
#[async_trait]
pub trait PersistentTier: Send + Sync {
    /// Load a non-expired entry, if present.
    async fn load(&self, key: &CacheKey) -> Result<Option<CachedFetch>, FeedError>;

    /// Store an entry with the given time-to-live.
    async fn store(&self, key: &CacheKey, entry: &CachedFetch, ttl: Duration)
    -> Result<(), FeedError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistRecord {
    entry: CachedFetch,
    ttl_secs: u64,
}

impl PersistRecord {
    fn is_expired(&self) -> bool {
        let age = Utc::now() - self.entry.cached_at;
        age.num_seconds() < 0 || age.num_seconds() as u64 > self.ttl_secs
    }
}

/// JSON-file persistent tier: one map of storage-key → record, rewritten
/// atomically (temp file + rename) so a write either commits in full or is
/// discarded. Suited to cross-run reuse on a single host.
pub struct JsonFileTier {
    path: PathBuf,
    // Serializes read-modify-write cycles; loads go lock-free.
    write_lock: Mutex<()>,
}

impl JsonFileTier {
    /// Create a tier backed by the given file. The file is created on the
    /// first store.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> HashMap<String, PersistRecord> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt cache file; treating as empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }
}

#[async_trait]
impl PersistentTier for JsonFileTier {
    async fn load(&self, key: &CacheKey) -> Result<Option<CachedFetch>, FeedError> {
        let map = self.read_map().await;
        Ok(map
            .get(&key.storage_key())
            .filter(|record| !record.is_expired())
            .map(|record| record.entry.clone()))
    }

    async fn store(
        &self,
        key: &CacheKey,
        entry: &CachedFetch,
        ttl: Duration,
    ) -> Result<(), FeedError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await;
        map.retain(|_, record| !record.is_expired());
        map.insert(
            key.storage_key(),
            PersistRecord {
                entry: entry.clone(),
                ttl_secs: ttl.as_secs(),
            },
        );
        let bytes =
            serde_json::to_vec(&map).map_err(|e| FeedError::Cache(format!("serialize: {e}")))?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| FeedError::Cache(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| FeedError::Cache(format!("rename {}: {e}", self.path.display())))?;
        Ok(())
    }
}
