use std::sync::Arc;

use polyfeed_types::{CacheConfig, CachedFetch};

use crate::key::CacheKey;
use crate::memory::MemoryTier;
use crate::persist::PersistentTier;

/// Two-tier cache facade consumed by the orchestrator.
///
/// `get` returns immediately from memory or within the configured bound
/// from the persistent tier; `put` commits to memory and hands the
/// persistent write to a background task. Neither operation can fail the
/// caller: every tier error degrades to a miss with a log line.
pub struct CacheLayer {
    memory: MemoryTier,
    persistent: Option<Arc<dyn PersistentTier>>,
    cfg: CacheConfig,
}

impl CacheLayer {
    /// Build a memory-only layer.
    #[must_use]
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            memory: MemoryTier::new(&cfg),
            persistent: None,
            cfg,
        }
    }

    /// Attach a persistent tier for cross-run reuse.
    #[must_use]
    pub fn with_persistent(mut self, tier: Arc<dyn PersistentTier>) -> Self {
        self.persistent = Some(tier);
        self
    }

    /// Look up a non-expired entry. A persistent hit is promoted into the
    /// memory tier so repeated calls stay sub-millisecond.
    pub async fn get(&self, key: &CacheKey) -> Option<CachedFetch> {
        if !self.memory.enabled(key.kind()) {
            // Caching disabled for this kind: skip both tiers.
            return None;
        }
        if let Some(hit) = self.memory.get(key).await {
            return Some((*hit).clone());
        }
        let tier = self.persistent.as_ref()?;
        let deadline = self.cfg.persistent_read_timeout();
        match tokio::time::timeout(deadline, tier.load(key)).await {
            Ok(Ok(Some(entry))) => {
                self.memory
                    .insert(key.clone(), Arc::new(entry.clone()))
                    .await;
                Some(entry)
            }
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                tracing::warn!(key = %key.storage_key(), error = %e, "persistent cache read failed; treating as miss");
                None
            }
            Err(_) => {
                tracing::warn!(key = %key.storage_key(), "persistent cache read timed out; treating as miss");
                None
            }
        }
    }

    /// Write back an accepted fetch. The memory tier is updated before this
    /// returns; the persistent write is fire-and-forget and its failure
    /// never propagates.
    pub async fn put(&self, key: CacheKey, entry: CachedFetch) {
        let Some(ttl) = self.cfg.ttl_for(key.kind()) else {
            return;
        };
        let shared = Arc::new(entry);
        self.memory.insert(key.clone(), Arc::clone(&shared)).await;
        if let Some(tier) = &self.persistent {
            let tier = Arc::clone(tier);
            tokio::spawn(async move {
                if let Err(e) = tier.store(&key, &shared, ttl).await {
                    tracing::warn!(key = %key.storage_key(), error = %e, "persistent cache write failed");
                }
            });
        }
    }
}
