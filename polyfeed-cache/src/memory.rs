use std::collections::HashMap;
use std::sync::Arc;

use moka::future::Cache;
use polyfeed_types::{CacheConfig, CachedFetch, DataKind};

use crate::key::CacheKey;

/// In-memory tier: one TTL store per data kind, sized and aged from
/// configuration. A kind with caching disabled simply has no store.
pub(crate) struct MemoryTier {
    stores: HashMap<DataKind, Cache<CacheKey, Arc<CachedFetch>>>,
}

impl MemoryTier {
    pub(crate) fn new(cfg: &CacheConfig) -> Self {
        let mut stores = HashMap::new();
        for kind in DataKind::all() {
            if let Some(ttl) = cfg.ttl_for(kind) {
                let cache = Cache::builder()
                    .max_capacity(cfg.max_entries)
                    .time_to_live(ttl)
                    .build();
                stores.insert(kind, cache);
            }
        }
        Self { stores }
    }

    pub(crate) fn enabled(&self, kind: DataKind) -> bool {
        self.stores.contains_key(&kind)
    }

    pub(crate) async fn get(&self, key: &CacheKey) -> Option<Arc<CachedFetch>> {
        self.stores.get(&key.kind())?.get(key).await
    }

    pub(crate) async fn insert(&self, key: CacheKey, entry: Arc<CachedFetch>) {
        if let Some(store) = self.stores.get(&key.kind()) {
            store.insert(key, entry).await;
        }
    }
}
