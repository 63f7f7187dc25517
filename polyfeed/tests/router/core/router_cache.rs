use std::sync::Arc;
use std::time::Duration;

use polyfeed::{CacheConfig, DataKind, EngineConfig, ProviderKey};

use crate::helpers::{self, MOUTAI, ScriptedConnector, clean_quote, descriptor};

fn single_provider_engine(cache: CacheConfig) -> (polyfeed::Polyfeed, Arc<ScriptedConnector>) {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| Ok(clean_quote(s, 123.0))));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 90, &[DataKind::Quote])],
        cache,
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone()], config);
    (engine, p1)
}

#[tokio::test]
async fn a_fresh_cached_quote_short_circuits_the_provider_walk() {
    let (engine, p1) = single_provider_engine(CacheConfig::default());

    let first = engine.quote(MOUTAI).await.expect("first fetch");
    assert!(!first.from_cache);
    assert_eq!(p1.calls(), 1);

    let second = engine.quote(MOUTAI).await.expect("cached fetch");
    assert!(second.from_cache);
    assert_eq!(second.source, ProviderKey::new("p1"));
    assert_eq!(second.quality, first.quality);
    assert_eq!(p1.calls(), 1, "cache hit must not invoke any provider");
}

#[tokio::test]
async fn expired_entries_trigger_a_refetch() {
    let mut cache = CacheConfig::default();
    cache.per_kind_ttl_ms.insert(DataKind::Quote, 50);
    let (engine, p1) = single_provider_engine(cache);

    engine.quote(MOUTAI).await.expect("first fetch");
    tokio::time::sleep(Duration::from_millis(150)).await;
    let refetched = engine.quote(MOUTAI).await.expect("refetch");
    assert!(!refetched.from_cache);
    assert_eq!(p1.calls(), 2);
}

#[tokio::test]
async fn zero_ttl_disables_caching_for_the_kind() {
    let mut cache = CacheConfig::default();
    cache.per_kind_ttl_ms.insert(DataKind::Quote, 0);
    let (engine, p1) = single_provider_engine(cache);

    engine.quote(MOUTAI).await.expect("first fetch");
    let second = engine.quote(MOUTAI).await.expect("second fetch");
    assert!(!second.from_cache);
    assert_eq!(p1.calls(), 2);
}

#[tokio::test]
async fn distinct_symbols_do_not_share_cache_entries() {
    let (engine, p1) = single_provider_engine(CacheConfig::default());

    engine.quote(MOUTAI).await.expect("first symbol");
    engine.quote("0700.HK").await.expect("second symbol");
    assert_eq!(p1.calls(), 2);
}
