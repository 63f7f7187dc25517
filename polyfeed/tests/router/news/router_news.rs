use std::sync::Arc;

use chrono::Utc;
use polyfeed::{DataKind, EngineConfig, NewsItem};

use crate::helpers::{self, MOUTAI, ScriptedConnector, descriptor};

fn articles(symbol: &str, count: usize) -> Vec<NewsItem> {
    (0..count)
        .map(|i| NewsItem {
            title: format!("{symbol} story {i}"),
            source: Some("wire".to_string()),
            url: Some(format!("https://example.com/{i}")),
            summary: None,
            published_at: Some(Utc::now() - chrono::Duration::hours(i as i64)),
        })
        .collect()
}

#[tokio::test]
async fn news_is_truncated_to_the_requested_limit() {
    let p1 =
        Arc::new(ScriptedConnector::new("p1").with_news(|s, limit| Ok(articles(s, limit.max(5)))));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 80, &[DataKind::News])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1], config);

    let outcome = engine.news(MOUTAI, 2).await.expect("news");
    assert_eq!(outcome.payload.len(), 2);
}

#[tokio::test]
async fn cached_batches_serve_smaller_limits_without_refetching() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_news(|s, _| Ok(articles(s, 5))));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 80, &[DataKind::News])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone()], config);

    let first = engine.news(MOUTAI, 5).await.expect("first batch");
    assert_eq!(first.payload.len(), 5);

    let second = engine.news(MOUTAI, 3).await.expect("cached batch");
    assert!(second.from_cache);
    assert_eq!(second.payload.len(), 3);
    assert_eq!(p1.calls(), 1);
}

#[tokio::test]
async fn empty_news_batches_exhaust_rather_than_serve_nothing() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_news(|_, _| Ok(vec![])));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 80, &[DataKind::News])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1], config);

    let err = engine.news(MOUTAI, 5).await.unwrap_err();
    assert!(matches!(err, polyfeed::FeedError::Exhausted { .. }));
}
