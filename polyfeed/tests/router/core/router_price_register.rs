use std::sync::Arc;

use chrono::Utc;
use polyfeed::{
    Bar, BarSeries, DataKind, DateRange, EngineConfig, InMemoryPriceRegister, PriceRegister,
    Polyfeed,
};

use crate::helpers::{MOUTAI, ScriptedConnector, clean_quote, descriptor};

#[tokio::test]
async fn accepted_quotes_update_the_injected_register() {
    let register = Arc::new(InMemoryPriceRegister::new());
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| Ok(clean_quote(s, 1723.5))));
    let engine = Polyfeed::builder()
        .with_connector(p1)
        .config(EngineConfig {
            providers: vec![descriptor("p1", 90, &[DataKind::Quote])],
            ..EngineConfig::default()
        })
        .price_register(register.clone())
        .build()
        .expect("engine builds");

    assert_eq!(register.get(MOUTAI), None);
    engine.quote(MOUTAI).await.expect("quote accepted");
    assert_eq!(register.get(MOUTAI), Some(1723.5));
}

#[tokio::test]
async fn historical_closes_are_checked_against_the_register_hint() {
    let register = Arc::new(InMemoryPriceRegister::new());
    register.update(MOUTAI, 100.0);

    let today = Utc::now().date_naive();
    let p1 = Arc::new(ScriptedConnector::new("p1").with_history(move |s, _| {
        Ok(BarSeries {
            symbol: s.to_string(),
            bars: vec![Bar {
                date: today,
                open: Some(49.8),
                high: Some(50.5),
                low: Some(49.5),
                close: Some(50.0), // half the register's last known price
                volume: Some(1_000.0),
            }],
        })
    }));
    let engine = Polyfeed::builder()
        .with_connector(p1)
        .config(EngineConfig {
            providers: vec![descriptor("p1", 90, &[DataKind::HistoricalBars])],
            ..EngineConfig::default()
        })
        .price_register(register)
        .build()
        .expect("engine builds");

    let range = DateRange::new(today - chrono::Duration::days(5), today);
    let outcome = engine.history(MOUTAI, range).await.expect("accepted");
    // The divergence is flagged (major penalty) but the series still clears
    // the overall gate thanks to the other axes.
    assert_eq!(outcome.quality.consistency, 85);
    assert!(
        outcome
            .quality
            .issues
            .iter()
            .any(|issue| issue.contains("last known price"))
    );
}

#[tokio::test]
async fn register_is_untouched_when_nothing_is_accepted() {
    let register = Arc::new(InMemoryPriceRegister::new());
    let p1 = Arc::new(
        ScriptedConnector::new("p1")
            .with_quote(|_| Err(polyfeed::FeedError::unavailable("p1", "down"))),
    );
    let engine = Polyfeed::builder()
        .with_connector(p1)
        .config(EngineConfig {
            providers: vec![descriptor("p1", 90, &[DataKind::Quote])],
            ..EngineConfig::default()
        })
        .price_register(register.clone())
        .build()
        .expect("engine builds");

    let _ = engine.quote(MOUTAI).await;
    assert_eq!(register.get(MOUTAI), None);
}
