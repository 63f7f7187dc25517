use std::sync::Arc;

use chrono::Utc;
use polyfeed::{Bar, BarSeries, DataKind, DateRange, EngineConfig, ProviderKey};

use crate::helpers::{self, MOUTAI, ScriptedConnector, descriptor};

fn recent_series(symbol: &str, closes: &[f64]) -> BarSeries {
    let today = Utc::now().date_naive();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            date: today - chrono::Duration::days((closes.len() - 1 - i) as i64),
            open: Some(close * 0.997),
            high: Some(close * 1.01),
            low: Some(close * 0.99),
            close: Some(close),
            volume: Some(1_000.0),
        })
        .collect();
    BarSeries {
        symbol: symbol.to_string(),
        bars,
    }
}

fn week_range() -> DateRange {
    let today = Utc::now().date_naive();
    DateRange::new(today - chrono::Duration::days(7), today)
}

#[tokio::test]
async fn history_round_trips_and_caches_per_range() {
    let p1 = Arc::new(
        ScriptedConnector::new("p1")
            .with_history(|s, _| Ok(recent_series(s, &[10.0, 10.2, 10.1]))),
    );
    let config = EngineConfig {
        providers: vec![descriptor("p1", 90, &[DataKind::HistoricalBars])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone()], config);

    let outcome = engine.history(MOUTAI, week_range()).await.expect("bars");
    assert_eq!(outcome.payload.bars.len(), 3);
    assert!(!outcome.from_cache);

    let cached = engine.history(MOUTAI, week_range()).await.expect("cached");
    assert!(cached.from_cache);
    assert_eq!(p1.calls(), 1);

    // A different range is a different cache key.
    let today = Utc::now().date_naive();
    let other = DateRange::new(today - chrono::Duration::days(30), today);
    engine.history(MOUTAI, other).await.expect("second range");
    assert_eq!(p1.calls(), 2);
}

#[tokio::test]
async fn empty_series_fall_through_to_the_next_provider() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_history(|s, _| {
        Ok(BarSeries {
            symbol: s.to_string(),
            bars: vec![],
        })
    }));
    let p2 = Arc::new(
        ScriptedConnector::new("p2").with_history(|s, _| Ok(recent_series(s, &[20.0, 20.5]))),
    );
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 90, &[DataKind::HistoricalBars]),
            descriptor("p2", 70, &[DataKind::HistoricalBars]),
        ],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2], config);

    let outcome = engine.history(MOUTAI, week_range()).await.expect("bars");
    assert_eq!(outcome.source, ProviderKey::new("p2"));
    assert_eq!(p1.calls(), 1);
}
