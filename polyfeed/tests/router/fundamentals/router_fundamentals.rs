use std::sync::Arc;

use chrono::Utc;
use polyfeed::{DataKind, EngineConfig, FundamentalsPayload};

use crate::helpers::{self, MOUTAI, ScriptedConnector, descriptor};

fn clean_fundamentals(symbol: &str) -> FundamentalsPayload {
    let price = 100.0;
    let shares = 1.0e9;
    FundamentalsPayload {
        symbol: symbol.to_string(),
        pe_ratio: Some(20.0),
        pb_ratio: Some(3.0),
        ps_ratio: Some(5.0),
        eps: Some(5.0),
        roe: Some(15.0),
        market_cap: Some(price * shares),
        shares_outstanding: Some(shares),
        revenue_ttm: Some(price * shares / 5.0),
        net_income_ttm: Some(5.0 * shares),
        price: Some(price),
        report_date: Some(Utc::now().date_naive()),
    }
}

#[tokio::test]
async fn fundamentals_round_trip_with_full_scores() {
    let p1 = Arc::new(
        ScriptedConnector::new("p1").with_fundamentals(|s| Ok(clean_fundamentals(s))),
    );
    let config = EngineConfig {
        providers: vec![descriptor("p1", 85, &[DataKind::Fundamentals])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone()], config);

    let outcome = engine.fundamentals(MOUTAI).await.expect("fundamentals");
    assert_eq!(outcome.quality.completeness, 100);
    assert_eq!(outcome.quality.consistency, 100);

    let cached = engine.fundamentals(MOUTAI).await.expect("cached");
    assert!(cached.from_cache);
    assert_eq!(p1.calls(), 1);
}

#[tokio::test]
async fn ratio_disagreement_is_flagged_but_can_still_clear_the_gate() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_fundamentals(|s| {
        Ok(FundamentalsPayload {
            pe_ratio: Some(40.0), // recomputed price/eps says 20
            ..clean_fundamentals(s)
        })
    }));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 85, &[DataKind::Fundamentals])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1], config);

    let outcome = engine.fundamentals(MOUTAI).await.expect("fundamentals");
    assert_eq!(outcome.quality.consistency, 90);
    assert!(outcome.quality.issues.iter().any(|i| i.contains("p/e")));
    assert!(outcome.quality.meets(60));
}
