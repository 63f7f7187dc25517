use std::sync::Arc;
use std::time::Duration;

use polyfeed::{
    DataKind, EngineConfig, FailureReason, FeedError, ProviderKey, QuotePayload, TimeoutConfig,
};

use crate::helpers::{
    self, MOUTAI, ScriptedConnector, clean_quote, descriptor, inconsistent_quote,
};

#[tokio::test]
async fn fallback_advances_past_a_failing_provider() {
    let p1 = Arc::new(
        ScriptedConnector::new("p1")
            .with_quote(|_| Err(FeedError::unavailable("p1", "http 503"))),
    );
    let p2 =
        Arc::new(ScriptedConnector::new("p2").with_quote(|s| Ok(clean_quote(s, 42.0))));
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 90, &[DataKind::Quote]),
            descriptor("p2", 70, &[DataKind::Quote]),
        ],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2.clone()], config);

    let outcome = engine.quote(MOUTAI).await.expect("fallback succeeds");
    assert_eq!(outcome.source, ProviderKey::new("p2"));
    assert!(!outcome.from_cache);
    assert_eq!(p1.calls(), 1);
    assert_eq!(p2.calls(), 1);
}

#[tokio::test]
async fn lower_priority_providers_are_not_called_after_success() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| Ok(clean_quote(s, 10.0))));
    let p2 = Arc::new(ScriptedConnector::new("p2").with_quote(|s| Ok(clean_quote(s, 11.0))));
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 90, &[DataKind::Quote]),
            descriptor("p2", 70, &[DataKind::Quote]),
        ],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2.clone()], config);

    let outcome = engine.quote(MOUTAI).await.expect("first provider serves");
    assert_eq!(outcome.source, ProviderKey::new("p1"));
    assert_eq!(p2.calls(), 0, "fallback must stop at the first acceptance");
}

#[tokio::test]
async fn exhaustion_reports_each_failure_reason_in_order() {
    // p1 sleeps past the quote deadline; p2 answers with an impossible
    // session range that scores below the acceptance threshold.
    let p1 = Arc::new(
        ScriptedConnector::new("p1")
            .with_delay(Duration::from_millis(400))
            .with_quote(|s| Ok(clean_quote(s, 10.0))),
    );
    let p2 = Arc::new(ScriptedConnector::new("p2").with_quote(|s| Ok(inconsistent_quote(s))));
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 90, &[DataKind::Quote]),
            descriptor("p2", 70, &[DataKind::Quote]),
        ],
        timeouts: TimeoutConfig {
            quote_ms: 100,
            ..TimeoutConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2.clone()], config);

    let err = engine.quote(MOUTAI).await.unwrap_err();
    let FeedError::Exhausted { attempts } = err else {
        panic!("expected exhaustion, got {err:?}");
    };
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].provider, ProviderKey::new("p1"));
    assert!(matches!(attempts[0].reason, FailureReason::Timeout));
    assert_eq!(attempts[1].provider, ProviderKey::new("p2"));
    match &attempts[1].reason {
        FailureReason::LowQuality { overall } => assert!(*overall < 60),
        other => panic!("expected low-quality, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_payloads_fall_through_to_the_next_provider() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| {
        Ok(QuotePayload {
            symbol: s.to_string(),
            ..QuotePayload::default()
        })
    }));
    let p2 = Arc::new(ScriptedConnector::new("p2").with_quote(|s| Ok(clean_quote(s, 5.0))));
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 90, &[DataKind::Quote]),
            descriptor("p2", 70, &[DataKind::Quote]),
        ],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2.clone()], config);

    let outcome = engine.quote(MOUTAI).await.expect("fallback succeeds");
    assert_eq!(outcome.source, ProviderKey::new("p2"));
    assert_eq!(p1.calls(), 1);
}

#[tokio::test]
async fn a_lone_empty_provider_exhausts_with_an_empty_reason() {
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| {
        Ok(QuotePayload {
            symbol: s.to_string(),
            ..QuotePayload::default()
        })
    }));
    let config = EngineConfig {
        providers: vec![descriptor("p1", 90, &[DataKind::Quote])],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1], config);

    let err = engine.quote(MOUTAI).await.unwrap_err();
    let FeedError::Exhausted { attempts } = err else {
        panic!("expected exhaustion, got {err:?}");
    };
    assert_eq!(attempts.len(), 1);
    assert!(matches!(attempts[0].reason, FailureReason::Empty));
}

#[tokio::test]
async fn low_quality_data_is_rejected_in_favor_of_a_cleaner_source() {
    // Reliability 70 keeps the inconsistent payload just under the gate;
    // a higher weight would drag it over.
    let p1 = Arc::new(ScriptedConnector::new("p1").with_quote(|s| Ok(inconsistent_quote(s))));
    let p2 = Arc::new(ScriptedConnector::new("p2").with_quote(|s| Ok(clean_quote(s, 88.0))));
    let config = EngineConfig {
        providers: vec![
            descriptor("p1", 70, &[DataKind::Quote]),
            descriptor("p2", 60, &[DataKind::Quote]),
        ],
        ..EngineConfig::default()
    };
    let engine = helpers::engine_with(vec![p1.clone(), p2.clone()], config);

    let outcome = engine.quote(MOUTAI).await.expect("clean source accepted");
    assert_eq!(outcome.source, ProviderKey::new("p2"));
    assert!(outcome.quality.meets(60));
    assert_eq!(p1.calls(), 1);
}
